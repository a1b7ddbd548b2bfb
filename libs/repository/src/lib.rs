use announcement::AnnouncementRepository;
use artist::ArtistRepository;
use chrono::{NaiveDateTime, Utc};
use dashboard::DashboardRepository;
use entity::validation::ValidationError;
use event::EventRepository;
use migration::Migrator;
use migration::MigratorTrait;
use sea_orm::{ActiveValue, ConnectOptions, Database, DatabaseConnection, Value};

pub use sea_orm::DbErr;
use serde::Deserialize;
use tracing::info;

mod active_models;
pub mod announcement;
pub mod artist;
pub mod dashboard;
pub mod event;

#[derive(Clone, Debug)]
pub struct Repository {
    pub artist: ArtistRepository,
    pub event: EventRepository,
    pub announcement: AnnouncementRepository,
    pub dashboard: DashboardRepository,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(
        "in sea-orm crate from unsuccessful database operations: {}: {}",
        message,
        source
    )]
    InSeaOrmDbErr {
        message: String,
        source: sea_orm::DbErr,
    },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Unknown artist id: {0}")]
    InvalidReference(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Response<T> = Result<T, RepositoryError>;

pub trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, sea_orm::DbErr> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| RepositoryError::InSeaOrmDbErr {
            message: message.to_string(),
            source: e,
        })
    }
}

pub async fn init_repository(
    db_url: &str,
    config: &DatabaseConfig,
) -> Response<Repository> {
    let db = init_db(db_url, config).await?;

    Ok(Repository::new(db))
}

impl Repository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            artist: ArtistRepository::new(db.clone()),
            event: EventRepository::new(db.clone()),
            announcement: AnnouncementRepository::new(db.clone()),
            dashboard: DashboardRepository::new(db),
        }
    }
}

async fn init_db(
    db_url: &str,
    config: &DatabaseConfig,
) -> Response<DatabaseConnection> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt)
        .await
        .into_response("in database connect")?;

    Migrator::up(&db, None)
        .await
        .into_response("in migrator up")?;

    info!(task = "database ready");

    Ok(db)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Overwrites `field` only when the patch carries a value.
pub(crate) fn set_some<V: Into<Value>>(
    field: &mut ActiveValue<V>,
    value: Option<V>,
) {
    if let Some(value) = value {
        *field = ActiveValue::Set(value);
    }
}

#[cfg(test)]
pub(crate) async fn test_repository() -> Repository {
    // one connection, otherwise every pooled connection gets its own
    // in-memory database
    let config = DatabaseConfig {
        max_connections: 1,
        min_connections: 1,
    };

    init_repository("sqlite::memory:", &config).await.unwrap()
}
