use api::{config::Config, connect_image_store, serve, ApiState};
use repository::init_repository;
use shuttle_runtime::{Error, SecretStore, Secrets};
use tracing_subscriber::EnvFilter;

#[shuttle_runtime::main]
async fn main(
    #[Secrets] secret_store: SecretStore,
    #[shuttle_shared_db::Postgres(local_uri = "{secrets.DATABASE_URL}")]
    conn_string: String,
) -> shuttle_axum::ShuttleAxum {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config: Config = util::load_config("Config.toml")
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    let repository = init_repository(&conn_string, &config.database)
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    let images = connect_image_store(
        &config.storage,
        secret_store.get("AWS_ACCESS_KEY_ID"),
        secret_store.get("AWS_SECRET_ACCESS_KEY"),
    )
    .await;

    let state = ApiState::new(
        repository,
        images,
        secret_store.get("ACCEPTABLE_API_KEY"),
    );

    let router = serve(state, &config.cors)
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    Ok(router.into())
}
