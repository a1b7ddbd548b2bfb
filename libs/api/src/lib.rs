use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use repository::Repository;
use storage::{ImageStore, InMemoryImageStore, S3Config, S3ImageStore};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

pub mod announcement;
pub mod artist;
mod auth;
pub mod config;
pub mod dashboard;
mod error_code;
pub mod event;
pub mod healthz;
mod image;
pub mod not_found;
mod response;
mod util;

use crate::config::CorsConfig;

#[derive(Debug)]
pub enum ApiError {
    AuthError(String),
    ClientError(String),
    NotFound(String),
    Conflict(String),
    UpstreamError(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    repo: Repository,
    images: Arc<dyn ImageStore>,
    api_key: Option<String>,
}

impl ApiState {
    /// `api_key` of `None` leaves the `/api` routes open.
    pub fn new(
        repo: Repository,
        images: Arc<dyn ImageStore>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            repo,
            images,
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz::get_status,
        artist::get_artists,
        artist::get_artist,
        artist::create_artist,
        artist::update_artist,
        artist::delete_artist,
        artist::upload_artist_image,
        artist::get_artist_image,
        artist::delete_artist_image,
        event::get_events,
        event::get_upcoming_events,
        event::get_event,
        event::create_event,
        event::update_event,
        event::delete_event,
        event::upload_event_image,
        event::get_event_image,
        event::delete_event_image,
        announcement::get_announcements,
        announcement::get_active_announcements,
        announcement::get_announcement,
        announcement::create_announcement,
        announcement::update_announcement,
        announcement::delete_announcement,
        dashboard::get_stats,
    ),
    components(schemas(
        healthz::StatusResp,
        util::response::PaginationResp,
        util::response::MessageResp,
        util::response::GetImageResp,
        image::ImageForm,
        entity::prelude::ImageRef,
        entity::prelude::SocialMedia,
        entity::prelude::ArtistStatus,
        entity::prelude::EventStatus,
        entity::prelude::Priority,
        artist::request::CreateArtistRequest,
        artist::request::UpdateArtistRequest,
        artist::response::Artist,
        artist::response::GetArtistsResp,
        artist::response::GetArtistResp,
        event::request::CreateEventRequest,
        event::request::UpdateEventRequest,
        event::response::LineupArtist,
        event::response::Event,
        event::response::GetEventsResp,
        event::response::GetUpcomingEventsResp,
        event::response::GetEventResp,
        announcement::request::CreateAnnouncementRequest,
        announcement::request::UpdateAnnouncementRequest,
        announcement::response::Announcement,
        announcement::response::GetAnnouncementsResp,
        announcement::response::GetAnnouncementResp,
        dashboard::response::Stats,
        dashboard::response::CountStats,
        dashboard::response::EventCountStats,
        dashboard::response::Ticketing,
        dashboard::response::GetStatsResp,
    )),
    tags(
        (name = "backstage", description = "Artist, event and announcement management API")
    )
)]
pub struct ApiDoc;

/// Picks S3 when both credentials are present and non-empty, otherwise
/// keeps images in memory for the life of the process.
pub async fn connect_image_store(
    config: &S3Config,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
) -> Arc<dyn ImageStore> {
    let access_key_id = access_key_id.filter(|key| !key.is_empty());
    let secret_access_key = secret_access_key.filter(|key| !key.is_empty());

    match (access_key_id, secret_access_key) {
        (Some(access_key_id), Some(secret_access_key)) => Arc::new(
            S3ImageStore::connect(config, &access_key_id, &secret_access_key)
                .await,
        ),
        _ => {
            warn!(
                task = "connect object store",
                message = "no AWS credentials, uploads are kept in process \
                           memory, never served at their url and lost on \
                           restart"
            );
            Arc::new(InMemoryImageStore::new(config.public_url.clone()))
        }
    }
}

pub fn serve(state: ApiState, cors: &CorsConfig) -> anyhow::Result<Router> {
    info!(task = "start api serving");

    // artists
    let artist_router = Router::new()
        .route("/", get(artist::get_artists).post(artist::create_artist))
        .route(
            "/:id",
            get(artist::get_artist)
                .put(artist::update_artist)
                .delete(artist::delete_artist),
        )
        .route(
            "/:id/image",
            get(artist::get_artist_image)
                .post(artist::upload_artist_image)
                .delete(artist::delete_artist_image)
                .layer(DefaultBodyLimit::max(image::IMAGE_BODY_LIMIT)),
        )
        .fallback(not_found::get_404)
        .with_state(state.clone());

    // events
    let event_router = Router::new()
        .route("/", get(event::get_events).post(event::create_event))
        .route("/upcoming", get(event::get_upcoming_events))
        .route(
            "/:id",
            get(event::get_event)
                .put(event::update_event)
                .delete(event::delete_event),
        )
        .route(
            "/:id/image",
            get(event::get_event_image)
                .post(event::upload_event_image)
                .delete(event::delete_event_image)
                .layer(DefaultBodyLimit::max(image::IMAGE_BODY_LIMIT)),
        )
        .fallback(not_found::get_404)
        .with_state(state.clone());

    // announcements
    let announcement_router = Router::new()
        .route(
            "/",
            get(announcement::get_announcements)
                .post(announcement::create_announcement),
        )
        .route("/active", get(announcement::get_active_announcements))
        .route(
            "/:id",
            get(announcement::get_announcement)
                .put(announcement::update_announcement)
                .delete(announcement::delete_announcement),
        )
        .fallback(not_found::get_404)
        .with_state(state.clone());

    // dashboard
    let dashboard_router = Router::new()
        .route("/stats", get(dashboard::get_stats))
        .fallback(not_found::get_404)
        .with_state(state.clone());

    let api_router = Router::new()
        .nest("/artists", artist_router)
        .nest("/events", event_router)
        .nest("/announcements", announcement_router)
        .nest("/dashboard", dashboard_router)
        .route_layer(middleware::from_fn_with_state(state, auth::auth));

    let router = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .route("/healthz", get(healthz::get_health))
        .route("/status", get(healthz::get_status))
        .nest("/api", api_router)
        .fallback(not_found::get_404)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors)?);

    Ok(router)
}

fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let allow_origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin: {origin}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
