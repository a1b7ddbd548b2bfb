use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct StatusResp {
    pub status: &'static str,
}

pub(super) async fn get_health() -> StatusCode {
    StatusCode::OK
}

/// Service status
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Service is up", body = StatusResp)
    )
)]
pub async fn get_status() -> Json<StatusResp> {
    Json(StatusResp { status: "ok" })
}
