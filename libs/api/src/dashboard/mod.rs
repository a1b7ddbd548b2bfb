use axum::{extract::State, Json};

pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::ApiState;

use self::response::GetStatsResp;

/// Dashboard statistics
///
/// Artist, event and announcement counts plus ticketing totals for upcoming
/// events.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Get statistics successfully", body = GetStatsResp)
    )
)]
pub async fn get_stats(
    State(state): State<ApiState>,
) -> ApiResponse<Json<GetStatsResp>> {
    let stats = state
        .repo
        .dashboard
        .stats()
        .await
        .into_response("500-031")?;

    Ok(Json(GetStatsResp { data: stats.into() }))
}
