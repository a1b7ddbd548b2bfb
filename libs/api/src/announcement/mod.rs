use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use tracing::info;

pub mod request;
pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::util::response::MessageResp;
use crate::{ApiError, ApiState};

use self::request::{
    CreateAnnouncementRequest, GetAnnouncementsParam,
    UpdateAnnouncementRequest,
};
use self::response::{GetAnnouncementResp, GetAnnouncementsResp};

const ACTIVE_LIMIT: u64 = 10;

/// List announcements
///
/// Newest first. Not paginated.
#[utoipa::path(
    get,
    path = "/api/announcements",
    responses(
        (status = 200, description = "List announcements successfully", body = GetAnnouncementsResp),
        (status = 400, description = "Invalid query")
    ),
    params(GetAnnouncementsParam)
)]
pub async fn get_announcements(
    State(state): State<ApiState>,
    WithRejection(Query(params), _): WithRejection<
        Query<GetAnnouncementsParam>,
        ApiError,
    >,
) -> ApiResponse<Json<GetAnnouncementsResp>> {
    let announcements = state
        .repo
        .announcement
        .find(params.is_active)
        .await
        .into_response("500-021")?;

    Ok(Json(GetAnnouncementsResp {
        data: announcements.into_iter().map(Into::into).collect(),
    }))
}

/// List active announcements
///
/// Active and unexpired, highest priority first.
#[utoipa::path(
    get,
    path = "/api/announcements/active",
    responses(
        (status = 200, description = "List active announcements successfully", body = GetAnnouncementsResp)
    )
)]
pub async fn get_active_announcements(
    State(state): State<ApiState>,
) -> ApiResponse<Json<GetAnnouncementsResp>> {
    let announcements = state
        .repo
        .announcement
        .find_active(Utc::now(), ACTIVE_LIMIT)
        .await
        .into_response("500-026")?;

    Ok(Json(GetAnnouncementsResp {
        data: announcements.into_iter().map(Into::into).collect(),
    }))
}

/// Get an announcement
#[utoipa::path(
    get,
    path = "/api/announcements/{id}",
    responses(
        (status = 200, description = "Get an announcement successfully", body = GetAnnouncementResp),
        (status = 404, description = "Announcement not found")
    ),
    params(
        ("id" = String, Path, description = "announcement id"),
    )
)]
pub async fn get_announcement(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<GetAnnouncementResp>> {
    let Some(announcement) = state
        .repo
        .announcement
        .find_by_id(&id)
        .await
        .into_response("500-022")?
    else {
        return Err(ApiError::NotFound(
            "Announcement not found".to_string(),
        ));
    };

    Ok(Json(GetAnnouncementResp {
        data: announcement.into(),
    }))
}

/// Create an announcement
#[utoipa::path(
    post,
    path = "/api/announcements",
    request_body = CreateAnnouncementRequest,
    responses(
        (status = 201, description = "Create an announcement successfully", body = GetAnnouncementResp),
        (status = 400, description = "Invalid announcement")
    )
)]
pub async fn create_announcement(
    State(state): State<ApiState>,
    WithRejection(Json(body), _): WithRejection<
        Json<CreateAnnouncementRequest>,
        ApiError,
    >,
) -> ApiResponse<(StatusCode, Json<GetAnnouncementResp>)> {
    let announcement = state
        .repo
        .announcement
        .create(body.into())
        .await
        .into_response("500-023")?;

    info!(task = "create announcement", id = %announcement.id);

    Ok((
        StatusCode::CREATED,
        Json(GetAnnouncementResp {
            data: announcement.into(),
        }),
    ))
}

/// Update an announcement
#[utoipa::path(
    put,
    path = "/api/announcements/{id}",
    request_body = UpdateAnnouncementRequest,
    responses(
        (status = 200, description = "Update an announcement successfully", body = GetAnnouncementResp),
        (status = 400, description = "Invalid announcement"),
        (status = 404, description = "Announcement not found")
    ),
    params(
        ("id" = String, Path, description = "announcement id"),
    )
)]
pub async fn update_announcement(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<
        Json<UpdateAnnouncementRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<GetAnnouncementResp>> {
    let announcement = state
        .repo
        .announcement
        .update(&id, body.into())
        .await
        .into_response("500-024")?;

    Ok(Json(GetAnnouncementResp {
        data: announcement.into(),
    }))
}

/// Delete an announcement
#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    responses(
        (status = 200, description = "Delete an announcement successfully", body = MessageResp),
        (status = 404, description = "Announcement not found")
    ),
    params(
        ("id" = String, Path, description = "announcement id"),
    )
)]
pub async fn delete_announcement(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<MessageResp>> {
    state
        .repo
        .announcement
        .delete(&id)
        .await
        .into_response("500-025")?;

    Ok(Json(MessageResp::new("Announcement deleted successfully")))
}
