use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use entity::prelude::*;
use storage::{delete_quietly, Folder};
use tracing::info;

pub mod request;
pub mod response;

use crate::image::read_image;
use crate::response::{ApiResponse, IntoApiResponse};
use crate::util::request::page_and_limit;
use crate::util::response::{GetImageResp, MessageResp, PaginationResp};
use crate::{ApiError, ApiState};

use self::request::{CreateEventRequest, GetEventsParam, UpdateEventRequest};
use self::response::{GetEventResp, GetEventsResp, GetUpcomingEventsResp};

const UPCOMING_LIMIT: u64 = 10;

fn not_found() -> ApiError {
    ApiError::NotFound("Event not found".to_string())
}

async fn find_event(state: &ApiState, id: &str) -> ApiResponse<EventEntity> {
    state
        .repo
        .event
        .find_by_id(id)
        .await
        .into_response("500-012")?
        .ok_or_else(not_found)
}

/// List events
///
/// Sorted by start date, earliest first.
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "List events successfully", body = GetEventsResp),
        (status = 400, description = "Invalid query")
    ),
    params(GetEventsParam)
)]
pub async fn get_events(
    State(state): State<ApiState>,
    WithRejection(Query(params), _): WithRejection<
        Query<GetEventsParam>,
        ApiError,
    >,
) -> ApiResponse<Json<GetEventsResp>> {
    let (page, limit) = page_and_limit(params.page, params.limit)?;

    let (events, total) = state
        .repo
        .event
        .find(params.status, page, limit)
        .await
        .into_response("500-011")?;

    Ok(Json(GetEventsResp {
        data: events.into_iter().map(Into::into).collect(),
        pagination: PaginationResp::new(page, limit, total),
    }))
}

/// List upcoming events
#[utoipa::path(
    get,
    path = "/api/events/upcoming",
    responses(
        (status = 200, description = "List upcoming events successfully", body = GetUpcomingEventsResp)
    )
)]
pub async fn get_upcoming_events(
    State(state): State<ApiState>,
) -> ApiResponse<Json<GetUpcomingEventsResp>> {
    let events = state
        .repo
        .event
        .find_upcoming(Utc::now(), UPCOMING_LIMIT)
        .await
        .into_response("500-017")?;

    Ok(Json(GetUpcomingEventsResp {
        data: events.into_iter().map(Into::into).collect(),
    }))
}

/// Get an event
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    responses(
        (status = 200, description = "Get an event successfully", body = GetEventResp),
        (status = 404, description = "Event not found")
    ),
    params(
        ("id" = String, Path, description = "event id"),
    )
)]
pub async fn get_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<GetEventResp>> {
    let event = find_event(&state, &id).await?;

    Ok(Json(GetEventResp { data: event.into() }))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Create an event successfully", body = GetEventResp),
        (status = 400, description = "Invalid event or unknown artist id")
    )
)]
pub async fn create_event(
    State(state): State<ApiState>,
    WithRejection(Json(body), _): WithRejection<
        Json<CreateEventRequest>,
        ApiError,
    >,
) -> ApiResponse<(StatusCode, Json<GetEventResp>)> {
    let event = state
        .repo
        .event
        .create(body.into())
        .await
        .into_response("500-013")?;

    info!(task = "create event", id = %event.id);

    Ok((
        StatusCode::CREATED,
        Json(GetEventResp { data: event.into() }),
    ))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Update an event successfully", body = GetEventResp),
        (status = 400, description = "Invalid event or unknown artist id"),
        (status = 404, description = "Event not found")
    ),
    params(
        ("id" = String, Path, description = "event id"),
    )
)]
pub async fn update_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<
        Json<UpdateEventRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<GetEventResp>> {
    let event = state
        .repo
        .event
        .update(&id, body.into())
        .await
        .into_response("500-014")?;

    Ok(Json(GetEventResp { data: event.into() }))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    responses(
        (status = 200, description = "Delete an event successfully", body = MessageResp),
        (status = 404, description = "Event not found")
    ),
    params(
        ("id" = String, Path, description = "event id"),
    )
)]
pub async fn delete_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<MessageResp>> {
    let event = state
        .repo
        .event
        .delete(&id)
        .await
        .into_response("500-015")?;

    delete_quietly(state.images.as_ref(), &event.image).await;

    info!(task = "delete event", id = %event.id);

    Ok(Json(MessageResp::new("Event deleted successfully")))
}

/// Upload an event image
#[utoipa::path(
    post,
    path = "/api/events/{id}/image",
    request_body(content = ImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload an event image successfully", body = GetEventResp),
        (status = 400, description = "Missing, oversized or unsupported file"),
        (status = 404, description = "Event not found"),
        (status = 502, description = "Storage upload failed")
    ),
    params(
        ("id" = String, Path, description = "event id"),
    )
)]
pub async fn upload_event_image(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> ApiResponse<Json<GetEventResp>> {
    let previous = find_event(&state, &id).await?.image;
    let upload = read_image(multipart).await?;

    let image = state
        .images
        .upload(Folder::Events, upload)
        .await
        .into_response("502-001")?;

    let event = match state
        .repo
        .event
        .set_image(&id, image.clone())
        .await
        .into_response("500-016")
    {
        Ok(event) => event,
        Err(e) => {
            delete_quietly(state.images.as_ref(), &image).await;
            return Err(e);
        }
    };

    delete_quietly(state.images.as_ref(), &previous).await;

    Ok(Json(GetEventResp { data: event.into() }))
}

/// Get an event image
#[utoipa::path(
    get,
    path = "/api/events/{id}/image",
    responses(
        (status = 200, description = "Get an event image successfully", body = GetImageResp),
        (status = 404, description = "Event or image not found")
    ),
    params(
        ("id" = String, Path, description = "event id"),
    )
)]
pub async fn get_event_image(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<GetImageResp>> {
    let event = find_event(&state, &id).await?;

    if event.image.is_empty() {
        return Err(ApiError::NotFound("Event has no image".to_string()));
    }

    Ok(Json(GetImageResp { data: event.image }))
}

/// Delete an event image
#[utoipa::path(
    delete,
    path = "/api/events/{id}/image",
    responses(
        (status = 200, description = "Delete an event image successfully", body = GetEventResp),
        (status = 404, description = "Event not found")
    ),
    params(
        ("id" = String, Path, description = "event id"),
    )
)]
pub async fn delete_event_image(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<GetEventResp>> {
    let previous = find_event(&state, &id).await?.image;

    let event = state
        .repo
        .event
        .set_image(&id, ImageRef::default())
        .await
        .into_response("500-016")?;

    delete_quietly(state.images.as_ref(), &previous).await;

    Ok(Json(GetEventResp { data: event.into() }))
}
