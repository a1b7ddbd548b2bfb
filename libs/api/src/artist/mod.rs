use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
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

use self::request::{
    CreateArtistRequest, GetArtistsParam, UpdateArtistRequest,
};
use self::response::{GetArtistResp, GetArtistsResp};

fn not_found() -> ApiError {
    ApiError::NotFound("Artist not found".to_string())
}

async fn find_artist(state: &ApiState, id: &str) -> ApiResponse<ArtistEntity> {
    state
        .repo
        .artist
        .find_by_id(id)
        .await
        .into_response("500-002")?
        .ok_or_else(not_found)
}

/// List artists
#[utoipa::path(
    get,
    path = "/api/artists",
    responses(
        (status = 200, description = "List artists successfully", body = GetArtistsResp),
        (status = 400, description = "Invalid query")
    ),
    params(GetArtistsParam)
)]
pub async fn get_artists(
    State(state): State<ApiState>,
    WithRejection(Query(params), _): WithRejection<
        Query<GetArtistsParam>,
        ApiError,
    >,
) -> ApiResponse<Json<GetArtistsResp>> {
    let (page, limit) = page_and_limit(params.page, params.limit)?;

    let (artists, total) = state
        .repo
        .artist
        .find(params.status, page, limit)
        .await
        .into_response("500-001")?;

    Ok(Json(GetArtistsResp {
        data: artists.into_iter().map(Into::into).collect(),
        pagination: PaginationResp::new(page, limit, total),
    }))
}

/// Get an artist
#[utoipa::path(
    get,
    path = "/api/artists/{id}",
    responses(
        (status = 200, description = "Get an artist successfully", body = GetArtistResp),
        (status = 404, description = "Artist not found")
    ),
    params(
        ("id" = String, Path, description = "artist id"),
    )
)]
pub async fn get_artist(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<GetArtistResp>> {
    let artist = find_artist(&state, &id).await?;

    Ok(Json(GetArtistResp {
        data: artist.into(),
    }))
}

/// Create an artist
#[utoipa::path(
    post,
    path = "/api/artists",
    request_body = CreateArtistRequest,
    responses(
        (status = 201, description = "Create an artist successfully", body = GetArtistResp),
        (status = 400, description = "Invalid artist"),
        (status = 409, description = "Artist name already taken")
    )
)]
pub async fn create_artist(
    State(state): State<ApiState>,
    WithRejection(Json(body), _): WithRejection<
        Json<CreateArtistRequest>,
        ApiError,
    >,
) -> ApiResponse<(StatusCode, Json<GetArtistResp>)> {
    let artist = state
        .repo
        .artist
        .create(body.into())
        .await
        .into_response("500-003")?;

    info!(task = "create artist", id = %artist.id);

    Ok((
        StatusCode::CREATED,
        Json(GetArtistResp {
            data: artist.into(),
        }),
    ))
}

/// Update an artist
#[utoipa::path(
    put,
    path = "/api/artists/{id}",
    request_body = UpdateArtistRequest,
    responses(
        (status = 200, description = "Update an artist successfully", body = GetArtistResp),
        (status = 400, description = "Invalid artist"),
        (status = 404, description = "Artist not found"),
        (status = 409, description = "Artist name already taken")
    ),
    params(
        ("id" = String, Path, description = "artist id"),
    )
)]
pub async fn update_artist(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<
        Json<UpdateArtistRequest>,
        ApiError,
    >,
) -> ApiResponse<Json<GetArtistResp>> {
    let artist = state
        .repo
        .artist
        .update(&id, body.into())
        .await
        .into_response("500-004")?;

    Ok(Json(GetArtistResp {
        data: artist.into(),
    }))
}

/// Delete an artist
///
/// The artist is also removed from every event lineup.
#[utoipa::path(
    delete,
    path = "/api/artists/{id}",
    responses(
        (status = 200, description = "Delete an artist successfully", body = MessageResp),
        (status = 404, description = "Artist not found")
    ),
    params(
        ("id" = String, Path, description = "artist id"),
    )
)]
pub async fn delete_artist(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<MessageResp>> {
    let artist = state
        .repo
        .artist
        .delete(&id)
        .await
        .into_response("500-005")?;

    delete_quietly(state.images.as_ref(), &artist.image).await;

    info!(task = "delete artist", id = %artist.id);

    Ok(Json(MessageResp::new("Artist deleted successfully")))
}

/// Upload an artist image
///
/// Replaces the current image. The previous file is removed from storage.
#[utoipa::path(
    post,
    path = "/api/artists/{id}/image",
    request_body(content = ImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload an artist image successfully", body = GetArtistResp),
        (status = 400, description = "Missing, oversized or unsupported file"),
        (status = 404, description = "Artist not found"),
        (status = 502, description = "Storage upload failed")
    ),
    params(
        ("id" = String, Path, description = "artist id"),
    )
)]
pub async fn upload_artist_image(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> ApiResponse<Json<GetArtistResp>> {
    let previous = find_artist(&state, &id).await?.image;
    let upload = read_image(multipart).await?;

    let image = state
        .images
        .upload(Folder::Artists, upload)
        .await
        .into_response("502-001")?;

    let artist = match state
        .repo
        .artist
        .set_image(&id, image.clone())
        .await
        .into_response("500-006")
    {
        Ok(artist) => artist,
        Err(e) => {
            delete_quietly(state.images.as_ref(), &image).await;
            return Err(e);
        }
    };

    delete_quietly(state.images.as_ref(), &previous).await;

    Ok(Json(GetArtistResp {
        data: artist.into(),
    }))
}

/// Get an artist image
#[utoipa::path(
    get,
    path = "/api/artists/{id}/image",
    responses(
        (status = 200, description = "Get an artist image successfully", body = GetImageResp),
        (status = 404, description = "Artist or image not found")
    ),
    params(
        ("id" = String, Path, description = "artist id"),
    )
)]
pub async fn get_artist_image(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<GetImageResp>> {
    let artist = find_artist(&state, &id).await?;

    if artist.image.is_empty() {
        return Err(ApiError::NotFound("Artist has no image".to_string()));
    }

    Ok(Json(GetImageResp { data: artist.image }))
}

/// Delete an artist image
#[utoipa::path(
    delete,
    path = "/api/artists/{id}/image",
    responses(
        (status = 200, description = "Delete an artist image successfully", body = GetArtistResp),
        (status = 404, description = "Artist not found")
    ),
    params(
        ("id" = String, Path, description = "artist id"),
    )
)]
pub async fn delete_artist_image(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<GetArtistResp>> {
    let previous = find_artist(&state, &id).await?.image;

    let artist = state
        .repo
        .artist
        .set_image(&id, ImageRef::default())
        .await
        .into_response("500-006")?;

    delete_quietly(state.images.as_ref(), &previous).await;

    Ok(Json(GetArtistResp {
        data: artist.into(),
    }))
}
