use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
};
use storage::{ImageUpload, UploadError};
use utoipa::ToSchema;

use crate::{response::ApiResponse, ApiError};

/// Multipart form field carrying the file.
pub const IMAGE_FIELD: &str = "image";

/// Request body limit for image routes. Leaves room for multipart framing
/// around a maximum size image.
pub const IMAGE_BODY_LIMIT: usize = storage::MAX_IMAGE_BYTES + 1024 * 1024;

/// `multipart/form-data` body of the image upload routes.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageForm {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

/// Reads the `image` field. Other fields are skipped.
pub(crate) async fn read_image(
    mut multipart: Multipart,
) -> ApiResponse<ImageUpload> {
    while let Some(field) =
        multipart.next_field().await.map_err(multipart_error)?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok(ImageUpload::new(content_type.as_deref(), bytes)?);
    }

    Err(UploadError::Missing.into())
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return UploadError::TooLarge.into();
    }

    ApiError::ClientError(e.body_text())
}
