use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use repository::RepositoryError;
use serde::Serialize;
use storage::UploadError;
use tracing::error;

use crate::{error_code, ApiError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Serialize)]
struct ErrorMessage {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, message) = match self {
            ApiError::AuthError(message) => {
                (StatusCode::UNAUTHORIZED, message)
            }
            ApiError::ClientError(message) => {
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::UpstreamError(message) => {
                (StatusCode::BAD_GATEWAY, message)
            }
            ApiError::ServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = ErrorBody {
            error: ErrorMessage { message },
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ClientError(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::ClientError(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::ClientError(rejection.body_text())
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        ApiError::ClientError(e.to_string())
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for anyhow::Result<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(error_code = error_code, error = ?e);
            from_error_code(error_code)
        })
    }
}

impl<T> IntoApiResponse<T> for Result<T, RepositoryError> {
    fn into_response(self, error_code: &str) -> ApiResponse<T> {
        self.map_err(|e| match e {
            RepositoryError::Conflict(message) => ApiError::Conflict(message),
            e @ RepositoryError::NotFound(_) => {
                ApiError::NotFound(e.to_string())
            }
            e @ (RepositoryError::InvalidReference(_)
            | RepositoryError::Validation(_)) => {
                ApiError::ClientError(e.to_string())
            }
            e @ RepositoryError::InSeaOrmDbErr { .. } => {
                error!(error_code = error_code, error = %e);
                from_error_code(error_code)
            }
        })
    }
}

fn from_error_code(error_code: &str) -> ApiError {
    let message = error_code::message(error_code).to_string();

    match error_code.split('-').next() {
        Some("502") => ApiError::UpstreamError(message),
        Some(status) if status.starts_with('4') => {
            ApiError::ClientError(message)
        }
        _ => ApiError::ServerError(message),
    }
}

#[cfg(test)]
mod test {
    use entity::prelude::ValidationError;

    use super::*;

    fn status_of(error: ApiError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_repository_errors_map_to_status() {
        let cases: Vec<(Result<(), RepositoryError>, StatusCode)> = vec![
            (
                Err(RepositoryError::NotFound("Artist")),
                StatusCode::NOT_FOUND,
            ),
            (
                Err(RepositoryError::Conflict("taken".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                Err(RepositoryError::InvalidReference("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                Err(ValidationError::Required("Venue").into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                Err(RepositoryError::InSeaOrmDbErr {
                    message: "in test".to_string(),
                    source: sea_orm_err(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (result, expected) in cases {
            let error =
                IntoApiResponse::into_response(result, "500-001").unwrap_err();
            assert_eq!(status_of(error), expected);
        }
    }

    #[test]
    fn test_upstream_error_code() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("s3 down"));

        let error =
            IntoApiResponse::into_response(result, "502-001").unwrap_err();

        match &error {
            ApiError::UpstreamError(message) => assert_eq!(
                message,
                "Failed to upload image to cloud storage"
            ),
            _ => panic!("expected upstream error"),
        }
        assert_eq!(status_of(error), StatusCode::BAD_GATEWAY);
    }

    fn sea_orm_err() -> repository::DbErr {
        repository::DbErr::Custom("boom".to_string())
    }
}
