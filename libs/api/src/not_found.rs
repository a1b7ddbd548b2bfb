use crate::ApiError;

pub(super) async fn get_404() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
