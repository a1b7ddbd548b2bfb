use axum::{
    extract::{Request, State},
    http,
    middleware::Next,
    response::Response,
};

use crate::{ApiError, ApiState};

/// Passes every request through when no API key is configured.
pub async fn auth(
    State(state): State<ApiState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(accept_api_key) = state.api_key.as_deref() else {
        return Ok(next.run(req).await);
    };

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header else {
        return Err(ApiError::AuthError(
            "Authorization header is missing".to_string(),
        ));
    };

    if accept_api_key == auth_header {
        return Ok(next.run(req).await);
    }

    Err(ApiError::AuthError("Invalid API key".to_string()))
}
