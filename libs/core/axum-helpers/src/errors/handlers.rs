use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{ErrorCode, error_response};

/// Router fallback for unknown paths
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    error_response(
        StatusCode::NOT_FOUND,
        ErrorCode::RouteNotFound.default_message().to_string(),
        ErrorCode::RouteNotFound,
    )
    .into_response()
}
