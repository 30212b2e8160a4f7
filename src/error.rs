use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::debug;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                debug!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
        }
    }
}
