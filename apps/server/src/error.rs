use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hearth_core::errors::{DatabaseError, Error as CoreError};
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        let ApiError::Core(err) = self;
        match err {
            CoreError::InvalidIdentifier(_)
            | CoreError::InvalidDate(_)
            | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
            e if e.is_store_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        let body = Json(json!({ "code": status.as_u16(), "message": self.to_string() }));
        (status, body).into_response()
    }
}
