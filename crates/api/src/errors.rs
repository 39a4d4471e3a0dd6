use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use certwatch_domain::DomainError;
use serde_json::json;
use tracing::error;

/// A `DomainError` rendered as `{ "error": message }` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(DomainError::InvalidDomainName(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::InvalidDomainName(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::DomainAlreadyExists(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
