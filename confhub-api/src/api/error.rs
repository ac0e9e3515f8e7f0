//! API error type and its HTTP mapping
//!
//! Every failure is answered with a single message: `{"detail": "..."}`.
//! Server-side failures are logged in full and answered with a generic
//! message; storage error text never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Malformed or invalid input (422)
    #[error("{0}")]
    Validation(String),

    /// Error raised below the API layer
    #[error(transparent)]
    Common(#[from] confhub_common::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use confhub_common::Error as E;

        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Common(err) => match err {
                E::Duplicate(_) | E::Constraint(_) => StatusCode::BAD_REQUEST,
                E::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
                E::Database(_) | E::Io(_) | E::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            error!("Request failed: {:?}", self);
            INTERNAL_DETAIL.to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "detail": detail }));

        (status, body).into_response()
    }
}
