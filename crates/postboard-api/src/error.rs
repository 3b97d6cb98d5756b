//! Error types for the REST API.
//!
//! [`ApiError`] wraps storage failures and converts them into an HTTP
//! response via its [`IntoResponse`](axum::response::IntoResponse)
//! implementation. The body always carries the failure kind so clients
//! can branch on it without parsing the message.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use postboard_db::StoreError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The storage layer rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body was not valid JSON for the payload type (missing
    /// field, wrong type, bad syntax or content type).
    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),

    /// The query string could not be parsed.
    #[error("invalid query: {0}")]
    Query(#[from] QueryRejection),
}

impl ApiError {
    /// Stable `snake_case` name of the failure kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Store(e) => match e {
                StoreError::Validation(_) => "validation_error",
                StoreError::ReferentialIntegrity { .. } => "referential_integrity_error",
                StoreError::Uniqueness { .. } => "uniqueness_error",
                StoreError::Unavailable(_) => "storage_unavailable",
                StoreError::Database(_) | StoreError::Migration(_) | StoreError::Config(_) => {
                    "internal_error"
                }
            },
            Self::Body(_) | Self::Query(_) => "validation_error",
        }
    }

    /// HTTP status for this failure.
    ///
    /// Extractor rejections keep the status axum assigns them.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(e) => match e {
                StoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::ReferentialIntegrity { .. } | StoreError::Uniqueness { .. } => {
                    StatusCode::CONFLICT
                }
                StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                StoreError::Database(_) | StoreError::Migration(_) | StoreError::Config(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Body(rejection) => rejection.status(),
            Self::Query(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
