// SPDX-License-Identifier: Apache-2.0

//! Conversion from issuelens-core errors to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use issuelens_core::IssueLensError;
use serde_json::json;

/// An error rendered as `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Response status (400 or 500).
    pub status: StatusCode,
    /// Human-readable message.
    pub detail: String,
}

impl ApiError {
    /// A 400 response for input that failed validation.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

/// Maps pipeline errors by kind:
/// - `InvalidReference`, `NotFound`, `RemoteApi`, `Connectivity` -> 400
/// - `Config`, `MalformedModelOutput` -> 500
impl From<IssueLensError> for ApiError {
    fn from(err: IssueLensError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), detail = %self.detail, "Request failed");
        } else {
            tracing::warn!(status = self.status.as_u16(), detail = %self.detail, "Request rejected");
        }
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
