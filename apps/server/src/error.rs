// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing file in request")]
    MissingFile,

    #[error("File too large: maximum size is {max_mb} MB")]
    FileTooLarge { max_mb: usize },

    #[error("Invalid UTF-8 content")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Unknown model slot '{0}': expected 'base' or 'updated'")]
    InvalidSlot(String),

    #[error("Input missing: no {0} loaded")]
    InputMissing(&'static str),

    #[error("Parse failed: {0}")]
    ParseFailed(String),

    #[error("Comparison failed: {0}")]
    ComparisonFailed(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Artifact fetch failed: {0}")]
    FetchFailed(String),

    #[error("Viewer push failed: {0}")]
    ViewerPushFailed(String),

    #[error("Scratch store error: {0}")]
    Store(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Join error")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            ApiError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
            ApiError::InvalidUtf8(_) => (StatusCode::BAD_REQUEST, "INVALID_UTF8"),
            ApiError::Multipart(_) => (StatusCode::BAD_REQUEST, "MULTIPART_ERROR"),
            ApiError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            ApiError::InvalidSlot(_) => (StatusCode::BAD_REQUEST, "INVALID_SLOT"),
            ApiError::InputMissing(_) => (StatusCode::CONFLICT, "INPUT_MISSING"),
            ApiError::ParseFailed(_) => (StatusCode::UNPROCESSABLE_ENTITY, "PARSE_FAILED"),
            ApiError::ComparisonFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "COMPARISON_FAILED")
            }
            ApiError::UnknownElement(_) => (StatusCode::NOT_FOUND, "UNKNOWN_ELEMENT"),
            ApiError::FetchFailed(_) => (StatusCode::BAD_GATEWAY, "FETCH_FAILED"),
            ApiError::ViewerPushFailed(_) => (StatusCode::BAD_GATEWAY, "VIEWER_PUSH_FAILED"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TASK_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<modelsync_core::Error> for ApiError {
    fn from(err: modelsync_core::Error) -> Self {
        use modelsync_core::Error;
        match err {
            Error::InputMissing(what) => ApiError::InputMissing(what),
            Error::ParseFailed(msg) => ApiError::ParseFailed(msg),
            Error::ComparisonFailed(msg) => ApiError::ComparisonFailed(msg),
            Error::UnknownElement(id) => ApiError::UnknownElement(id),
            Error::Json(e) => ApiError::Internal(format!("JSON error: {}", e)),
        }
    }
}

impl From<cacache::Error> for ApiError {
    fn from(err: cacache::Error) -> Self {
        ApiError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON error: {}", err))
    }
}
