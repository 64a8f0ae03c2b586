use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use notion_client::NotionClientError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing Notion auth token: set NOTION_API_KEY or pass --auth")]
    MissingAuthToken,
    #[error("invalid api base route `{0}`")]
    InvalidApiBase(String),
    #[error("invalid base url `{0}`")]
    InvalidBaseUrl(String),
    #[error("timeout must be greater than zero")]
    InvalidTimeout,
    #[error("invalid listen address `{0}`")]
    InvalidListenAddr(String),
    #[error("failed to build client: {0}")]
    Client(#[from] NotionClientError),
}

/// The `{statusCode, message}` body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    pub status_code: u16,
    pub message: String,
}

impl NormalizedError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self { status_code, message: message.into() }
    }

    pub fn bad_request() -> Self {
        Self::new(400, "Bad Request")
    }

    pub fn internal() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code, self.message)
    }
}

impl IntoResponse for NormalizedError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map a client error to the response body shown to callers.
///
/// Errors coming from the Notion API keep their status and message; anything
/// else collapses to a generic 500 so internals never leak.
pub fn map_error(error: &NotionClientError) -> NormalizedError {
    match error {
        NotionClientError::Api { status, message, .. } | NotionClientError::UnknownHttpResponse { status, message } => {
            NormalizedError::new(*status, message.clone())
        }
        NotionClientError::RequestTimeout => NormalizedError::new(504, "Request to Notion API timed out"),
        _ => NormalizedError::internal(),
    }
}
