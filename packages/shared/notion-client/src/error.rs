use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes returned by the Notion API in its error object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApiErrorCode {
    Unauthorized,
    RestrictedResource,
    ObjectNotFound,
    RateLimited,
    InvalidJson,
    InvalidRequestUrl,
    InvalidRequest,
    ValidationError,
    MissingVersion,
    ConflictError,
    InternalServerError,
    ServiceUnavailable,
    DatabaseConnectionUnavailable,
    GatewayTimeout,
    /// A code this client does not know yet, kept verbatim.
    Other(String),
}

impl ApiErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::RestrictedResource => "restricted_resource",
            Self::ObjectNotFound => "object_not_found",
            Self::RateLimited => "rate_limited",
            Self::InvalidJson => "invalid_json",
            Self::InvalidRequestUrl => "invalid_request_url",
            Self::InvalidRequest => "invalid_request",
            Self::ValidationError => "validation_error",
            Self::MissingVersion => "missing_version",
            Self::ConflictError => "conflict_error",
            Self::InternalServerError => "internal_server_error",
            Self::ServiceUnavailable => "service_unavailable",
            Self::DatabaseConnectionUnavailable => "database_connection_unavailable",
            Self::GatewayTimeout => "gateway_timeout",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for ApiErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "object_not_found" => Self::ObjectNotFound,
            "rate_limited" => Self::RateLimited,
            "invalid_json" => Self::InvalidJson,
            "invalid_request_url" => Self::InvalidRequestUrl,
            "invalid_request" => Self::InvalidRequest,
            "validation_error" => Self::ValidationError,
            "missing_version" => Self::MissingVersion,
            "conflict_error" => Self::ConflictError,
            "internal_server_error" => Self::InternalServerError,
            "service_unavailable" => Self::ServiceUnavailable,
            "database_connection_unavailable" => Self::DatabaseConnectionUnavailable,
            "gateway_timeout" => Self::GatewayTimeout,
            _ => Self::Other(code),
        }
    }
}

impl From<ApiErrorCode> for String {
    fn from(code: ApiErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum NotionClientError {
    /// The Notion API answered with its own error object.
    #[error("{message}")]
    Api { status: u16, code: ApiErrorCode, message: String },
    /// Non-success response whose body is not a Notion error object.
    #[error("{message}")]
    UnknownHttpResponse { status: u16, message: String },
    #[error("request to Notion API timed out")]
    RequestTimeout,
    #[error("http error: {0}")]
    Http(reqwest::Error),
    #[error("invalid JSON from Notion API: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, NotionClientError>;

impl From<reqwest::Error> for NotionClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() { NotionClientError::RequestTimeout } else { NotionClientError::Http(e) }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    object: String,
    code: String,
    message: String,
}

impl NotionClientError {
    /// Classify a non-success response from the Notion API.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(err) if err.object == "error" => NotionClientError::Api {
                status,
                code: ApiErrorCode::from(err.code),
                message: err.message,
            },
            _ => NotionClientError::UnknownHttpResponse {
                status,
                message: format!("Request to Notion API failed with status: {}", status),
            },
        }
    }

    /// True for errors produced by the Notion API itself (or by talking to it),
    /// as opposed to transport, decoding or argument problems.
    pub fn is_notion_client_error(&self) -> bool {
        matches!(
            self,
            NotionClientError::Api { .. }
                | NotionClientError::UnknownHttpResponse { .. }
                | NotionClientError::RequestTimeout
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            NotionClientError::Api { status, .. } | NotionClientError::UnknownHttpResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&ApiErrorCode> {
        match self {
            NotionClientError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notion_error_object_becomes_api_error() {
        let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find block"}"#;
        let err = NotionClientError::from_response(404, body);
        match &err {
            NotionClientError::Api { status, code, message } => {
                assert_eq!(*status, 404);
                assert_eq!(*code, ApiErrorCode::ObjectNotFound);
                assert_eq!(message, "Could not find block");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(err.is_notion_client_error());
        assert_eq!(err.to_string(), "Could not find block");
    }

    #[test]
    fn html_body_becomes_unknown_http_response() {
        let err = NotionClientError::from_response(502, "<html>bad gateway</html>");
        assert!(matches!(err, NotionClientError::UnknownHttpResponse { status: 502, .. }));
        assert_eq!(err.status(), Some(502));
        assert!(err.code().is_none());
    }

    #[test]
    fn unknown_codes_are_kept() {
        let code = ApiErrorCode::from("brand_new_code".to_string());
        assert_eq!(code, ApiErrorCode::Other("brand_new_code".into()));
        assert_eq!(code.as_str(), "brand_new_code");
        assert_eq!(ApiErrorCode::from("rate_limited".to_string()), ApiErrorCode::RateLimited);
    }

    #[test]
    fn decoding_and_argument_errors_are_not_provider_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!NotionClientError::from(json_err).is_notion_client_error());
        assert!(!NotionClientError::InvalidArgument("x".into()).is_notion_client_error());
        assert!(NotionClientError::RequestTimeout.is_notion_client_error());
    }
}
