//! Error types for qbosdk.
//!
//! This module provides a unified error type with explicit variants for
//! transport, API status, response decoding, and configuration errors.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// The unified error type for qbosdk operations.
///
/// Nothing is retried or recovered locally; every failure is surfaced here
/// so callers can decide what to do.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success HTTP status from the token endpoint or a resource endpoint.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A success response whose body could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Invalid configuration supplied at construction time.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns the API error if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the API error kind if this is an API error.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        self.as_api().map(|err| err.kind)
    }

    /// Returns the HTTP status code if this is an API error.
    pub fn status(&self) -> Option<u16> {
        self.as_api().map(|err| err.status)
    }

    /// Returns true if the access token should be refreshed before retrying.
    pub fn is_auth_error(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_auth_error)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    Client { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Classification of a non-success HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Token endpoint 401: wrong client secret and/or refresh token.
    UnauthorizedClient,
    /// Token endpoint 404: the client id does not exist.
    NotFoundClient,
    /// Resource 400: some of the parameters are wrong.
    WrongParams,
    /// Resource 401: the access token is invalid, refresh it.
    InvalidToken,
    /// Resource 403: the user has insufficient privilege.
    NoPrivilege,
    /// Resource 404: no item with the requested id.
    NotFoundItem,
    /// Resource 498: the access token has expired, refresh it.
    ExpiredToken,
    /// 500 from either endpoint.
    InternalServer,
    /// Any other status.
    Unexpected,
}

impl ApiErrorKind {
    /// Classify a status code returned by the OAuth token endpoint.
    pub fn from_token_status(status: u16) -> Self {
        match status {
            401 => ApiErrorKind::UnauthorizedClient,
            404 => ApiErrorKind::NotFoundClient,
            500 => ApiErrorKind::InternalServer,
            _ => ApiErrorKind::Unexpected,
        }
    }

    /// Classify a status code returned by a resource endpoint.
    pub fn from_resource_status(status: u16) -> Self {
        match status {
            400 => ApiErrorKind::WrongParams,
            401 => ApiErrorKind::InvalidToken,
            403 => ApiErrorKind::NoPrivilege,
            404 => ApiErrorKind::NotFoundItem,
            498 => ApiErrorKind::ExpiredToken,
            500 => ApiErrorKind::InternalServer,
            _ => ApiErrorKind::Unexpected,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            ApiErrorKind::UnauthorizedClient => "wrong client secret or/and refresh token",
            ApiErrorKind::NotFoundClient => "client id doesn't exist",
            ApiErrorKind::WrongParams => "some of the parameters are wrong",
            ApiErrorKind::InvalidToken => "invalid token, try to refresh it",
            ApiErrorKind::NoPrivilege => "forbidden, the user has insufficient privilege",
            ApiErrorKind::NotFoundItem => "not found item with id",
            ApiErrorKind::ExpiredToken => "expired token, try to refresh it",
            ApiErrorKind::InternalServer => "internal server error",
            ApiErrorKind::Unexpected => "unexpected status",
        }
    }
}

/// A non-success HTTP response.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Classification of the status.
    pub kind: ApiErrorKind,
    /// Raw response body.
    pub body: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.kind.describe())?;
        if let Some(message) = self.fault_message() {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Quickbooks fault envelope, e.g. `{"Fault":{"Error":[{"Message":..}]}}`.
#[derive(Debug, Deserialize)]
struct FaultEnvelope {
    #[serde(rename = "Fault")]
    fault: Fault,
}

#[derive(Debug, Deserialize)]
struct Fault {
    #[serde(rename = "Error", default)]
    errors: Vec<FaultDetail>,
}

#[derive(Debug, Deserialize)]
struct FaultDetail {
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "Detail")]
    detail: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, kind: ApiErrorKind, body: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            body: body.into(),
        }
    }

    /// Create an API error for a token endpoint response.
    pub fn from_token_response(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, ApiErrorKind::from_token_status(status), body)
    }

    /// Create an API error for a resource endpoint response.
    pub fn from_resource_response(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, ApiErrorKind::from_resource_status(status), body)
    }

    /// Check if this error means the access token must be refreshed.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::InvalidToken | ApiErrorKind::ExpiredToken
        )
    }

    /// First message of a Quickbooks fault body, if the body is one.
    pub fn fault_message(&self) -> Option<String> {
        let envelope: FaultEnvelope = serde_json::from_str(&self.body).ok()?;
        let first = envelope.fault.errors.into_iter().next()?;
        match (first.message, first.detail) {
            (Some(message), Some(detail)) => Some(format!("{}: {}", message, detail)),
            (Some(message), None) => Some(message),
            (None, detail) => detail,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment is neither `production` nor `sandbox`.
    #[error("environment can only be production / sandbox, got '{value}'")]
    UnknownEnvironment { value: String },

    /// Invalid realm (company) id.
    #[error("invalid realm id '{value}': {reason}")]
    RealmId { value: String, reason: String },

    /// Invalid server URL.
    #[error("invalid URL '{value}': {reason}")]
    Url { value: String, reason: String },

    /// A required credential field is empty.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// A resource client was used before a server URL was pushed to it.
    #[error("no server URL set for {resource}")]
    MissingServerUrl { resource: &'static str },

    /// A resource client was used before an access token was pushed to it.
    #[error("no access token set for {resource}")]
    MissingAccessToken { resource: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_status_classification() {
        assert_eq!(
            ApiErrorKind::from_token_status(401),
            ApiErrorKind::UnauthorizedClient
        );
        assert_eq!(
            ApiErrorKind::from_token_status(404),
            ApiErrorKind::NotFoundClient
        );
        assert_eq!(
            ApiErrorKind::from_token_status(500),
            ApiErrorKind::InternalServer
        );
        assert_eq!(
            ApiErrorKind::from_token_status(429),
            ApiErrorKind::Unexpected
        );
        // 400 only has a meaning on resource endpoints
        assert_eq!(
            ApiErrorKind::from_token_status(400),
            ApiErrorKind::Unexpected
        );
    }

    #[test]
    fn resource_status_classification() {
        assert_eq!(
            ApiErrorKind::from_resource_status(400),
            ApiErrorKind::WrongParams
        );
        assert_eq!(
            ApiErrorKind::from_resource_status(401),
            ApiErrorKind::InvalidToken
        );
        assert_eq!(
            ApiErrorKind::from_resource_status(403),
            ApiErrorKind::NoPrivilege
        );
        assert_eq!(
            ApiErrorKind::from_resource_status(404),
            ApiErrorKind::NotFoundItem
        );
        assert_eq!(
            ApiErrorKind::from_resource_status(498),
            ApiErrorKind::ExpiredToken
        );
        assert_eq!(
            ApiErrorKind::from_resource_status(503),
            ApiErrorKind::Unexpected
        );
    }

    #[test]
    fn auth_errors() {
        assert!(ApiError::from_resource_response(401, "").is_auth_error());
        assert!(ApiError::from_resource_response(498, "").is_auth_error());
        assert!(!ApiError::from_resource_response(403, "").is_auth_error());
        // A 401 at refresh time is a credential problem, not a stale token.
        assert!(!ApiError::from_token_response(401, "").is_auth_error());
    }

    #[test]
    fn display_includes_status_and_fault() {
        let body = r#"{"Fault":{"Error":[{"Message":"Object Not Found","Detail":"Account 99 not found"}],"type":"ValidationFault"}}"#;
        let err = ApiError::from_resource_response(404, body);
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("Object Not Found: Account 99 not found"));
    }

    #[test]
    fn fault_message_ignores_plain_bodies() {
        let err = ApiError::from_token_response(500, "Internal Server Error");
        assert!(err.fault_message().is_none());
        assert_eq!(err.to_string(), "HTTP 500: internal server error");
    }

    #[test]
    fn error_accessors() {
        let err: Error = ApiError::from_token_response(429, "slow down").into();
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.api_kind(), Some(ApiErrorKind::Unexpected));
        assert!(!err.is_auth_error());

        let err: Error = ConfigError::EmptyField { field: "client_id" }.into();
        assert_eq!(err.status(), None);
    }
}
