//! Error types for version selection

use crate::headers::format_versions;
use crate::version::{ApiVersion, VersionParseError};
use http::StatusCode;
use serde::Serialize;
use std::fmt;

/// Result type alias for versioning operations
pub type Result<T, E = ApiVersionError> = std::result::Result<T, E>;

/// Machine-readable error codes carried in error payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The requested version is not implemented by the endpoint
    UnsupportedApiVersion,
    /// The requested version token could not be parsed
    InvalidApiVersion,
    /// More than one action implements the resolved version
    AmbiguousApiVersion,
    /// No version was requested and the endpoint requires one
    ApiVersionUnspecified,
}

impl ErrorCode {
    /// Wire name of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedApiVersion => "UnsupportedApiVersion",
            Self::InvalidApiVersion => "InvalidApiVersion",
            Self::AmbiguousApiVersion => "AmbiguousApiVersion",
            Self::ApiVersionUnspecified => "ApiVersionUnspecified",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured version selection error
///
/// The surrounding framework turns this into an HTTP response: `status` is
/// the response status and [`ApiVersionError::to_json`] the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersionError {
    /// HTTP status code
    pub status: StatusCode,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Versions the endpoint supports, attached for discoverability
    pub supported_versions: Vec<ApiVersion>,
    /// Internal details (for logs, never serialized)
    pub(crate) internal: Option<String>,
}

impl ApiVersionError {
    /// Create a new error
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            supported_versions: Vec::new(),
            internal: None,
        }
    }

    /// The requested version is not supported (400)
    pub fn unsupported(requested: &ApiVersion) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorCode::UnsupportedApiVersion,
            format!(
                "The HTTP resource that matches the request URI does not support the API version '{}'.",
                requested
            ),
        )
    }

    /// The requested version token is malformed (400)
    pub fn invalid(token: &str, reason: &VersionParseError) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidApiVersion,
            format!("The requested API version '{}' is invalid.", token),
        )
        .with_internal(reason.to_string())
    }

    /// Several actions implement the same version (500)
    ///
    /// The candidate names go into the internal details only.
    pub fn ambiguous(version: &ApiVersion, candidates: &[String]) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::AmbiguousApiVersion,
            format!(
                "The request matched multiple actions for API version '{}'.",
                version
            ),
        )
        .with_internal(format!("candidates: {}", candidates.join(", ")))
    }

    /// The request carried no version and one is required (400)
    pub fn unspecified() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorCode::ApiVersionUnspecified,
            "An API version is required, but was not specified.",
        )
    }

    /// Attach the endpoint's supported versions
    pub fn with_supported_versions(mut self, versions: Vec<ApiVersion>) -> Self {
        self.supported_versions = versions;
        self
    }

    /// Add internal details (for logging, hidden from the payload)
    pub fn with_internal(mut self, details: impl Into<String>) -> Self {
        self.internal = Some(details.into());
        self
    }

    /// Internal details, if any
    pub fn internal(&self) -> Option<&str> {
        self.internal.as_deref()
    }

    /// True for errors caused by the request rather than the configuration
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// JSON payload for the response body
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(ErrorResponse::from(self)).unwrap_or_else(|_| {
            serde_json::json!({
                "error": { "code": self.code.as_str(), "message": self.message }
            })
        })
    }
}

impl fmt::Display for ApiVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiVersionError {}

/// JSON representation of an error response
#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    code: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    supported_versions: Option<String>,
}

impl<'a> From<&'a ApiVersionError> for ErrorResponse<'a> {
    fn from(err: &'a ApiVersionError) -> Self {
        Self {
            error: ErrorBody {
                code: err.code.as_str(),
                message: &err.message,
                supported_versions: (!err.supported_versions.is_empty())
                    .then(|| format_versions(&err.supported_versions)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_payload() {
        let err = ApiVersionError::unsupported(&ApiVersion::new(3, 0))
            .with_supported_versions(vec![ApiVersion::new(1, 0), ApiVersion::new(2, 0)]);

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.is_client_error());

        let json = err.to_json();
        assert_eq!(json["error"]["code"], "UnsupportedApiVersion");
        assert_eq!(json["error"]["supportedVersions"], "1.0, 2.0");
        assert!(json["error"]["message"].as_str().unwrap().contains("'3.0'"));
    }

    #[test]
    fn test_invalid_keeps_reason_internal() {
        let reason = "abc".parse::<ApiVersion>().unwrap_err();
        let err = ApiVersionError::invalid("abc", &reason);

        assert_eq!(err.code, ErrorCode::InvalidApiVersion);
        assert!(err.internal().unwrap().contains("abc"));
        let json = err.to_json();
        assert!(json["error"].get("supportedVersions").is_none());
        assert!(json.get("internal").is_none());
    }

    #[test]
    fn test_ambiguous_is_server_error() {
        let err = ApiVersionError::ambiguous(
            &ApiVersion::new(2, 0),
            &["Values.Get".to_string(), "Values2.Get".to_string()],
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_client_error());
        assert_eq!(err.internal(), Some("candidates: Values.Get, Values2.Get"));
        assert!(!err.message.contains("Values2"));
    }

    #[test]
    fn test_display() {
        let err = ApiVersionError::unspecified();
        assert_eq!(
            err.to_string(),
            "ApiVersionUnspecified: An API version is required, but was not specified."
        );
    }
}
