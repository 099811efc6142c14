//! Error types for the Tencent Cloud provider.

use std::fmt;
use thiserror::Error;

/// An error returned by a Tencent Cloud API, or a client-side failure that
/// was mapped onto a client error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Vendor error code, e.g. `ResourceNotFound` or `ClientError.NetworkError`.
    pub code: String,
    /// Human readable message from the API.
    pub message: String,
    /// Request id reported by the API (empty for client-side failures).
    pub request_id: String,
}

/// Client code used when the HTTP exchange itself failed.
pub const CLIENT_NETWORK_ERROR: &str = "ClientError.NetworkError";

/// Client code used when the API answered with a non-2xx status.
pub const CLIENT_HTTP_STATUS_ERROR: &str = "ClientError.HttpStatusCodeError";

/// Client code used when the response body could not be parsed.
pub const CLIENT_PARSE_ERROR: &str = "ClientError.ParseJsonError";

impl ApiError {
    /// Create an API error.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            request_id: request_id.into(),
        }
    }

    /// Create a client-side error that carries no request id.
    pub fn client(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, "")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[TencentCloudSDKError] Code={}, Message={}, RequestId={}",
            self.code, self.message, self.request_id
        )
    }
}

impl std::error::Error for ApiError {}

/// Errors that can occur while serving resources.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested object was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A validation error occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal provider error occurred.
    #[error("SDK error: {0}")]
    Sdk(String),

    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested resource or data source type is unknown.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A local I/O error occurred (e.g. writing `result_output_file`).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cloud API returned an error.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Resource already exists (create conflict).
    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    /// Permission denied (authentication/authorization failure).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Quota or rate limit exceeded.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Service temporarily unavailable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Operation timed out.
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),

    /// Operation failed due to current state (precondition not met).
    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    /// Operation not implemented.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),

    /// Invalid request from the host.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

impl ProviderError {
    /// Get the error message as a string.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg) => msg,
            Self::Validation(msg) => msg,
            Self::Sdk(msg) => msg,
            Self::Configuration(msg) => msg,
            Self::UnknownResource(msg) => msg,
            Self::Serialization(_err) => "serialization error (see Debug output)",
            Self::Io(_err) => "i/o error (see Debug output)",
            Self::Api(err) => &err.message,
            Self::AlreadyExists(msg) => msg,
            Self::PermissionDenied(msg) => msg,
            Self::ResourceExhausted(msg) => msg,
            Self::Unavailable(msg) => msg,
            Self::DeadlineExceeded(msg) => msg,
            Self::FailedPrecondition(msg) => msg,
            Self::Unimplemented(msg) => msg,
            Self::InvalidRequest(msg) => msg,
        }
    }

    /// The vendor error code, if this error came from the cloud API.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api(err) => Some(&err.code),
            _ => None,
        }
    }

    /// Whether the API reported the object as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Api(err) => err.code.starts_with("ResourceNotFound"),
            _ => false,
        }
    }
}
