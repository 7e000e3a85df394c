use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Main SDK error type
// ---------------------------------------------------------------------------

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SchemaRegistryError {
    /// An error returned by the schema registry service.
    #[error("{0}")]
    Service(Box<ServiceError>),

    /// HTTP transport error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The service answered with a success status but broke the response
    /// contract (e.g. a required identity header is missing).
    #[error("invalid response (HTTP {status}): {reason}")]
    InvalidResponse { status: u16, reason: String },

    /// An argument was rejected before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The credential could not produce an access token.
    #[error("credential error: {0}")]
    Credential(String),

    /// Builder misconfiguration.
    #[error("builder error: {0}")]
    Builder(String),
}

impl SchemaRegistryError {
    /// Returns the service error, if this is one.
    pub fn as_service_error(&self) -> Option<&ServiceError> {
        match self {
            SchemaRegistryError::Service(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` if the service reported that the schema, group, or ID
    /// does not exist.
    pub fn is_not_found(&self) -> bool {
        self.as_service_error().is_some_and(ServiceError::is_not_found)
    }

    /// Returns `true` for a success response that broke the header contract.
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, SchemaRegistryError::InvalidResponse { .. })
    }
}

impl From<ServiceError> for SchemaRegistryError {
    fn from(err: ServiceError) -> Self {
        SchemaRegistryError::Service(Box::new(err))
    }
}

#[cfg(feature = "reqwest-transport")]
impl From<reqwest::Error> for SchemaRegistryError {
    fn from(err: reqwest::Error) -> Self {
        SchemaRegistryError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SchemaRegistryError {
    fn from(err: serde_json::Error) -> Self {
        SchemaRegistryError::Serialization(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Service error (structured error from the registry)
// ---------------------------------------------------------------------------

#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip)]
    pub http_status: u16,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (HTTP {})", self.code, self.message, self.http_status)
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Create a new service error.
    pub fn new(code: impl Into<String>, message: impl Into<String>, http_status: u16) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            request_id: None,
            http_status,
        }
    }

    /// Attach the request id reported by the service.
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Returns the machine-readable error code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.http_status == 404
    }

    /// Returns `true` for a 4xx status.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status)
    }

    /// Returns `true` for a 5xx status.
    pub fn is_server_error(&self) -> bool {
        self.http_status >= 500
    }
}

// ---------------------------------------------------------------------------
// Wire format for parsing service error responses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    pub fn into_service_error(self, http_status: u16) -> ServiceError {
        ServiceError::new(
            self.code.unwrap_or_else(|| format!("http_{}", http_status)),
            self.message.unwrap_or_else(|| format!("HTTP {}", http_status)),
            http_status,
        )
    }
}

/// Build a [`ServiceError`] from a non-success response body.
pub(crate) fn parse_error_response(body: &[u8], status_code: u16) -> ServiceError {
    if let Ok(err_resp) = serde_json::from_slice::<ErrorResponse>(body) {
        return err_resp.error.into_service_error(status_code);
    }

    let message = String::from_utf8_lossy(body).trim().to_string();
    ServiceError::new(
        format!("http_{}", status_code),
        if message.is_empty() {
            format!("HTTP {}", status_code)
        } else {
            message
        },
        status_code,
    )
}

// ---------------------------------------------------------------------------
// Result type alias
// ---------------------------------------------------------------------------

pub type Result<T> = std::result::Result<T, SchemaRegistryError>;
