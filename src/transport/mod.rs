#[cfg(feature = "reqwest-transport")]
pub(crate) mod http;

#[cfg(feature = "reqwest-transport")]
pub use self::http::ReqwestTransport;

use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// HTTP method for transport requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-built request, ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl TransportRequest {
    /// Look up a request header by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as received from the wire. Header names are lower-case.
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Add a header; the name is stored lower-case.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An abstract transport for talking to the schema registry.
///
/// This trait is object-safe and uses `Pin<Box<dyn Future>>` for async support.
/// The default implementation uses reqwest (enabled via the `reqwest-transport` feature).
///
/// Implement this trait to provide custom transports (e.g., in-memory for
/// testing, or another HTTP stack).
///
/// # Example
///
/// ```rust,no_run
/// use schema_registry::transport::{Transport, TransportRequest, TransportResponse};
/// use std::pin::Pin;
///
/// #[derive(Debug)]
/// struct MyTransport;
///
/// impl Transport for MyTransport {
///     fn send(
///         &self,
///         request: TransportRequest,
///     ) -> Pin<Box<dyn std::future::Future<Output = schema_registry::Result<TransportResponse>> + Send + '_>> {
///         Box::pin(async move {
///             // your implementation here
///             Ok(TransportResponse::new(200))
///         })
///     }
/// }
/// ```
pub trait Transport: Send + Sync + Debug {
    /// Send the request and return whatever the server answered.
    ///
    /// Non-success statuses are returned as `Ok`; only failures to exchange
    /// the request at all are `Err`.
    fn send(
        &self,
        request: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = crate::Result<TransportResponse>> + Send + '_>>;
}

/// A cloneable, type-erased transport handle.
pub type DynTransport = Arc<dyn Transport>;
