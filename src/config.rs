use std::collections::HashMap;
use std::time::Duration;

/// Service API version sent as the `api-version` query parameter.
pub const DEFAULT_API_VERSION: &str = "2020-09-01-preview";

/// Token scope requested from the credential when none is configured.
pub const DEFAULT_SCOPE: &str = "https://eventhubs.azure.net/.default";

/// Identification of this library in the `User-Agent` header.
pub const SDK_USER_AGENT: &str = concat!("schema-registry-rust/", env!("CARGO_PKG_VERSION"));

/// Options that shape every request sent by a
/// [`SchemaRegistryClient`](crate::SchemaRegistryClient).
///
/// # Example
///
/// ```rust
/// use schema_registry::ClientOptions;
///
/// let options = ClientOptions::new()
///     .user_agent_prefix("billing-service")
///     .header("X-Tenant-Id", "tenant-42")
///     .timeout(std::time::Duration::from_secs(10));
///
/// assert!(options.resolved_user_agent().starts_with("billing-service "));
/// ```
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Prepended to [`SDK_USER_AGENT`] in the `User-Agent` header.
    pub user_agent_prefix: Option<String>,
    /// Service API version.
    pub api_version: String,
    /// Scope passed to the credential when requesting a token.
    pub scope: String,
    /// Custom HTTP headers.
    pub headers: HashMap<String, String>,
    /// Request timeout, applied by the default transport.
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent_prefix: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            headers: HashMap::new(),
            timeout: None,
        }
    }
}

impl ClientOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix identifying the calling application.
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Override the service API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Override the token scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Add a custom HTTP header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The `User-Agent` value sent with every request.
    pub fn resolved_user_agent(&self) -> String {
        match self.user_agent_prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => format!("{} {}", prefix, SDK_USER_AGENT),
            _ => SDK_USER_AGENT.to_string(),
        }
    }
}
