use crate::config::ClientOptions;
use crate::conversions::{convert_schema_id_response, convert_schema_response, HEADER_SCHEMA_TYPE};
use crate::credential::{StaticTokenCredential, TokenCredential};
use crate::errors::SchemaRegistryError;
use crate::pipeline::{Call, Pipeline};
use crate::registry::SchemaRegistry;
use crate::schema::{Schema, SchemaProperties};
use crate::transport::{DynTransport, Method};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Client builder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`SchemaRegistryClient`].
pub struct ClientBuilder {
    endpoint: Option<String>,
    credential: Option<Arc<dyn TokenCredential>>,
    options: ClientOptions,
    transport: Option<DynTransport>,
    #[cfg(feature = "reqwest-transport")]
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    fn new() -> Self {
        Self {
            endpoint: None,
            credential: None,
            options: ClientOptions::default(),
            transport: None,
            #[cfg(feature = "reqwest-transport")]
            http_client: None,
        }
    }

    /// Set the service endpoint, e.g. `https://mynamespace.servicebus.windows.net`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the credential used to authorize requests.
    pub fn credential(mut self, credential: Arc<dyn TokenCredential>) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Authorize requests with a fixed bearer token.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(Arc::new(StaticTokenCredential::new(token)));
        self
    }

    /// Replace all options at once.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Set a prefix identifying the calling application in the user agent.
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options = self.options.user_agent_prefix(prefix);
        self
    }

    /// Override the service API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.options = self.options.api_version(version);
        self
    }

    /// Add a custom HTTP header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options = self.options.header(key, value);
        self
    }

    /// Set the request timeout of the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.timeout(timeout);
        self
    }

    /// Provide a custom reqwest HTTP client for the default transport.
    #[cfg(feature = "reqwest-transport")]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Send requests through a custom transport instead of reqwest.
    pub fn transport(mut self, transport: DynTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> crate::Result<SchemaRegistryClient> {
        let endpoint = self
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| SchemaRegistryError::Builder("endpoint is required".into()))?;
        let credential = self
            .credential
            .ok_or_else(|| SchemaRegistryError::Builder("credential is required".into()))?;

        let transport = match self.transport {
            Some(transport) => transport,
            #[cfg(feature = "reqwest-transport")]
            None => default_transport(self.http_client, &self.options),
            #[cfg(not(feature = "reqwest-transport"))]
            None => {
                return Err(SchemaRegistryError::Builder(
                    "a transport is required when the reqwest-transport feature is disabled"
                        .into(),
                ))
            }
        };

        let pipeline = Pipeline::new(&endpoint, credential, transport, &self.options);

        Ok(SchemaRegistryClient { endpoint, pipeline })
    }
}

#[cfg(feature = "reqwest-transport")]
fn default_transport(
    http_client: Option<reqwest::Client>,
    options: &ClientOptions,
) -> DynTransport {
    let mut transport = crate::transport::ReqwestTransport::new(http_client.unwrap_or_default());
    if let Some(timeout) = options.timeout {
        transport = transport.timeout(timeout);
    }
    Arc::new(transport)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the schema registry service.
///
/// # Example
///
/// ```rust,ignore
/// use schema_registry::SchemaRegistryClient;
///
/// let client = SchemaRegistryClient::builder()
///     .endpoint("https://mynamespace.servicebus.windows.net")
///     .auth_token(token)
///     .build()?;
///
/// let props = client
///     .register_schema("com.example", "User", "avro", &avro_json)
///     .await?;
/// let schema = client.get_schema(&props.schema_id).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SchemaRegistryClient {
    endpoint: String,
    pipeline: Pipeline,
}

impl SchemaRegistryClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for `endpoint`, authorizing with `credential`.
    pub fn new(
        endpoint: impl Into<String>,
        credential: Arc<dyn TokenCredential>,
        options: ClientOptions,
    ) -> crate::Result<Self> {
        Self::builder()
            .endpoint(endpoint)
            .credential(credential)
            .options(options)
            .build()
    }

    /// The service endpoint, exactly as given at construction.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The `User-Agent` sent with every request.
    pub fn user_agent(&self) -> &str {
        self.pipeline.user_agent()
    }

    // -----------------------------------------------------------------------
    // Schema operations
    // -----------------------------------------------------------------------

    /// Register a schema. See [`SchemaRegistry::register_schema`].
    pub async fn register_schema(
        &self,
        group: &str,
        name: &str,
        serialization_type: &str,
        content: &str,
    ) -> crate::Result<SchemaProperties> {
        tracing::debug!(
            schema_registry.group = %group,
            schema_registry.name = %name,
            "registering schema"
        );
        let raw = self
            .pipeline
            .send(schema_call(Method::Put, group, name, serialization_type, content)?)
            .await?;
        convert_schema_id_response(raw)
    }

    /// Look up a schema ID by content. See [`SchemaRegistry::get_schema_id`].
    pub async fn get_schema_id(
        &self,
        group: &str,
        name: &str,
        serialization_type: &str,
        content: &str,
    ) -> crate::Result<SchemaProperties> {
        tracing::debug!(
            schema_registry.group = %group,
            schema_registry.name = %name,
            "looking up schema id by content"
        );
        let raw = self
            .pipeline
            .send(schema_call(Method::Post, group, name, serialization_type, content)?)
            .await?;
        convert_schema_id_response(raw)
    }

    /// Fetch a schema by ID. See [`SchemaRegistry::get_schema`].
    pub async fn get_schema(&self, id: &str) -> crate::Result<Schema> {
        if id.is_empty() {
            return Err(SchemaRegistryError::InvalidArgument(
                "schema id must not be empty".into(),
            ));
        }
        tracing::debug!(schema_registry.id = %id, "fetching schema by id");
        let raw = self
            .pipeline
            .send(Call {
                method: Method::Get,
                path: format!("/$schemagroups/getSchemaById/{}", path_segment("id", id)?),
                headers: Vec::new(),
                body: None,
            })
            .await?;
        convert_schema_response(raw)
    }
}

fn schema_call<'a>(
    method: Method,
    group: &str,
    name: &str,
    serialization_type: &'a str,
    content: &'a str,
) -> crate::Result<Call<'a>> {
    Ok(Call {
        method,
        path: format!(
            "/$schemagroups/{}/schemas/{}",
            path_segment("group", group)?,
            path_segment("name", name)?
        ),
        headers: vec![(HEADER_SCHEMA_TYPE, serialization_type)],
        body: Some(content),
    })
}

/// Percent-encode one path segment.
///
/// `.` and `..` survive encoding unchanged and would be collapsed by URL
/// normalization, so they are rejected.
fn path_segment<'a>(kind: &str, value: &'a str) -> crate::Result<Cow<'a, str>> {
    if value == "." || value == ".." {
        return Err(SchemaRegistryError::InvalidArgument(format!(
            "schema {} must not be a dot segment: {:?}",
            kind, value
        )));
    }
    Ok(urlencoding::encode(value))
}

#[async_trait::async_trait]
impl SchemaRegistry for SchemaRegistryClient {
    async fn register_schema(
        &self,
        group: &str,
        name: &str,
        serialization_type: &str,
        content: &str,
    ) -> crate::Result<SchemaProperties> {
        SchemaRegistryClient::register_schema(self, group, name, serialization_type, content).await
    }

    async fn get_schema_id(
        &self,
        group: &str,
        name: &str,
        serialization_type: &str,
        content: &str,
    ) -> crate::Result<SchemaProperties> {
        SchemaRegistryClient::get_schema_id(self, group, name, serialization_type, content).await
    }

    async fn get_schema(&self, id: &str) -> crate::Result<Schema> {
        SchemaRegistryClient::get_schema(self, id).await
    }
}
