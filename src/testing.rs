//! Testing utilities: an in-memory registry and assertions.
//!
//! [`FakeRegistry`] answers requests the way the remote service does (same
//! routes, same identity headers, same error statuses), so it plugs into a
//! real [`SchemaRegistryClient`](crate::SchemaRegistryClient) as its
//! transport.
//!
//! # Usage
//!
//! ```rust,ignore
//! use schema_registry::testing::FakeRegistry;
//! use schema_registry::SchemaRegistryClient;
//!
//! #[tokio::test]
//! async fn test_publishes_user_schema() {
//!     let registry = FakeRegistry::new();
//!     let client = SchemaRegistryClient::builder()
//!         .endpoint("https://registry.test")
//!         .auth_token("test")
//!         .transport(registry.transport())
//!         .build()
//!         .unwrap();
//!     // ... code that registers via `client`
//!     registry.assert_registered("com.example", "User", None);
//! }
//! ```

use crate::conversions::{
    HEADER_LOCATION, HEADER_SCHEMA_ID, HEADER_SCHEMA_ID_LOCATION, HEADER_SCHEMA_TYPE,
    HEADER_SCHEMA_VERSION,
};
use crate::schema::SchemaDescription;
use crate::transport::{DynTransport, Method, Transport, TransportRequest, TransportResponse};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Serialization type a group accepts unless configured otherwise.
pub const DEFAULT_GROUP_SERIALIZATION_TYPE: &str = "avro";

const SCHEMA_GROUPS_SEGMENT: &str = "/$schemagroups/";

/// A schema version stored by the fake registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredSchema {
    pub id: String,
    pub version: u32,
    pub description: SchemaDescription,
}

/// In-memory schema registry.
#[derive(Debug, Clone, Default)]
pub struct FakeRegistry {
    inner: Arc<Mutex<FakeRegistryInner>>,
}

#[derive(Debug, Default)]
struct FakeRegistryInner {
    groups: HashMap<String, String>,
    schemas: Vec<RegisteredSchema>,
    requests: Vec<TransportRequest>,
}

impl FakeRegistry {
    /// Create an empty registry where every group accepts `avro`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the serialization type `group` accepts.
    pub fn with_group(
        self,
        group: impl Into<String>,
        serialization_type: impl Into<String>,
    ) -> Self {
        self.lock()
            .groups
            .insert(group.into(), serialization_type.into());
        self
    }

    /// A transport handle for [`ClientBuilder::transport`](crate::ClientBuilder::transport).
    pub fn transport(&self) -> DynTransport {
        Arc::new(self.clone())
    }

    /// All stored schema versions, in registration order.
    pub fn registered(&self) -> Vec<RegisteredSchema> {
        self.lock().schemas.clone()
    }

    /// All requests received, in order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.lock().requests.clone()
    }

    /// Assert that `name` was registered in `group`; with `count`, assert the
    /// exact number of versions.
    pub fn assert_registered(&self, group: &str, name: &str, count: Option<usize>) {
        let inner = self.lock();
        let matches = inner
            .schemas
            .iter()
            .filter(|s| s.description.group == group && s.description.name == name)
            .count();

        if let Some(expected) = count {
            assert_eq!(
                matches, expected,
                "Expected {} registered version(s) of '{}/{}', found {}",
                expected, group, name, matches
            );
            return;
        }

        assert!(
            matches > 0,
            "Expected schema '{}/{}' to be registered, found none. Registered: {:?}",
            group,
            name,
            inner
                .schemas
                .iter()
                .map(|s| format!("{}/{}", s.description.group, s.description.name))
                .collect::<Vec<_>>()
        );
    }

    /// Assert that `name` was never registered in `group`.
    pub fn refute_registered(&self, group: &str, name: &str) {
        let inner = self.lock();
        let matches = inner
            .schemas
            .iter()
            .filter(|s| s.description.group == group && s.description.name == name)
            .count();
        assert!(
            matches == 0,
            "Expected schema '{}/{}' not to be registered, but found {} version(s)",
            group,
            name,
            matches
        );
    }

    /// Forget all schemas and recorded requests. Group configuration is kept.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.schemas.clear();
        inner.requests.clear();
    }

    fn lock(&self) -> MutexGuard<'_, FakeRegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, request: TransportRequest) -> TransportResponse {
        let mut inner = self.lock();
        inner.requests.push(request.clone());

        let (address, query) = request
            .url
            .split_once('?')
            .unwrap_or((request.url.as_str(), ""));
        let api_version = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("api-version="))
            .unwrap_or_default()
            .to_string();

        let Some(index) = address.find(SCHEMA_GROUPS_SEGMENT) else {
            return error_response(404, "NotFound", format!("no route for {}", address));
        };
        let base = Base {
            url: address[..index].to_string(),
            api_version,
        };

        let segments: Option<Vec<String>> = address[index + SCHEMA_GROUPS_SEGMENT.len()..]
            .split('/')
            .map(|s| urlencoding::decode(s).ok().map(|d| d.into_owned()))
            .collect();
        let Some(segments) = segments else {
            return error_response(400, "InvalidRequest", "malformed path".to_string());
        };

        match (request.method, segments.as_slice()) {
            (Method::Get, [route, id]) if route == "getSchemaById" => inner.get_by_id(&base, id),
            (Method::Put | Method::Post, [group, route, name]) if route == "schemas" => {
                let description = SchemaDescription::new(
                    group.as_str(),
                    name.as_str(),
                    request.header(HEADER_SCHEMA_TYPE).unwrap_or_default(),
                    request.body.clone().unwrap_or_default(),
                );
                if request.method == Method::Put {
                    inner.register(&base, description)
                } else {
                    inner.query_id(&base, &description)
                }
            }
            _ => error_response(
                404,
                "NotFound",
                format!("no route for {} {}", request.method, address),
            ),
        }
    }
}

impl Transport for FakeRegistry {
    fn send(
        &self,
        request: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = crate::Result<TransportResponse>> + Send + '_>> {
        let response = self.handle(request);
        Box::pin(async move { Ok(response) })
    }
}

// ---------------------------------------------------------------------------
// Service emulation
// ---------------------------------------------------------------------------

struct Base {
    url: String,
    api_version: String,
}

impl FakeRegistryInner {
    fn validate(&self, description: &SchemaDescription) -> Result<(), TransportResponse> {
        for (field, value) in [
            ("group", &description.group),
            ("name", &description.name),
            ("serialization type", &description.serialization_type),
            ("content", &description.content),
        ] {
            if value.is_empty() {
                return Err(error_response(
                    400,
                    "InvalidRequest",
                    format!("{} must not be null or empty", field),
                ));
            }
        }

        let accepted = self
            .groups
            .get(&description.group)
            .map_or(DEFAULT_GROUP_SERIALIZATION_TYPE, String::as_str);
        if !accepted.eq_ignore_ascii_case(&description.serialization_type) {
            return Err(error_response(
                400,
                "InvalidSchemaType",
                format!(
                    "serialization type '{}' is not accepted by group '{}' (expected '{}')",
                    description.serialization_type, description.group, accepted
                ),
            ));
        }
        Ok(())
    }

    fn register(&mut self, base: &Base, description: SchemaDescription) -> TransportResponse {
        if let Err(response) = self.validate(&description) {
            return response;
        }

        let version = self
            .schemas
            .iter()
            .filter(|s| {
                s.description.group == description.group && s.description.name == description.name
            })
            .map(|s| s.version)
            .max()
            .unwrap_or(0)
            + 1;

        let stored = RegisteredSchema {
            id: uuid::Uuid::new_v4().simple().to_string(),
            version,
            description,
        };
        let response = identity_response(base, &stored)
            .with_body(serde_json::json!({ "id": stored.id }).to_string());
        self.schemas.push(stored);
        response
    }

    fn query_id(&self, base: &Base, description: &SchemaDescription) -> TransportResponse {
        if let Err(response) = self.validate(description) {
            return response;
        }

        self.schemas
            .iter()
            .rev()
            .find(|s| {
                s.description.group == description.group
                    && s.description.name == description.name
                    && s.description
                        .serialization_type
                        .eq_ignore_ascii_case(&description.serialization_type)
                    && s.description.content == description.content
            })
            .map_or_else(
                || {
                    error_response(
                        404,
                        "ItemNotFound",
                        format!(
                            "no schema '{}' with matching content in group '{}'",
                            description.name, description.group
                        ),
                    )
                },
                |stored| {
                    identity_response(base, stored)
                        .with_body(serde_json::json!({ "id": stored.id }).to_string())
                },
            )
    }

    fn get_by_id(&self, base: &Base, id: &str) -> TransportResponse {
        self.schemas.iter().find(|s| s.id == id).map_or_else(
            || error_response(404, "ItemNotFound", format!("schema id '{}' not found", id)),
            |stored| {
                identity_response(base, stored).with_body(stored.description.content.clone())
            },
        )
    }
}

fn identity_response(base: &Base, stored: &RegisteredSchema) -> TransportResponse {
    let location = format!(
        "{}{}{}/schemas/{}/versions/{}?api-version={}",
        base.url,
        SCHEMA_GROUPS_SEGMENT,
        urlencoding::encode(&stored.description.group),
        urlencoding::encode(&stored.description.name),
        stored.version,
        base.api_version
    );
    let location_by_id = format!(
        "{}{}getSchemaById/{}?api-version={}",
        base.url, SCHEMA_GROUPS_SEGMENT, stored.id, base.api_version
    );

    TransportResponse::new(200)
        .with_header(HEADER_LOCATION, location)
        .with_header(HEADER_SCHEMA_ID_LOCATION, location_by_id)
        .with_header(HEADER_SCHEMA_ID, stored.id.clone())
        .with_header(HEADER_SCHEMA_VERSION, stored.version.to_string())
        .with_header(HEADER_SCHEMA_TYPE, stored.description.serialization_type.clone())
}

fn error_response(status: u16, code: &str, message: String) -> TransportResponse {
    TransportResponse::new(status)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({ "error": { "code": code, "message": message } }).to_string(),
        )
}
