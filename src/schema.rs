use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A schema definition with its group, name, and serialization type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescription {
    /// Schema group under which the schema is or should be registered.
    pub group: String,
    /// Name of the schema.
    pub name: String,
    /// Serialization type of the schema. Must match the type of the group.
    pub serialization_type: String,
    /// String representation of the schema.
    pub content: String,
}

impl SchemaDescription {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        serialization_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            serialization_type: serialization_type.into(),
            content: content.into(),
        }
    }
}

/// Identity the registry assigned to a schema: ID, version, and location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProperties {
    /// ID that uniquely identifies a schema in the registry namespace.
    pub schema_id: String,
    /// Serialization type of the schema.
    pub serialization_type: String,
    /// Automatically incremented version number of the schema.
    pub version: u32,
    /// URL of the schema by group and name.
    pub location: String,
    /// URL of the schema by ID.
    pub location_by_id: String,
    #[serde(skip)]
    pub(crate) response: Option<RawResponse>,
}

impl SchemaProperties {
    /// The HTTP response these properties were read from.
    pub fn response(&self) -> Option<&RawResponse> {
        self.response.as_ref()
    }
}

impl PartialEq for SchemaProperties {
    fn eq(&self, other: &Self) -> bool {
        self.schema_id == other.schema_id
            && self.serialization_type == other.serialization_type
            && self.version == other.version
            && self.location == other.location
            && self.location_by_id == other.location_by_id
    }
}

impl Eq for SchemaProperties {}

/// Schema content together with its registry identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// String representation of the schema.
    pub schema_content: String,
    /// Identity of the schema.
    pub schema_properties: SchemaProperties,
    #[serde(skip)]
    pub(crate) response: Option<RawResponse>,
}

impl Schema {
    /// The HTTP response this schema was read from.
    pub fn response(&self) -> Option<&RawResponse> {
        self.response.as_ref()
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.schema_content == other.schema_content
            && self.schema_properties == other.schema_properties
    }
}

impl Eq for Schema {}

/// Diagnostic copy of the HTTP response a result was converted from.
///
/// Header names are stored lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RawResponse {
    /// Look up a header by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
