//! Conversion of raw service responses into the public schema records.
//!
//! Identity travels in response headers; content travels in the body.

use crate::errors::SchemaRegistryError;
use crate::schema::{RawResponse, Schema, SchemaProperties};
use serde::Deserialize;

pub const HEADER_LOCATION: &str = "location";
pub const HEADER_SCHEMA_ID_LOCATION: &str = "x-schema-id-location";
pub const HEADER_SCHEMA_ID: &str = "x-schema-id";
pub const HEADER_SCHEMA_VERSION: &str = "x-schema-version";
pub const HEADER_SCHEMA_TYPE: &str = "x-schema-type";

/// Body returned by register and query-by-content.
#[derive(Debug, Deserialize)]
struct SchemaIdBody {
    #[serde(default)]
    id: Option<String>,
}

/// Convert a fetch-by-id response: content from the body, identity from headers.
pub(crate) fn convert_schema_response(raw: RawResponse) -> crate::Result<Schema> {
    let mut schema_properties = convert_properties(&raw)?;
    schema_properties.response = Some(raw.clone());

    Ok(Schema {
        schema_content: raw.body.clone(),
        schema_properties,
        response: Some(raw),
    })
}

/// Convert a register or query-by-content response.
///
/// The `id` in the JSON body, when present, takes precedence over the
/// `x-schema-id` header.
pub(crate) fn convert_schema_id_response(raw: RawResponse) -> crate::Result<SchemaProperties> {
    let mut properties = convert_properties(&raw)?;

    if let Some(id) = body_id(&raw.body) {
        properties.schema_id = id;
    }

    properties.response = Some(raw);
    Ok(properties)
}

fn body_id(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str::<SchemaIdBody>(body)
        .ok()
        .and_then(|b| b.id)
        .filter(|id| !id.is_empty())
}

fn convert_properties(raw: &RawResponse) -> crate::Result<SchemaProperties> {
    let version_text = required_header(raw, HEADER_SCHEMA_VERSION)?;
    let version = version_text
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| SchemaRegistryError::InvalidResponse {
            status: raw.status,
            reason: format!(
                "header '{}' is not a positive integer: {:?}",
                HEADER_SCHEMA_VERSION, version_text
            ),
        })?;

    Ok(SchemaProperties {
        schema_id: required_header(raw, HEADER_SCHEMA_ID)?.to_string(),
        serialization_type: required_header(raw, HEADER_SCHEMA_TYPE)?.to_string(),
        version,
        location: required_header(raw, HEADER_LOCATION)?.to_string(),
        location_by_id: required_header(raw, HEADER_SCHEMA_ID_LOCATION)?.to_string(),
        response: None,
    })
}

fn required_header<'a>(raw: &'a RawResponse, name: &str) -> crate::Result<&'a str> {
    raw.header(name).ok_or_else(|| SchemaRegistryError::InvalidResponse {
        status: raw.status,
        reason: format!("missing required header '{}'", name),
    })
}
