#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(warnings)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_fields_in_debug)]
//! # Schema Registry client for Rust
//!
//! An async client for a managed schema registry service. It registers
//! schema definitions, resolves schema IDs by content, and fetches schema
//! content by ID.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schema_registry::SchemaRegistryClient;
//!
//! # #[tokio::main]
//! # async fn main() -> schema_registry::Result<()> {
//! let client = SchemaRegistryClient::builder()
//!     .endpoint("https://mynamespace.servicebus.windows.net")
//!     .auth_token("<bearer token>")
//!     .build()?;
//!
//! let content = r#"{"type":"record","name":"User","fields":[{"name":"name","type":"string"}]}"#;
//!
//! // Register (version 1, or the next version if the name already exists)
//! let props = client.register_schema("com.example", "User", "avro", content).await?;
//!
//! // Resolve the ID of existing content
//! let found = client.get_schema_id("com.example", "User", "avro", content).await?;
//!
//! // Fetch content by ID
//! let schema = client.get_schema(&found.schema_id).await?;
//! assert_eq!(schema.schema_content, content);
//! # let _ = props;
//! # Ok(())
//! # }
//! ```
//!
//! ## Wire contract
//!
//! Identity is read from the `location`, `x-schema-id-location`,
//! `x-schema-id`, `x-schema-version` and `x-schema-type` response headers.
//! A success response missing any of them is reported as
//! [`SchemaRegistryError::InvalidResponse`]. Failures reported by the service
//! surface as [`SchemaRegistryError::Service`]; nothing is retried.

pub mod client;
pub mod config;
pub mod conversions;
pub mod credential;
pub mod errors;
mod pipeline;
pub mod registry;
pub mod schema;
#[cfg(feature = "testing")]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub mod testing;
pub mod transport;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ClientBuilder, SchemaRegistryClient};
pub use config::{ClientOptions, DEFAULT_API_VERSION, DEFAULT_SCOPE, SDK_USER_AGENT};
pub use credential::{AccessToken, StaticTokenCredential, TokenCredential};
pub use errors::{Result, SchemaRegistryError, ServiceError};
pub use registry::SchemaRegistry;
pub use schema::{RawResponse, Schema, SchemaDescription, SchemaProperties};
#[cfg(feature = "reqwest-transport")]
pub use transport::ReqwestTransport;
pub use transport::{DynTransport, Method as TransportMethod, Transport};
