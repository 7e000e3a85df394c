use crate::schema::{Schema, SchemaProperties};

/// The operations of a schema registry.
///
/// [`SchemaRegistryClient`](crate::SchemaRegistryClient) implements this
/// against the remote service. Depend on the trait (e.g. as
/// `Arc<dyn SchemaRegistry>`) to substitute another implementation in tests.
#[async_trait::async_trait]
pub trait SchemaRegistry: Send + Sync {
    /// Register a schema, creating version 1 if the name is new in the group
    /// and the next version otherwise.
    async fn register_schema(
        &self,
        group: &str,
        name: &str,
        serialization_type: &str,
        content: &str,
    ) -> crate::Result<SchemaProperties>;

    /// Find the identity of an existing schema whose group, name,
    /// serialization type and content all match exactly.
    async fn get_schema_id(
        &self,
        group: &str,
        name: &str,
        serialization_type: &str,
        content: &str,
    ) -> crate::Result<SchemaProperties>;

    /// Fetch schema content and identity by schema ID.
    async fn get_schema(&self, id: &str) -> crate::Result<Schema>;
}
