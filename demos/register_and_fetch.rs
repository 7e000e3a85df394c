//! Register, resolve, and fetch a schema.
//!
//! Usage: `cargo run --example register_and_fetch -- <endpoint> <bearer-token> [group]`

use schema_registry::{ClientOptions, SchemaRegistryClient, StaticTokenCredential};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> schema_registry::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("schema_registry=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let endpoint = args
        .next()
        .unwrap_or_else(|| "https://mynamespace.servicebus.windows.net".to_string());
    let token = args.next().unwrap_or_default();
    let group = args.next().unwrap_or_else(|| "samples".to_string());

    // Create the client
    let client = SchemaRegistryClient::new(
        endpoint,
        Arc::new(StaticTokenCredential::new(token)),
        ClientOptions::new()
            .user_agent_prefix("register-and-fetch-demo")
            .timeout(Duration::from_secs(30)),
    )?;

    let content = json!({
        "type": "record",
        "name": "User",
        "namespace": "com.example.samples",
        "fields": [
            {"name": "name", "type": "string"},
            {"name": "favoriteNumber", "type": "int"}
        ]
    })
    .to_string();

    // 1. Register (creates version 1 or the next version)
    let registered = client
        .register_schema(&group, "User", "avro", &content)
        .await?;
    println!(
        "Registered schema {} (version {})",
        registered.schema_id, registered.version
    );

    // 2. Resolve the ID of the same content
    let found = client.get_schema_id(&group, "User", "avro", &content).await?;
    println!("Resolved id {} at {}", found.schema_id, found.location);

    // 3. Fetch content by ID
    let schema = client.get_schema(&registered.schema_id).await?;
    println!("Fetched content: {}", schema.schema_content);

    // 4. Unknown IDs surface as not-found service errors
    match client.get_schema("ffffffffffffffffffffffffffffffff").await {
        Err(err) if err.is_not_found() => println!("Unknown id: {}", err),
        Err(err) => return Err(err),
        Ok(schema) => println!("Unexpectedly found {}", schema.schema_properties.schema_id),
    }

    Ok(())
}
