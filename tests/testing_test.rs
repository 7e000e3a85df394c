//! End-to-end behaviour of the client against the in-memory registry.
//!
//! These tests require the `testing` feature to be enabled.

#[cfg(feature = "testing")]
mod tests {
    use schema_registry::testing::FakeRegistry;
    use schema_registry::{
        SchemaProperties, SchemaRegistry, SchemaRegistryClient, SchemaRegistryError, SDK_USER_AGENT,
    };
    use std::sync::Arc;

    const GROUP: &str = "sample_group";
    const NAME: &str = "user_schema";

    fn content() -> String {
        serde_json::json!({
            "type": "record",
            "name": "User",
            "namespace": "com.example.samples",
            "fields": [
                {"name": "name", "type": "string"},
                {"name": "favoriteNumber", "type": "int"}
            ]
        })
        .to_string()
    }

    fn client(registry: &FakeRegistry) -> SchemaRegistryClient {
        SchemaRegistryClient::builder()
            .endpoint("https://registry.test")
            .auth_token("test-token")
            .transport(registry.transport())
            .build()
            .unwrap()
    }

    fn assert_valid_properties(props: &SchemaProperties) {
        assert!(!props.schema_id.is_empty());
        assert!(!props.location.is_empty());
        assert!(!props.location_by_id.is_empty());
        assert!(props.version >= 1);
        assert_eq!(props.serialization_type.to_lowercase(), "avro");
    }

    // ---------------------------------------------------------------------------
    // Register
    // ---------------------------------------------------------------------------

    #[tokio::test]
    async fn test_registers_schema() {
        let registry = FakeRegistry::new();
        let client = client(&registry);

        let registered = client
            .register_schema(GROUP, NAME, "avro", &content())
            .await
            .unwrap();

        assert_eq!(registered.response().unwrap().status, 200);
        assert_valid_properties(&registered);
        assert_eq!(registered.version, 1);
        registry.assert_registered(GROUP, NAME, Some(1));
    }

    #[tokio::test]
    async fn test_changed_content_bumps_version_and_id() {
        let registry = FakeRegistry::new();
        let client = client(&registry);

        let first = client
            .register_schema(GROUP, NAME, "avro", &content())
            .await
            .unwrap();
        let changed = client
            .register_schema(GROUP, NAME, "avro", &content().replacen("name", "fullName", 1))
            .await
            .unwrap();

        assert_valid_properties(&changed);
        assert!(changed.version > first.version);
        assert_ne!(changed.schema_id, first.schema_id);
        assert_ne!(changed.location, first.location);
        assert_ne!(changed.location_by_id, first.location_by_id);
    }

    #[tokio::test]
    async fn test_rejects_registration_with_invalid_args() {
        let registry = FakeRegistry::new();
        let client = client(&registry);
        let content = content();

        for (group, name, schema_type, body) in [
            (GROUP, "", "avro", content.as_str()),
            ("", NAME, "avro", content.as_str()),
            (GROUP, NAME, "avro", ""),
            (GROUP, NAME, "", content.as_str()),
        ] {
            let err = client
                .register_schema(group, name, schema_type, body)
                .await
                .unwrap_err();
            let service = err.as_service_error().unwrap();
            assert_eq!(service.http_status, 400);
            assert!(service.message.contains("null or empty"));
        }

        let err = client
            .register_schema(GROUP, NAME, "not-valid", &content)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not-valid"));
        registry.refute_registered(GROUP, NAME);
    }

    // ---------------------------------------------------------------------------
    // Query by content
    // ---------------------------------------------------------------------------

    #[tokio::test]
    async fn test_gets_schema_id() {
        let registry = FakeRegistry::new();
        let client = client(&registry);

        let registered = client
            .register_schema(GROUP, NAME, "avro", &content())
            .await
            .unwrap();
        let found = client
            .get_schema_id(GROUP, NAME, "avro", &content())
            .await
            .unwrap();

        assert_eq!(found.response().unwrap().status, 200);
        assert_valid_properties(&found);
        assert_eq!(found, registered);
    }

    #[tokio::test]
    async fn test_schema_id_not_found_when_never_registered() {
        let registry = FakeRegistry::new();
        let client = client(&registry);

        let err = client
            .get_schema_id(GROUP, "never-registered", "avro", &content())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("never-registered"));
    }

    #[tokio::test]
    async fn test_schema_id_requires_exact_content() {
        let registry = FakeRegistry::new();
        let client = client(&registry);

        client
            .register_schema(GROUP, NAME, "avro", &content())
            .await
            .unwrap();
        let err = client
            .get_schema_id(GROUP, NAME, "avro", &format!("{} ", content()))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    // ---------------------------------------------------------------------------
    // Fetch by id
    // ---------------------------------------------------------------------------

    #[tokio::test]
    async fn test_gets_schema_by_id() {
        let registry = FakeRegistry::new();
        let client = client(&registry);

        let registered = client
            .register_schema(GROUP, NAME, "avro", &content())
            .await
            .unwrap();
        let found = client.get_schema(&registered.schema_id).await.unwrap();

        assert_eq!(found.response().unwrap().status, 200);
        assert_valid_properties(&found.schema_properties);
        assert_eq!(found.schema_content, content());
        assert_eq!(found.schema_properties, registered);
    }

    #[tokio::test]
    async fn test_get_schema_unknown_id_not_found() {
        let registry = FakeRegistry::new();
        let client = client(&registry);
        let unknown = "ffffffffffffffffffffffffffffffff";

        let err = client.get_schema(unknown).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains(unknown));
    }

    #[tokio::test]
    async fn test_raw_response_is_not_serialized() {
        let registry = FakeRegistry::new();
        let client = client(&registry);

        let registered = client
            .register_schema(GROUP, NAME, "avro", &content())
            .await
            .unwrap();
        let found = client.get_schema(&registered.schema_id).await.unwrap();
        assert!(registered.response().is_some());
        assert!(found.response().is_some());
        assert!(found.schema_properties.response().is_some());

        let props_keys = ["location", "locationById", "schemaId", "serializationType", "version"];
        let props = serde_json::to_value(&registered).unwrap();
        let mut keys: Vec<&str> = props.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, props_keys);

        let schema = serde_json::to_value(&found).unwrap();
        let mut keys: Vec<&str> = schema.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["schemaContent", "schemaProperties"]);
        let nested = schema["schemaProperties"].as_object().unwrap();
        assert!(!nested.contains_key("response"));
        assert_eq!(nested.len(), props_keys.len());
    }

    #[tokio::test]
    async fn test_dot_segments_are_rejected_before_sending() {
        let registry = FakeRegistry::new();
        let client = client(&registry);

        for (group, name) in [(".", NAME), ("..", NAME), (GROUP, "."), (GROUP, "..")] {
            let err = client
                .register_schema(group, name, "avro", &content())
                .await
                .unwrap_err();
            assert!(matches!(err, SchemaRegistryError::InvalidArgument(_)));
            let err = client
                .get_schema_id(group, name, "avro", &content())
                .await
                .unwrap_err();
            assert!(matches!(err, SchemaRegistryError::InvalidArgument(_)));
        }
        let err = client.get_schema("..").await.unwrap_err();
        assert!(err.to_string().contains("dot segment"));

        assert!(registry.requests().is_empty());
        // Dots inside a segment are ordinary characters.
        client
            .register_schema("com.example", "User.v2", "avro", &content())
            .await
            .unwrap();
        registry.assert_registered("com.example", "User.v2", Some(1));
    }

    // ---------------------------------------------------------------------------
    // Request identification
    // ---------------------------------------------------------------------------

    #[tokio::test]
    async fn test_requests_carry_prefix_token_and_api_version() {
        let registry = FakeRegistry::new();
        let client = SchemaRegistryClient::builder()
            .endpoint("https://registry.test/")
            .auth_token("test-token")
            .user_agent_prefix("CustomPrefix")
            .transport(registry.transport())
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "https://registry.test/");

        client
            .register_schema(GROUP, NAME, "avro", &content())
            .await
            .unwrap();

        let requests = registry.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(
            request.header("user-agent"),
            Some(format!("CustomPrefix {}", SDK_USER_AGENT).as_str())
        );
        assert_eq!(request.header("authorization"), Some("Bearer test-token"));
        assert!(request
            .url
            .starts_with("https://registry.test/$schemagroups/"));
        assert!(request.url.ends_with("?api-version=2020-09-01-preview"));
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let registry = FakeRegistry::new().with_group("json-group", "json");
        let client: Arc<dyn SchemaRegistry> = Arc::new(client(&registry));

        let props = client
            .register_schema("json-group", "order", "json", "{\"type\":\"object\"}")
            .await
            .unwrap();
        let schema = client.get_schema(&props.schema_id).await.unwrap();

        assert_eq!(schema.schema_content, "{\"type\":\"object\"}");
        assert_eq!(schema.schema_properties.serialization_type, "json");
        registry.assert_registered("json-group", "order", None);
    }
}
