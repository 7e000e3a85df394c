use schema_registry::{Schema, SchemaDescription, SchemaProperties};
use serde_json::json;

// ---------------------------------------------------------------------------
// SchemaDescription tests
// ---------------------------------------------------------------------------

#[test]
fn test_schema_description_serializes_camel_case() {
    let description = SchemaDescription::new(
        "com.example",
        "User",
        "avro",
        r#"{"type":"record","name":"User","fields":[]}"#,
    );

    let value = serde_json::to_value(&description).unwrap();
    assert_eq!(value["group"], "com.example");
    assert_eq!(value["name"], "User");
    assert_eq!(value["serializationType"], "avro");
    assert!(value["content"].as_str().unwrap().contains("record"));
}

// ---------------------------------------------------------------------------
// SchemaProperties tests
// ---------------------------------------------------------------------------

#[test]
fn test_schema_properties_deserialization_from_json() {
    let json = json!({
        "schemaId": "0b5f32ab1c0b4b5b8f06a2b1e1c1d4f7",
        "serializationType": "Avro",
        "version": 2,
        "location": "https://ns.example.net/$schemagroups/g/schemas/user/versions/2",
        "locationById": "https://ns.example.net/$schemagroups/getSchemaById/0b5f32ab1c0b4b5b8f06a2b1e1c1d4f7"
    });

    let props: SchemaProperties = serde_json::from_value(json).unwrap();
    assert_eq!(props.schema_id, "0b5f32ab1c0b4b5b8f06a2b1e1c1d4f7");
    assert_eq!(props.serialization_type, "Avro");
    assert_eq!(props.version, 2);
    assert!(props.location_by_id.ends_with(&props.schema_id));
    // Only results converted from a live response carry one.
    assert!(props.response().is_none());
}

#[test]
fn test_schema_properties_reject_negative_version() {
    let json = json!({
        "schemaId": "id",
        "serializationType": "Avro",
        "version": -1,
        "location": "l",
        "locationById": "lid"
    });

    assert!(serde_json::from_value::<SchemaProperties>(json).is_err());
}

// ---------------------------------------------------------------------------
// Schema tests
// ---------------------------------------------------------------------------

#[test]
fn test_schema_serialization_shape() {
    let json = json!({
        "schemaContent": "{\"type\":\"string\"}",
        "schemaProperties": {
            "schemaId": "abc",
            "serializationType": "Avro",
            "version": 1,
            "location": "https://ns.example.net/l",
            "locationById": "https://ns.example.net/lid"
        }
    });

    let schema: Schema = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(schema.schema_content, "{\"type\":\"string\"}");
    assert_eq!(schema.schema_properties.version, 1);

    let value = serde_json::to_value(&schema).unwrap();
    assert_eq!(value, json);
}
