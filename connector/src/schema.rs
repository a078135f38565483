use serde::Deserialize;
use std::collections::BTreeMap;

/// Schema of a Vantiq data type, as returned by the `types` resource.
///
/// Only the property map is read here; the rest of the type document
/// (indexes, access control, audit fields) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeSchema {
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyDef>,
}

/// One named property of a data type.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    /// Declared Vantiq type tag (e.g. "String", "GeoJSON")
    #[serde(rename = "type")]
    pub declared_type: String,
    /// Platform-managed properties are excluded from user-facing metadata
    #[serde(default)]
    pub system: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_deserialization() {
        let document = json!({
            "name": "SensorReading",
            "naturalKey": ["id"],
            "properties": {
                "id": {"type": "String"},
                "_id": {"type": "String", "system": true},
                "recorded": {"type": "DateTime"}
            }
        });

        let schema: TypeSchema = serde_json::from_value(document).unwrap();
        assert_eq!(schema.properties.len(), 3);
        assert_eq!(schema.properties["id"].declared_type, "String");
        assert!(!schema.properties["id"].system);
        assert!(schema.properties["_id"].system);
        assert_eq!(schema.properties["recorded"].declared_type, "DateTime");
    }

    #[test]
    fn test_schema_without_properties_key() {
        let schema: TypeSchema = serde_json::from_value(json!({"name": "Empty"})).unwrap();
        assert!(schema.properties.is_empty());
    }
}
