//! Metadata discovery - queries Vantiq for data type information so the
//! host can offer typed payloads for connector operations.

use anyhow::{Context, Result};
use tracing::warn;
use vantiq::client::resources;
use vantiq::Vantiq;

use crate::metadata::{translate, MetadataModel};
use crate::schema::TypeSchema;

/// Retrieves the names of the data types defined in the Vantiq namespace.
///
/// Each name is a key the host can resolve to metadata via
/// [`type_metadata`].
pub async fn metadata_keys(client: &Vantiq) -> Result<Vec<String>> {
    let rows = client
        .select(resources::TYPES, Some(&["name"]), None)
        .await
        .context("Failed to list Vantiq data types")?;

    Ok(rows
        .iter()
        .filter_map(|row| row.get("name").and_then(|v| v.as_str()))
        .map(str::to_string)
        .collect())
}

/// Fetches the schema of one data type and translates it into the host
/// metadata model.
///
/// Translation warnings are logged here and the affected properties dropped;
/// an unknown property type never fails the lookup.
pub async fn type_metadata(client: &Vantiq, data_type: &str) -> Result<MetadataModel> {
    let body = client
        .select_one(resources::TYPES, data_type)
        .await
        .with_context(|| format!("Failed to fetch Vantiq type '{}'", data_type))?;

    let schema: TypeSchema = serde_json::from_value(body)
        .with_context(|| format!("Failed to parse schema of Vantiq type '{}'", data_type))?;

    let translation = translate(data_type, &schema);
    for warning in &translation.warnings {
        warn!(
            data_type = %warning.data_type,
            property = %warning.property,
            declared_type = %warning.declared_type,
            "Skipping property with unknown type"
        );
    }

    Ok(translation.model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FieldKind;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> Vantiq {
        let mut client = Vantiq::new(server.url(), 1);
        client.set_access_token("test_token");
        client
    }

    #[tokio::test]
    async fn test_metadata_keys() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/resources/types")
            .match_query(Matcher::UrlEncoded("props".into(), r#"["name"]"#.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "SensorReading"}, {"name": "Shipment"}]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let keys = metadata_keys(&client).await.unwrap();
        assert_eq!(keys, vec!["SensorReading", "Shipment"]);
    }

    #[tokio::test]
    async fn test_metadata_keys_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/resources/types")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = metadata_keys(&client).await.unwrap_err();
        assert!(err.to_string().contains("Failed to list Vantiq data types"));
    }

    #[tokio::test]
    async fn test_type_metadata_translates_schema() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/resources/types/SensorReading")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "SensorReading",
                    "properties": {
                        "_id": {"type": "String", "system": true},
                        "id": {"type": "String"},
                        "recorded": {"type": "DateTime"},
                        "reading": {"type": "Real"},
                        "location": {"type": "GeoJSON"},
                        "extra": {"type": "Frobnicate"}
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let model = type_metadata(&client, "SensorReading").await.unwrap();

        assert_eq!(model.name, "SensorReading");
        assert_eq!(model.fields.len(), 4);
        assert_eq!(model.fields["id"], FieldKind::String);
        assert_eq!(model.fields["recorded"], FieldKind::DateTime);
        assert_eq!(model.fields["reading"], FieldKind::Double);
        assert_eq!(model.fields["location"], FieldKind::Object);
        // System and unknown-typed properties are dropped
        assert!(!model.fields.contains_key("_id"));
        assert!(!model.fields.contains_key("extra"));
    }

    #[tokio::test]
    async fn test_type_metadata_unknown_type() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/resources/types/Missing")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"code": "io.vantiq.type.notfound", "message": "not found"}]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = type_metadata(&client, "Missing").await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch Vantiq type 'Missing'"));
    }
}
