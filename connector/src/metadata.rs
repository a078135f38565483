use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::schema::TypeSchema;

/// Field kinds understood by the host metadata model.
///
/// `Object` marks an opaque nested object; its fields are not expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    DateTime,
    Boolean,
    Double,
    Long,
    Decimal,
    String,
    Object,
}

impl FieldKind {
    /// Maps a declared Vantiq property type to the host field kind.
    ///
    /// Returns `None` for tags this connector does not recognize.
    pub fn from_declared_type(declared_type: &str) -> Option<FieldKind> {
        match declared_type {
            "DateTime" => Some(FieldKind::DateTime),
            "Boolean" => Some(FieldKind::Boolean),
            "Real" => Some(FieldKind::Double),
            "Integer" => Some(FieldKind::Long),
            "Decimal" => Some(FieldKind::Decimal),
            "String" | "Currency" => Some(FieldKind::String),
            "Object" | "GeoJSON" => Some(FieldKind::Object),
            _ => None,
        }
    }
}

/// Host-side metadata for one data type: the displayable/bindable fields,
/// keyed by property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataModel {
    pub name: String,
    pub fields: BTreeMap<String, FieldKind>,
}

/// A property skipped because its declared type is not in the mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationWarning {
    pub data_type: String,
    pub property: String,
    pub declared_type: String,
}

impl fmt::Display for TranslationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown property type '{}' for '{}' in {}",
            self.declared_type, self.property, self.data_type
        )
    }
}

/// Result of translating one type schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub model: MetadataModel,
    pub warnings: Vec<TranslationWarning>,
}

/// Translates a Vantiq type schema into the host metadata model.
///
/// System properties are dropped silently. Properties with an unrecognized
/// declared type are dropped and reported as warnings instead of failing the
/// translation; a schema may carry platform types newer than this connector,
/// and the remaining fields are still usable.
pub fn translate(name: &str, schema: &TypeSchema) -> Translation {
    let mut fields = BTreeMap::new();
    let mut warnings = Vec::new();

    for (property, def) in &schema.properties {
        // Skip system fields
        if def.system {
            continue;
        }

        match FieldKind::from_declared_type(&def.declared_type) {
            Some(kind) => {
                fields.insert(property.clone(), kind);
            }
            None => warnings.push(TranslationWarning {
                data_type: name.to_string(),
                property: property.clone(),
                declared_type: def.declared_type.clone(),
            }),
        }
    }

    Translation {
        model: MetadataModel {
            name: name.to_string(),
            fields,
        },
        warnings,
    }
}
