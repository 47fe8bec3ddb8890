//! Core type definitions for document schemas, global schemas, and mappings

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::traits::ExportFormat;

/// Schema extracted from a single source document
///
/// Registered once under its identifier and owned by the registry.
/// Re-registering the same identifier replaces the stored schema and
/// resets its mapping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSchema {
    /// Unique identifier for the schema
    pub schema_id: String,

    /// Jurisdiction the document applies to
    pub jurisdiction: String,

    /// Title of the source document
    pub document_title: String,

    /// Where the document came from (URL, file path, citation)
    pub document_source: String,

    /// When the properties were extracted
    pub extraction_date: DateTime<Utc>,

    /// Raw properties extracted from the document
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Value>,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, Value>,
}

impl DocumentSchema {
    /// Create a document schema with empty properties and metadata
    #[must_use]
    pub fn new(
        schema_id: impl Into<String>,
        jurisdiction: impl Into<String>,
        document_title: impl Into<String>,
        document_source: impl Into<String>,
        extraction_date: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_id: schema_id.into(),
            jurisdiction: jurisdiction.into(),
            document_title: document_title.into(),
            document_source: document_source.into(),
            extraction_date,
            properties: IndexMap::new(),
            metadata: IndexMap::new(),
        }
    }

    /// Look up a raw extracted property by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Refined global schema consolidating multiple local schemas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalSchema {
    /// Unique identifier for the schema
    pub schema_id: String,

    /// Human-readable name
    pub name: String,

    /// Semantic version string
    pub version: String,

    /// Canonical property definitions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Value>,

    /// Parent schema for inheritance, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_schema_id: Option<String>,

    /// Document schema ids that have contributed at least one mapping
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub source_schemas: IndexSet<String>,

    /// When the schema was created
    pub created_date: DateTime<Utc>,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, Value>,
}

impl GlobalSchema {
    /// Create a version-1.0.0 global schema with no contributing sources yet
    #[must_use]
    pub fn new(
        schema_id: impl Into<String>,
        name: impl Into<String>,
        properties: IndexMap<String, Value>,
        parent_schema_id: Option<String>,
    ) -> Self {
        Self {
            schema_id: schema_id.into(),
            name: name.into(),
            version: "1.0.0".to_string(),
            properties,
            parent_schema_id,
            source_schemas: IndexSet::new(),
            created_date: Utc::now(),
            metadata: IndexMap::new(),
        }
    }

    /// Whether this schema declares the named canonical property
    #[must_use]
    pub fn declares_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }
}

/// Directed mapping from one local property to one or more global properties
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaMapping {
    /// Property name in the document schema
    pub local_property: String,

    /// Target property names in the global schema
    pub global_properties: Vec<String>,

    /// Mapping confidence, documented range [0.0, 1.0]
    pub confidence: f64,

    /// Value transformations applied during projection
    #[serde(default, skip_serializing_if = "TransformationRules::is_empty")]
    pub transformation_rules: TransformationRules,

    /// Free-form curator notes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl SchemaMapping {
    /// Create a mapping with no transformation rules or notes
    #[must_use]
    pub fn new(
        local_property: impl Into<String>,
        global_properties: Vec<String>,
        confidence: f64,
    ) -> Self {
        Self {
            local_property: local_property.into(),
            global_properties,
            confidence,
            transformation_rules: TransformationRules::default(),
            notes: String::new(),
        }
    }

    /// Attach transformation rules
    #[must_use]
    pub fn with_rules(mut self, rules: TransformationRules) -> Self {
        self.transformation_rules = rules;
        self
    }

    /// Attach curator notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Transformation rule set attached to a mapping
///
/// Each rule only acts on the value type it matches; everything else
/// passes through untouched. Unknown rule keys in serialized form are
/// ignored during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransformationRules {
    /// Linear unit conversion for numeric values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_conversion: Option<UnitConversion>,

    /// Case and whitespace normalization for string values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_normalization: Option<StringNormalization>,
}

impl TransformationRules {
    /// Whether no rules are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unit_conversion.is_none() && self.string_normalization.is_none()
    }
}

/// Linear unit conversion: `value * factor + offset`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitConversion {
    /// Multiplicative factor
    #[serde(default = "UnitConversion::default_factor")]
    pub factor: f64,

    /// Additive offset
    #[serde(default)]
    pub offset: f64,
}

impl UnitConversion {
    fn default_factor() -> f64 {
        1.0
    }

    /// Conversion by factor alone
    #[must_use]
    pub fn factor(factor: f64) -> Self {
        Self {
            factor,
            offset: 0.0,
        }
    }
}

impl Default for UnitConversion {
    fn default() -> Self {
        Self {
            factor: Self::default_factor(),
            offset: 0.0,
        }
    }
}

/// String normalization flags; lowercase is applied before strip
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StringNormalization {
    /// Lower-case the value
    #[serde(default)]
    pub lowercase: bool,

    /// Trim leading and trailing whitespace
    #[serde(default)]
    pub strip: bool,
}

/// One projected global-property value with its provenance
///
/// Field names are part of the export contract consumed by the
/// presentation and spreadsheet-sync collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MappedValue {
    /// Value after transformation rules were applied
    pub value: Value,

    /// Raw value as extracted from the document
    pub original_value: Value,

    /// Local property the value was read from
    pub original_property: String,

    /// Confidence of the mapping that produced this entry
    pub confidence: f64,

    /// Title of the source document
    pub source_document: String,

    /// Jurisdiction of the source document
    pub jurisdiction: String,
}

/// Point-in-time snapshot of the whole mapping graph
///
/// Pure computed view for visualization and export; not live-updating.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaHierarchy {
    /// Every registered global schema, reduced to its node summary
    pub global_schemas: IndexMap<String, GlobalSchemaNode>,

    /// Every registered document schema, reduced to its node summary
    pub document_schemas: IndexMap<String, DocumentSchemaNode>,

    /// Per document schema id, its mappings in insertion order
    pub mappings: IndexMap<String, Vec<MappingEdge>>,
}

impl SchemaHierarchy {
    /// Render the snapshot in the requested export format
    ///
    /// # Errors
    ///
    /// Returns `SchemaMapperError::SerializationError` if the snapshot
    /// cannot be rendered.
    pub fn serialize_to(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ExportFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }
}

/// Global schema summary within a hierarchy snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalSchemaNode {
    /// Human-readable name
    pub name: String,

    /// Semantic version string
    pub version: String,

    /// Parent schema id, if any
    pub parent: Option<String>,

    /// Declared canonical property names
    pub properties: Vec<String>,

    /// Number of document schemas that contributed a mapping
    pub source_count: usize,

    /// Creation time
    pub created: DateTime<Utc>,
}

/// Document schema summary within a hierarchy snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSchemaNode {
    /// Jurisdiction the document applies to
    pub jurisdiction: String,

    /// Title of the source document
    pub document_title: String,

    /// Extracted property names
    pub properties: Vec<String>,

    /// When the properties were extracted
    pub extraction_date: DateTime<Utc>,
}

/// Mapping reduced to its graph edge within a hierarchy snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MappingEdge {
    /// Property name in the document schema
    pub local_property: String,

    /// Target property names in the global schema
    pub global_properties: Vec<String>,

    /// Mapping confidence
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_transformation_rules_defaults() {
        let rules: TransformationRules =
            serde_json::from_value(json!({"unit_conversion": {"offset": 1.0}}))
                .expect("rules should deserialize");
        let conversion = rules.unit_conversion.expect("conversion should be set");
        assert_eq!(conversion.factor, 1.0);
        assert_eq!(conversion.offset, 1.0);
        assert!(rules.string_normalization.is_none());
    }

    #[test]
    fn test_transformation_rules_ignore_unknown_keys() {
        let rules: TransformationRules = serde_json::from_value(json!({
            "unit_conversion": {"factor": 2.54},
            "rounding": {"digits": 2}
        }))
        .expect("unknown rule keys should be ignored");
        assert_eq!(
            rules.unit_conversion,
            Some(UnitConversion::factor(2.54))
        );
    }

    #[test]
    fn test_mapped_value_field_names() {
        let mapped = MappedValue {
            value: json!("91.44 cm"),
            original_value: json!("91.44 cm"),
            original_property: "sep_v".to_string(),
            confidence: 0.9,
            source_document: "Overhead Clearances".to_string(),
            jurisdiction: "CityX".to_string(),
        };

        let serialized = serde_json::to_value(&mapped).expect("should serialize");
        let object = serialized.as_object().expect("should be an object");
        assert_eq!(object.len(), 6);
        for field in [
            "value",
            "original_value",
            "original_property",
            "confidence",
            "source_document",
            "jurisdiction",
        ] {
            assert!(object.contains_key(field), "missing field '{field}'");
        }
    }

    #[test]
    fn test_document_schema_skips_empty_collections() {
        let schema = DocumentSchema::new(
            "doc_1",
            "CityX",
            "Pole Attachment Standards",
            "https://example.gov/standards.pdf",
            Utc::now(),
        );
        let serialized = serde_json::to_value(&schema).expect("should serialize");
        let object = serialized.as_object().expect("should be an object");
        assert!(!object.contains_key("properties"));
        assert!(!object.contains_key("metadata"));
    }

    #[test]
    fn test_hierarchy_serialize_to_formats() {
        let mut hierarchy = SchemaHierarchy::default();
        hierarchy.mappings.insert(
            "doc_1".to_string(),
            vec![MappingEdge {
                local_property: "sep_v".to_string(),
                global_properties: vec!["vertical_clearance".to_string()],
                confidence: 0.9,
            }],
        );

        let json = hierarchy
            .serialize_to(ExportFormat::Json)
            .expect("json export should succeed");
        assert!(json.contains("vertical_clearance"));

        let yaml = hierarchy
            .serialize_to(ExportFormat::Yaml)
            .expect("yaml export should succeed");
        assert!(yaml.contains("sep_v"));
    }
}
