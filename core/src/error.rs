//! Error types for schema mapping operations

use thiserror::Error;

/// Main error type for schema mapping operations
#[derive(Error, Debug)]
pub enum SchemaMapperError {
    /// Global schema lookup failed in a context that requires it to exist
    #[error("Unknown global schema: {id}")]
    UnknownGlobalSchema {
        /// Identifier that failed to resolve
        id: String,
    },

    /// Mapping submitted for a document schema the registry has never seen
    #[error(
        "Mapping for '{local_property}' references unregistered document schema '{doc_schema_id}'"
    )]
    DanglingMapping {
        /// Document schema identifier the mapping was submitted under
        doc_schema_id: String,
        /// Local property the mapping reads from
        local_property: String,
    },

    /// Parent reference to a global schema that does not exist
    #[error("Parent schema not found: {parent_id}")]
    UnknownParentSchema {
        /// The missing parent identifier
        parent_id: String,
    },

    /// Parent chain loops back on itself
    #[error("Circular inheritance detected involving schema '{schema_id}'")]
    CircularInheritance {
        /// Schema at which the cycle was detected
        schema_id: String,
    },

    /// Parent chain is longer than the configured limit
    #[error("Inheritance depth limit of {max_depth} exceeded at schema '{schema_id}'")]
    InheritanceDepthExceeded {
        /// Schema at which the walk was abandoned
        schema_id: String,
        /// Configured depth limit
        max_depth: usize,
    },

    /// More than one global schema declares the same property name
    #[error("Property '{property}' is declared by multiple global schemas: {schema_ids:?}")]
    AmbiguousProperty {
        /// The contested property name
        property: String,
        /// Every global schema declaring it, in registry scan order
        schema_ids: Vec<String>,
    },

    /// Confidence score outside the documented [0.0, 1.0] range
    #[error("Confidence {value} for '{local_property}' is outside [0.0, 1.0]")]
    ConfidenceOutOfRange {
        /// Local property of the offending mapping
        local_property: String,
        /// The rejected score
        value: f64,
    },

    /// Freshly generated schema identifier is already in use
    #[error("Generated schema id collides with an existing id: {id}")]
    IdCollision {
        /// The colliding identifier
        id: String,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for schema mapping operations
pub type Result<T> = std::result::Result<T, SchemaMapperError>;

impl SchemaMapperError {
    /// Create an unknown-global-schema error
    #[must_use]
    pub fn unknown_global(id: impl Into<String>) -> Self {
        Self::UnknownGlobalSchema { id: id.into() }
    }

    /// Create a dangling-mapping error
    #[must_use]
    pub fn dangling_mapping(
        doc_schema_id: impl Into<String>,
        local_property: impl Into<String>,
    ) -> Self {
        Self::DanglingMapping {
            doc_schema_id: doc_schema_id.into(),
            local_property: local_property.into(),
        }
    }

    /// Create an unknown-parent error
    #[must_use]
    pub fn unknown_parent(parent_id: impl Into<String>) -> Self {
        Self::UnknownParentSchema {
            parent_id: parent_id.into(),
        }
    }

    /// Create a circular-inheritance error
    #[must_use]
    pub fn circular_inheritance(schema_id: impl Into<String>) -> Self {
        Self::CircularInheritance {
            schema_id: schema_id.into(),
        }
    }

    /// Create an inheritance-depth error
    #[must_use]
    pub fn depth_exceeded(schema_id: impl Into<String>, max_depth: usize) -> Self {
        Self::InheritanceDepthExceeded {
            schema_id: schema_id.into(),
            max_depth,
        }
    }

    /// Create an ambiguous-property error
    #[must_use]
    pub fn ambiguous_property(property: impl Into<String>, schema_ids: Vec<String>) -> Self {
        Self::AmbiguousProperty {
            property: property.into(),
            schema_ids,
        }
    }

    /// Create a confidence-range error
    #[must_use]
    pub fn confidence_out_of_range(local_property: impl Into<String>, value: f64) -> Self {
        Self::ConfidenceOutOfRange {
            local_property: local_property.into(),
            value,
        }
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }
}

// Implement conversions for the serializers the snapshot export uses
impl From<serde_json::Error> for SchemaMapperError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for SchemaMapperError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SchemaMapperError::dangling_mapping("doc_1", "sep_v");
        assert!(matches!(err, SchemaMapperError::DanglingMapping { .. }));

        let err = SchemaMapperError::depth_exceeded("global_abc", 100);
        match err {
            SchemaMapperError::InheritanceDepthExceeded { max_depth, .. } => {
                assert_eq!(max_depth, 100);
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = SchemaMapperError::confidence_out_of_range("setback_front", 1.5);
        let display = err.to_string();
        assert!(display.contains("setback_front"));
        assert!(display.contains("1.5"));

        let err = SchemaMapperError::ambiguous_property(
            "vertical_clearance",
            vec!["global_1".to_string(), "global_2".to_string()],
        );
        assert!(err.to_string().contains("vertical_clearance"));
    }

    #[test]
    fn test_error_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: SchemaMapperError = json_err.into();
        assert!(matches!(err, SchemaMapperError::SerializationError(_)));
    }
}
