//! Central registry for document schemas, global schemas, and mappings
//!
//! The registry is the single owner of the mapping graph. All state is
//! in-memory and lives for the registry's lifetime: schemas and mappings
//! are created, never updated or deleted — correcting a mapping means
//! adding a new one.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use schema_mapper_core::config::MapperConfig;
use schema_mapper_core::error::{Result, SchemaMapperError};
use schema_mapper_core::types::{
    DocumentSchema, DocumentSchemaNode, GlobalSchema, GlobalSchemaNode, MappedValue, MappingEdge,
    SchemaHierarchy, SchemaMapping,
};

use crate::hierarchy;
use crate::transform::apply_transformations;

/// Prefix of generated global schema identifiers
const GLOBAL_ID_PREFIX: &str = "global_";

/// Hex characters of entropy appended to the prefix
const GLOBAL_ID_SUFFIX_LEN: usize = 8;

/// Central store and query surface for the mapping graph
///
/// Mutating operations take `&mut self`; when shared across tasks, embed
/// the registry behind a lock (see `SchemaMapperService`) — the internal
/// maps are not independently thread-safe.
#[derive(Debug, Default)]
pub struct SchemaMapper {
    config: MapperConfig,
    document_schemas: IndexMap<String, DocumentSchema>,
    global_schemas: IndexMap<String, GlobalSchema>,
    mappings: IndexMap<String, Vec<SchemaMapping>>,
}

impl SchemaMapper {
    /// Create a registry with the default (permissive) configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with an explicit configuration
    #[must_use]
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Configuration in effect
    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Register a document schema and return its identifier
    ///
    /// Registration is last-write-wins: an existing schema under the same
    /// identifier is replaced and its mapping list reset.
    pub fn register_document_schema(&mut self, schema: DocumentSchema) -> String {
        let schema_id = schema.schema_id.clone();
        if self.document_schemas.contains_key(&schema_id) {
            debug!(%schema_id, "re-registering document schema, mapping list resets");
        }
        self.mappings.insert(schema_id.clone(), Vec::new());
        self.document_schemas.insert(schema_id.clone(), schema);
        schema_id
    }

    /// Create a global schema and return its generated identifier
    ///
    /// The identifier is `global_` plus eight hex characters of a v4
    /// UUID — enough entropy at this scale that a collision is treated
    /// as fatal rather than retried.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParentSchema` under the strict policy when
    /// `parent_id` is not registered, `CircularInheritance` or
    /// `InheritanceDepthExceeded` when the chain above the parent is
    /// malformed, and `IdCollision` on identifier collision.
    pub fn create_global_schema(
        &mut self,
        name: impl Into<String>,
        properties: IndexMap<String, Value>,
        parent_id: Option<String>,
    ) -> Result<String> {
        if let Some(parent) = &parent_id {
            if self.config.is_strict() && !self.global_schemas.contains_key(parent) {
                return Err(SchemaMapperError::unknown_parent(parent));
            }
            hierarchy::validate_parent_chain(
                &self.global_schemas,
                parent,
                self.config.max_inheritance_depth,
            )?;
        }

        let schema_id = self.generate_global_id()?;
        let schema = GlobalSchema::new(schema_id.clone(), name, properties, parent_id);
        self.global_schemas.insert(schema_id.clone(), schema);
        Ok(schema_id)
    }

    /// Append a mapping to the named document schema's ordered list
    ///
    /// For each targeted global property, the first global schema (in
    /// registration order) declaring that property gets `doc_schema_id`
    /// added to its source set. A property no global schema declares
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Under the strict policy: `DanglingMapping` for an unregistered
    /// document schema, `ConfidenceOutOfRange` for a score outside
    /// [0.0, 1.0], and `AmbiguousProperty` when more than one global
    /// schema declares a targeted property. The permissive default
    /// accepts all three, logging a warning.
    pub fn add_mapping(&mut self, doc_schema_id: &str, mapping: SchemaMapping) -> Result<()> {
        if !self.document_schemas.contains_key(doc_schema_id) {
            if self.config.is_strict() {
                return Err(SchemaMapperError::dangling_mapping(
                    doc_schema_id,
                    mapping.local_property,
                ));
            }
            warn!(
                doc_schema_id,
                local_property = %mapping.local_property,
                "mapping stored for unregistered document schema and will not be reachable by any read path"
            );
        }

        if !(0.0..=1.0).contains(&mapping.confidence) {
            if self.config.is_strict() {
                return Err(SchemaMapperError::confidence_out_of_range(
                    mapping.local_property,
                    mapping.confidence,
                ));
            }
            warn!(
                local_property = %mapping.local_property,
                confidence = mapping.confidence,
                "confidence outside [0.0, 1.0] accepted under the permissive policy"
            );
        }

        // Resolve property owners before mutating anything so a strict
        // rejection leaves the registry untouched.
        let mut owners = Vec::new();
        for global_property in &mapping.global_properties {
            let declaring = self.global_schemas_declaring(global_property);
            if declaring.is_empty() {
                debug!(
                    %global_property,
                    "no global schema declares this property, source tracking unchanged"
                );
                continue;
            }
            if declaring.len() > 1 {
                if self.config.is_strict() {
                    return Err(SchemaMapperError::ambiguous_property(
                        global_property.as_str(),
                        declaring,
                    ));
                }
                warn!(
                    %global_property,
                    declaring = ?declaring,
                    "property declared by multiple global schemas, first match wins"
                );
            }
            owners.push(declaring[0].clone());
        }

        for owner in owners {
            if let Some(schema) = self.global_schemas.get_mut(&owner) {
                schema.source_schemas.insert(doc_schema_id.to_string());
            }
        }

        self.mappings
            .entry(doc_schema_id.to_string())
            .or_default()
            .push(mapping);
        Ok(())
    }

    /// Project a document's values onto the global schema with provenance
    ///
    /// Mappings are evaluated in insertion order; a local property that
    /// is absent or null contributes nothing. When two mappings target
    /// the same global property, the later one overwrites the earlier
    /// (last-write-wins, no merge). An unknown document schema id yields
    /// an empty map — indistinguishable from a document with no values.
    #[must_use]
    pub fn document_values_mapped_to_global(
        &self,
        doc_schema_id: &str,
    ) -> IndexMap<String, MappedValue> {
        let mut result = IndexMap::new();

        let Some(doc_schema) = self.document_schemas.get(doc_schema_id) else {
            return result;
        };
        let Some(mappings) = self.mappings.get(doc_schema_id) else {
            return result;
        };

        for mapping in mappings {
            let Some(local_value) = doc_schema.property(&mapping.local_property) else {
                continue;
            };
            if local_value.is_null() {
                continue;
            }

            let transformed = apply_transformations(local_value, &mapping.transformation_rules);
            for global_property in &mapping.global_properties {
                result.insert(
                    global_property.clone(),
                    MappedValue {
                        value: transformed.clone(),
                        original_value: local_value.clone(),
                        original_property: mapping.local_property.clone(),
                        confidence: mapping.confidence,
                        source_document: doc_schema.document_title.clone(),
                        jurisdiction: doc_schema.jurisdiction.clone(),
                    },
                );
            }
        }

        result
    }

    /// Produce a point-in-time snapshot of the whole mapping graph
    #[must_use]
    pub fn schema_hierarchy(&self) -> SchemaHierarchy {
        let mut hierarchy = SchemaHierarchy::default();

        for (schema_id, schema) in &self.global_schemas {
            hierarchy.global_schemas.insert(
                schema_id.clone(),
                GlobalSchemaNode {
                    name: schema.name.clone(),
                    version: schema.version.clone(),
                    parent: schema.parent_schema_id.clone(),
                    properties: schema.properties.keys().cloned().collect(),
                    source_count: schema.source_schemas.len(),
                    created: schema.created_date,
                },
            );
        }

        for (schema_id, schema) in &self.document_schemas {
            hierarchy.document_schemas.insert(
                schema_id.clone(),
                DocumentSchemaNode {
                    jurisdiction: schema.jurisdiction.clone(),
                    document_title: schema.document_title.clone(),
                    properties: schema.properties.keys().cloned().collect(),
                    extraction_date: schema.extraction_date,
                },
            );
        }

        for (doc_id, mappings) in &self.mappings {
            hierarchy.mappings.insert(
                doc_id.clone(),
                mappings
                    .iter()
                    .map(|mapping| MappingEdge {
                        local_property: mapping.local_property.clone(),
                        global_properties: mapping.global_properties.clone(),
                        confidence: mapping.confidence,
                    })
                    .collect(),
            );
        }

        hierarchy
    }

    /// Effective property set of a global schema with ancestors merged
    ///
    /// # Errors
    ///
    /// Returns `UnknownGlobalSchema` for an unregistered id and the
    /// parent-chain errors of the hierarchy walk.
    pub fn resolve_global_properties(&self, schema_id: &str) -> Result<IndexMap<String, Value>> {
        hierarchy::effective_properties(
            &self.global_schemas,
            schema_id,
            self.config.max_inheritance_depth,
        )
    }

    /// Look up a registered document schema
    #[must_use]
    pub fn document_schema(&self, schema_id: &str) -> Option<&DocumentSchema> {
        self.document_schemas.get(schema_id)
    }

    /// Look up a registered global schema
    #[must_use]
    pub fn global_schema(&self, schema_id: &str) -> Option<&GlobalSchema> {
        self.global_schemas.get(schema_id)
    }

    /// Mappings stored for a document schema id, in insertion order
    #[must_use]
    pub fn mappings_for(&self, doc_schema_id: &str) -> &[SchemaMapping] {
        self.mappings
            .get(doc_schema_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of registered document schemas
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.document_schemas.len()
    }

    /// Number of registered global schemas
    #[must_use]
    pub fn global_count(&self) -> usize {
        self.global_schemas.len()
    }

    fn generate_global_id(&self) -> Result<String> {
        let suffix = Uuid::new_v4().simple().to_string();
        let schema_id = format!("{GLOBAL_ID_PREFIX}{}", &suffix[..GLOBAL_ID_SUFFIX_LEN]);
        if self.global_schemas.contains_key(&schema_id) {
            return Err(SchemaMapperError::IdCollision { id: schema_id });
        }
        Ok(schema_id)
    }

    fn global_schemas_declaring(&self, property: &str) -> Vec<String> {
        self.global_schemas
            .iter()
            .filter(|(_, schema)| schema.declares_property(property))
            .map(|(schema_id, _)| schema_id.clone())
            .collect()
    }
}
