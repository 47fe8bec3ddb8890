//! Core trait definitions for schema mapping services

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::types::{DocumentSchema, MappedValue, SchemaHierarchy, SchemaMapping};

/// Main trait for schema mapping operations
///
/// This trait is dyn-compatible and can be used as
/// `Arc<dyn SchemaMappingOperations>`. It is the surface the ingestion
/// collaborator (database layer) and the presentation collaborator
/// (visualization and spreadsheet sync) program against.
#[async_trait]
pub trait SchemaMappingOperations: Send + Sync {
    /// Register a document schema and return its identifier
    ///
    /// Re-registering an identifier replaces the stored schema and
    /// resets its mapping list.
    ///
    /// # Errors
    ///
    /// Never fails under the default policy; reserved for stricter
    /// implementations.
    async fn register_document_schema(&self, schema: DocumentSchema) -> Result<String>;

    /// Create a global schema and return its generated identifier
    ///
    /// # Errors
    ///
    /// Returns `CircularInheritance` or `InheritanceDepthExceeded` if the
    /// parent chain is malformed, `UnknownParentSchema` under the strict
    /// policy, and `IdCollision` if identifier generation collides.
    async fn create_global_schema(
        &self,
        name: &str,
        properties: IndexMap<String, Value>,
        parent_id: Option<String>,
    ) -> Result<String>;

    /// Append a mapping to the named document schema's ordered list
    ///
    /// # Errors
    ///
    /// Under the strict policy, returns `DanglingMapping` for an
    /// unregistered document schema, `ConfidenceOutOfRange` for a score
    /// outside [0.0, 1.0], and `AmbiguousProperty` when more than one
    /// global schema declares a targeted property.
    async fn add_mapping(&self, doc_schema_id: &str, mapping: SchemaMapping) -> Result<()>;

    /// Project a document's values onto the global schema with provenance
    ///
    /// Returns an empty map for an unknown document schema id.
    ///
    /// # Errors
    ///
    /// Never fails under the default policy; reserved for stricter
    /// implementations.
    async fn document_values_mapped_to_global(
        &self,
        doc_schema_id: &str,
    ) -> Result<IndexMap<String, MappedValue>>;

    /// Produce a point-in-time snapshot of the whole mapping graph
    ///
    /// # Errors
    ///
    /// Never fails under the default policy; reserved for stricter
    /// implementations.
    async fn schema_hierarchy(&self) -> Result<SchemaHierarchy>;
}

/// Export format enumeration for hierarchy snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `JSON` format
    Json,
    /// `YAML` format
    Yaml,
}
