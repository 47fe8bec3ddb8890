//! Lock-guarded async wrapper around the registry
//!
//! The registry itself is synchronous and not thread-safe; this wrapper
//! provides the single-writer/many-reader serialization a concurrent
//! host must supply, and implements the operations trait collaborators
//! program against.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use schema_mapper_core::config::MapperConfig;
use schema_mapper_core::error::Result;
use schema_mapper_core::traits::SchemaMappingOperations;
use schema_mapper_core::types::{DocumentSchema, MappedValue, SchemaHierarchy, SchemaMapping};

use crate::registry::SchemaMapper;

/// Shared schema mapping service
///
/// Owns the registry behind a `tokio::sync::RwLock`: mutating operations
/// take the write guard, the two read operations take the read guard.
pub struct SchemaMapperService {
    inner: RwLock<SchemaMapper>,
}

impl SchemaMapperService {
    /// Create a service with the default (permissive) configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Create a service with an explicit configuration
    #[must_use]
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            inner: RwLock::new(SchemaMapper::with_config(config)),
        }
    }

    /// Run a closure against the registry under the read guard
    ///
    /// Escape hatch for read access the trait does not cover, e.g.
    /// `resolve_global_properties` or the lookup accessors.
    pub async fn with_registry<T>(&self, f: impl FnOnce(&SchemaMapper) -> T + Send) -> T {
        f(&*self.inner.read().await)
    }
}

impl Default for SchemaMapperService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaMappingOperations for SchemaMapperService {
    async fn register_document_schema(&self, schema: DocumentSchema) -> Result<String> {
        Ok(self.inner.write().await.register_document_schema(schema))
    }

    async fn create_global_schema(
        &self,
        name: &str,
        properties: IndexMap<String, Value>,
        parent_id: Option<String>,
    ) -> Result<String> {
        self.inner
            .write()
            .await
            .create_global_schema(name, properties, parent_id)
    }

    async fn add_mapping(&self, doc_schema_id: &str, mapping: SchemaMapping) -> Result<()> {
        self.inner.write().await.add_mapping(doc_schema_id, mapping)
    }

    async fn document_values_mapped_to_global(
        &self,
        doc_schema_id: &str,
    ) -> Result<IndexMap<String, MappedValue>> {
        Ok(self
            .inner
            .read()
            .await
            .document_values_mapped_to_global(doc_schema_id))
    }

    async fn schema_hierarchy(&self) -> Result<SchemaHierarchy> {
        Ok(self.inner.read().await.schema_hierarchy())
    }
}

/// Create a schema mapping service with the default configuration
#[must_use]
pub fn create_schema_mapper_service() -> Arc<SchemaMapperService> {
    create_schema_mapper_service_with_config(MapperConfig::default())
}

/// Create a schema mapping service with an explicit configuration
#[must_use]
pub fn create_schema_mapper_service_with_config(config: MapperConfig) -> Arc<SchemaMapperService> {
    info!(policy = ?config.references, "creating schema mapper service");
    Arc::new(SchemaMapperService::with_config(config))
}
