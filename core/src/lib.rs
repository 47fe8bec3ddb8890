//! # Schema Mapper Core
//!
//! Core types and traits for the local/global schema mapping engine.
//!
//! This crate provides the building blocks for maintaining relationships
//! between per-document (local) schemas and canonical (global) schemas:
//! type definitions, the async operations trait, configuration, and error
//! handling. The registry implementation lives in `schema-mapper-service`.
//!
//! ## Design Principles
//!
//! - **Typed values**: raw property values and transformation parameters
//!   are tagged unions, never untyped blobs
//! - **Explicit policy**: every tolerance of the legacy pipeline is a
//!   named error variant or a configured permissive default
//! - **Ownership at construction**: registry state is owned by a single
//!   service instance, never process-wide globals

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)] // Documentation is covered by module-level docs

/// Configuration types for the mapping registry
pub mod config;

/// Core error types for schema mapping operations
pub mod error;

/// Core trait definitions for schema mapping services
pub mod traits;

/// Type definitions for document schemas, global schemas, and mappings
pub mod types;

// Re-export commonly used types
pub use config::{MapperConfig, ReferencePolicy};
pub use error::{Result, SchemaMapperError};
pub use serde_json::Value;
pub use traits::{ExportFormat, SchemaMappingOperations};
pub use types::{
    DocumentSchema, DocumentSchemaNode, GlobalSchema, GlobalSchemaNode, MappedValue, MappingEdge,
    SchemaHierarchy, SchemaMapping, StringNormalization, TransformationRules, UnitConversion,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{MapperConfig, ReferencePolicy};
    pub use crate::error::{Result, SchemaMapperError};
    pub use crate::traits::*;
    pub use crate::types::*;
}
