//! # Schema Mapper Service
//!
//! Registry and transformation engine for local/global schema mapping.
//!
//! Per-document schemas extracted from utility specifications are
//! registered here, curators create canonical global schemas, and
//! confidence-scored mappings link local properties to global ones.
//! Projection then produces global-property values with full provenance
//! (source document, jurisdiction, original value, confidence), and a
//! hierarchy snapshot flattens the whole graph for visualization and
//! spreadsheet sync.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use indexmap::IndexMap;
//! use schema_mapper_core::prelude::*;
//! use schema_mapper_service::SchemaMapper;
//! use serde_json::json;
//!
//! # fn main() -> Result<()> {
//! let mut mapper = SchemaMapper::new();
//!
//! // Register a schema extracted from one jurisdiction's document
//! let mut document = DocumentSchema::new(
//!     "d1",
//!     "CityX",
//!     "Overhead Clearance Standards",
//!     "https://cityx.gov/row/clearances.pdf",
//!     Utc::now(),
//! );
//! document.properties.insert("sep_v".to_string(), json!("91.44 cm"));
//! mapper.register_document_schema(document);
//!
//! // Create the canonical schema and link the local property to it
//! let mut properties = IndexMap::new();
//! properties.insert("vertical_clearance".to_string(), json!({"unit": "in"}));
//! mapper.create_global_schema("Utility Clearances", properties, None)?;
//! mapper.add_mapping(
//!     "d1",
//!     SchemaMapping::new("sep_v", vec!["vertical_clearance".to_string()], 0.9),
//! )?;
//!
//! // Project the document onto the global schema, provenance included
//! let projected = mapper.document_values_mapped_to_global("d1");
//! assert_eq!(projected["vertical_clearance"].jurisdiction, "CityX");
//! # Ok(())
//! # }
//! ```
//!
//! For concurrent hosts, [`SchemaMapperService`] wraps the registry in a
//! single-writer/many-reader lock and implements the async
//! [`SchemaMappingOperations`](schema_mapper_core::traits::SchemaMappingOperations)
//! trait.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)] // Documentation is covered by module-level docs

/// Parent-chain analysis for global schemas
pub mod hierarchy;

/// Central registry for schemas and mappings
pub mod registry;

/// Lock-guarded async service wrapper
pub mod service;

/// Value transformation evaluator
pub mod transform;

// Re-export the service surface
pub use registry::SchemaMapper;
pub use service::{
    SchemaMapperService, create_schema_mapper_service, create_schema_mapper_service_with_config,
};
pub use transform::apply_transformations;
