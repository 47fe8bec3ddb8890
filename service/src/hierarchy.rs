//! Parent-chain analysis for global schemas
//!
//! Global schemas form a tree through `parent_schema_id`. Nothing in the
//! registry's storage model prevents a malformed chain, so the walks here
//! carry an explicit visited set and depth limit.

use indexmap::IndexMap;
use schema_mapper_core::error::{Result, SchemaMapperError};
use schema_mapper_core::types::GlobalSchema;
use serde_json::Value;
use std::collections::HashSet;

/// Walk the parent chain starting at `start`, returning every schema id
/// visited in child-to-root order
///
/// An id missing from the registry ends the walk: the permissive registry
/// never guaranteed a parent exists.
///
/// # Errors
///
/// Returns `CircularInheritance` if the chain revisits a schema and
/// `InheritanceDepthExceeded` if it grows past `max_depth`.
pub fn ancestor_chain(
    schemas: &IndexMap<String, GlobalSchema>,
    start: &str,
    max_depth: usize,
) -> Result<Vec<String>> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(start.to_string());

    while let Some(schema_id) = current {
        if !visited.insert(schema_id.clone()) {
            return Err(SchemaMapperError::circular_inheritance(schema_id));
        }
        if chain.len() >= max_depth {
            return Err(SchemaMapperError::depth_exceeded(schema_id, max_depth));
        }
        current = schemas
            .get(&schema_id)
            .and_then(|schema| schema.parent_schema_id.clone());
        chain.push(schema_id);
    }

    Ok(chain)
}

/// Check that the chain above a prospective parent is acyclic and bounded
///
/// Run at schema-creation time so a malformed chain is caught before it
/// can be extended.
///
/// # Errors
///
/// Same conditions as [`ancestor_chain`].
pub fn validate_parent_chain(
    schemas: &IndexMap<String, GlobalSchema>,
    parent_id: &str,
    max_depth: usize,
) -> Result<()> {
    ancestor_chain(schemas, parent_id, max_depth).map(|_| ())
}

/// Effective property set of a global schema with ancestors merged
///
/// Ancestors are applied root-down, so a child redefining a property
/// overrides its parent's definition.
///
/// # Errors
///
/// Returns `UnknownGlobalSchema` if `schema_id` is not registered, plus
/// the conditions of [`ancestor_chain`].
pub fn effective_properties(
    schemas: &IndexMap<String, GlobalSchema>,
    schema_id: &str,
    max_depth: usize,
) -> Result<IndexMap<String, Value>> {
    if !schemas.contains_key(schema_id) {
        return Err(SchemaMapperError::unknown_global(schema_id));
    }

    let chain = ancestor_chain(schemas, schema_id, max_depth)?;
    let mut merged = IndexMap::new();
    for id in chain.iter().rev() {
        if let Some(schema) = schemas.get(id) {
            for (name, definition) in &schema.properties {
                merged.insert(name.clone(), definition.clone());
            }
        }
    }

    Ok(merged)
}
