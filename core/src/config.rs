//! Configuration types for the schema mapping registry

use serde::{Deserialize, Serialize};

/// Reference-integrity policy for mutating operations
///
/// The legacy extraction pipeline tolerated dangling references and
/// unchecked confidence scores; `Permissive` reproduces that behavior
/// (with warning events), `Strict` rejects it with typed errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Reject dangling references, ambiguous property ownership, and
    /// out-of-range confidence scores
    Strict,

    /// Accept everything, logging a warning where integrity is doubtful
    #[default]
    Permissive,
}

/// Main configuration for the schema mapping registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Reference-integrity policy applied by mutating operations
    pub references: ReferencePolicy,

    /// Upper bound on the parent chain walked during inheritance checks
    pub max_inheritance_depth: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            references: ReferencePolicy::Permissive,
            max_inheritance_depth: 100,
        }
    }
}

impl MapperConfig {
    /// Configuration with every integrity check enforced
    #[must_use]
    pub fn strict() -> Self {
        Self {
            references: ReferencePolicy::Strict,
            ..Self::default()
        }
    }

    /// Whether the strict policy is in effect
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.references == ReferencePolicy::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_permissive() {
        let config = MapperConfig::default();
        assert_eq!(config.references, ReferencePolicy::Permissive);
        assert_eq!(config.max_inheritance_depth, 100);
        assert!(!config.is_strict());
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: MapperConfig =
            serde_json::from_str(r#"{"references": "strict"}"#).expect("config should parse");
        assert!(config.is_strict());
        assert_eq!(config.max_inheritance_depth, 100);
    }
}
