//! Heuristic thresholds used by the validators and the diagnostics engine

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Thresholds for best-practice warnings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Policy {
    /// Column count above which a template is flagged as slow to render
    pub max_columns: usize,

    /// Gap size (numeric part, unit ignored) above which `fr` tracks are
    /// considered squeezed
    pub large_gap: f64,

    /// Item count that strongly calls for virtualization
    pub large_item_count: usize,

    /// Item count that mildly suggests virtualization
    pub moderate_item_count: usize,

    /// Recommended z-index band (inclusive)
    pub z_index_recommended: (i64, i64),

    /// Absolute z-index limit; values beyond it are errors
    pub z_index_limit: i64,

    /// Sane band for the virtualization threshold (inclusive)
    pub virtualize_threshold_range: (u32, u32),
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            max_columns: 12,
            large_gap: 40.0,
            large_item_count: 500,
            moderate_item_count: 100,
            z_index_recommended: (-1, 999),
            z_index_limit: 2_147_483_647,
            virtualize_threshold_range: (10, 1000),
        }
    }
}

impl Policy {
    /// Create a policy with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a policy from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a policy from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn with_max_columns(mut self, max: usize) -> Self {
        self.max_columns = max;
        self
    }

    pub fn with_large_gap(mut self, gap: f64) -> Self {
        self.large_gap = gap;
        self
    }

    /// Set both item-count thresholds
    pub fn with_item_counts(mut self, moderate: usize, large: usize) -> Self {
        self.moderate_item_count = moderate;
        self.large_item_count = large;
        self
    }

    pub fn with_z_index_recommended(mut self, min: i64, max: i64) -> Self {
        self.z_index_recommended = (min, max);
        self
    }

    pub fn with_virtualize_threshold_range(mut self, min: u32, max: u32) -> Self {
        self.virtualize_threshold_range = (min, max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = Policy::default();
        assert_eq!(policy.max_columns, 12);
        assert_eq!(policy.large_gap, 40.0);
        assert_eq!(policy.large_item_count, 500);
        assert_eq!(policy.moderate_item_count, 100);
        assert_eq!(policy.z_index_recommended, (-1, 999));
        assert_eq!(policy.virtualize_threshold_range, (10, 1000));
    }

    #[test]
    fn test_builder_pattern() {
        let policy = Policy::new()
            .with_max_columns(24)
            .with_item_counts(50, 200)
            .with_z_index_recommended(0, 100);

        assert_eq!(policy.max_columns, 24);
        assert_eq!(policy.moderate_item_count, 50);
        assert_eq!(policy.large_item_count, 200);
        assert_eq!(policy.z_index_recommended, (0, 100));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let policy = Policy::from_toml_str(
            r#"
max-columns = 16
z-index-recommended = [0, 50]
"#,
        )
        .expect("Should parse policy");
        assert_eq!(policy.max_columns, 16);
        assert_eq!(policy.z_index_recommended, (0, 50));
        assert_eq!(policy.large_item_count, 500);
    }

    #[test]
    fn test_unknown_type_is_error() {
        assert!(Policy::from_toml_str("max-columns = \"many\"").is_err());
    }
}
