//! Name-exclusion filter configuration.
//!
//! The filter file is a small JSON document supplying two regular-expression
//! patterns matched case-insensitively against catalog names. A matching
//! name is excluded from the generated document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::SchemaDocError;

/// Exclusion patterns applied during catalog traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Pattern for table names to skip.
    #[serde(default)]
    pub skip_tables: String,
    /// Pattern for schema names to skip.
    #[serde(default)]
    pub skip_schema: String,
}

impl FilterConfig {
    /// Parses a filter configuration from raw JSON.
    ///
    /// Missing keys default to empty patterns.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data)
            .map_err(|e| SchemaDocError::configuration(format!("cannot parse config: {e}")))
    }
}

/// Loads the filter configuration from `path`.
pub fn load_config(path: &Path) -> Result<FilterConfig> {
    let data = std::fs::read_to_string(path).map_err(|e| {
        SchemaDocError::configuration(format!("cannot read config {}: {e}", path.display()))
    })?;
    FilterConfig::from_json(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_full() {
        let config =
            FilterConfig::from_json(r#"{"skip_tables": "^pg_", "skip_schema": "^internal$"}"#)
                .unwrap();
        assert_eq!(config.skip_tables, "^pg_");
        assert_eq!(config.skip_schema, "^internal$");
    }

    #[test]
    fn test_from_json_missing_keys_default_to_empty() {
        let config = FilterConfig::from_json("{}").unwrap();
        assert_eq!(config.skip_tables, "");
        assert_eq!(config.skip_schema, "");
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let result = FilterConfig::from_json("{not json");
        assert!(matches!(
            result,
            Err(SchemaDocError::Configuration { .. })
        ));
    }

    #[test]
    fn test_load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"skip_tables": "audit", "skip_schema": "tmp"}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.skip_tables, "audit");
        assert_eq!(config.skip_schema, "tmp");
    }

    #[test]
    fn test_load_config_missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("absent.json"));
        assert!(matches!(
            result,
            Err(SchemaDocError::Configuration { .. })
        ));
    }
}
