//! Engine configuration
//!
//! The engine itself takes configuration as a plain value; discovering and
//! loading configuration files is the caller's business (the CLI accepts a
//! JSON file via `--config`). The value selects the enabled-rule subset and
//! bounds the convergence loop.

use serde::{Deserialize, Serialize};

/// Default cap on fixing passes per file.
///
/// Well-behaved rulesets converge in two or three passes; the cap only exists
/// to bound misbehaving ones.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Configuration consumed at engine construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixerConfig {
    /// Names of rules to enable; `None` enables every registered rule.
    /// Unknown names are rejected when the engine is built.
    pub rules: Option<Vec<String>>,

    /// Maximum fixing passes per file before giving up on convergence.
    pub max_passes: usize,
}

impl Default for FixerConfig {
    fn default() -> Self {
        FixerConfig {
            rules: None,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl FixerConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_all_rules() {
        let config = FixerConfig::default();
        assert_eq!(config.rules, None);
        assert_eq!(config.max_passes, DEFAULT_MAX_PASSES);
    }

    #[test]
    fn test_from_json_full() {
        let config = FixerConfig::from_json(
            r#"{"rules": ["doc_inline_tag"], "max_passes": 3}"#,
        )
        .expect("valid config");
        assert_eq!(config.rules, Some(vec!["doc_inline_tag".to_string()]));
        assert_eq!(config.max_passes, 3);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = FixerConfig::from_json(r#"{"max_passes": 2}"#).expect("valid config");
        assert_eq!(config.rules, None);
        assert_eq!(config.max_passes, 2);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        assert!(FixerConfig::from_json(r#"{"maxPasses": 2}"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = FixerConfig {
            rules: Some(vec!["trailing_whitespace".to_string()]),
            max_passes: 5,
        };
        let json = serde_json::to_string(&config).expect("serializable");
        assert_eq!(FixerConfig::from_json(&json).expect("parseable"), config);
    }
}
