//! Configuration types for chain-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::types::Severity;

/// Top-level configuration for chain-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Severity threshold for a failing run (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration block of a rule, if present.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Returns the rule block for `rule_name`, creating an empty one.
    pub fn rule_mut(&mut self, rule_name: &str) -> &mut RuleConfig {
        self.rules.entry(rule_name.to_string()).or_default()
    }

    /// Effective failure threshold.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string(), "**/dist/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Reads an integer option that must lie in `range`.
    ///
    /// A missing option yields `default`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the value is not an integer
    /// or falls outside `range`.
    pub fn usize_in_range(
        &self,
        rule: &str,
        key: &str,
        range: RangeInclusive<usize>,
        default: usize,
    ) -> Result<usize, ConfigError> {
        let Some(value) = self.options.get(key) else {
            return Ok(default);
        };

        let invalid = |message: String| ConfigError::InvalidOption {
            rule: rule.to_string(),
            option: key.to_string(),
            message,
        };

        let n = value
            .as_integer()
            .ok_or_else(|| invalid(format!("expected an integer, got {}", value.type_str())))?;

        match usize::try_from(n) {
            Ok(count) if range.contains(&count) => Ok(count),
            _ => Err(invalid(format!(
                "{n} is outside {}..={}",
                range.start(),
                range.end()
            ))),
        }
    }

    /// Sets an option value.
    pub fn set_option(&mut self, key: &str, value: impl Into<toml::Value>) {
        self.options.insert(key.to_string(), value.into());
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule option has an unusable value.
    #[error("rules.{rule}.{option}: {message}")]
    InvalidOption {
        /// Rule name.
        rule: String,
        /// Option key.
        option: String,
        /// What is wrong with the value.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert_eq!(config.fail_on(), Severity::Error);
        assert!(config
            .analyzer
            .exclude
            .contains(&"**/node_modules/**".to_string()));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail_on = "warning"

[analyzer]
root = "./src"
exclude = ["**/generated/**"]

[rules.method-chaining]
enabled = true
severity = "error"
ignore_chain_with_depth = 3
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert_eq!(config.fail_on(), Severity::Warning);
        assert!(config.is_rule_enabled("method-chaining"));
        assert_eq!(config.rule_severity("method-chaining"), Some(Severity::Error));

        let rule_config = config.rule("method-chaining").unwrap();
        assert_eq!(rule_config.get_int("ignore_chain_with_depth", 2), 3);
        assert!(!rule_config.get_bool("require_allow_reason", false));
    }

    #[test]
    fn disabled_rule() {
        let config = Config::parse("[rules.method-chaining]\nenabled = false\n").unwrap();
        assert!(!config.is_rule_enabled("method-chaining"));
        assert!(config.is_rule_enabled("some-other-rule"));
    }

    #[test]
    fn usize_in_range_default_and_bounds() {
        let mut rc = RuleConfig::default();
        assert_eq!(rc.usize_in_range("r", "depth", 1..=10, 2).unwrap(), 2);

        rc.set_option("depth", 10);
        assert_eq!(rc.usize_in_range("r", "depth", 1..=10, 2).unwrap(), 10);

        rc.set_option("depth", 11);
        let err = rc.usize_in_range("r", "depth", 1..=10, 2).unwrap_err();
        assert_eq!(err.to_string(), "rules.r.depth: 11 is outside 1..=10");

        rc.set_option("depth", -1);
        let err = rc.usize_in_range("r", "depth", 1..=10, 2).unwrap_err();
        assert_eq!(err.to_string(), "rules.r.depth: -1 is outside 1..=10");
    }

    #[test]
    fn usize_in_range_rejects_non_integer() {
        let mut rc = RuleConfig::default();
        rc.set_option("depth", "two");
        let err = rc.usize_in_range("r", "depth", 1..=10, 2).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { .. }));
        assert!(err.to_string().contains("expected an integer, got string"));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::parse("[rules\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
