//! Rule registry.

use crate::MethodChaining;
use chain_lint_core::{Config, ConfigError, RuleBox};
use tracing::debug;

/// Returns all available rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(MethodChaining::new())]
}

/// Returns all available rules configured from `config`.
///
/// Disabled rules are still returned; the analyzer skips them.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a rule option is invalid.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let rules: Vec<RuleBox> = vec![Box::new(MethodChaining::from_config(config)?)];
    debug!("Configured {} rules", rules.len());
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules() {
        let rules = all_rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name(), "method-chaining");
        assert_eq!(rules[0].code(), "CL001");
    }

    #[test]
    fn invalid_option_fails_fast() {
        let config =
            Config::parse("[rules.method-chaining]\nignore_chain_with_depth = 42\n").unwrap();
        assert!(matches!(
            rules_from_config(&config),
            Err(ConfigError::InvalidOption { .. })
        ));
    }
}
