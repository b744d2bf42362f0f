//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // chain-lint: allow(method-chaining) reason="builder DSL reads better inline"
//! ```
//!
//! A directive applies to its own line and to the line after it.

use std::collections::HashSet;

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

/// Checks source code for allowance comments with reason.
///
/// Looks at `line` itself (trailing comment) and the line before it for:
/// ```text
/// // chain-lint: allow(rule1, rule2) reason="explanation"
/// ```
///
/// # Arguments
///
/// * `content` - Source code content
/// * `line` - Line number to check (1-indexed)
/// * `rule_name` - Name of the rule to check for
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from the first `//` comment on a line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let comment_start = line.find("//")?;
    let comment_content = line[comment_start + 2..].trim();

    let directive = comment_content.strip_prefix("chain-lint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("// chain-lint: allow(method-chaining)").unwrap();
        assert!(directive.rules.contains("method-chaining"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_allow_directive_with_reason() {
        let directive =
            parse_allow_directive("// chain-lint: allow(method-chaining) reason=\"query DSL\"")
                .unwrap();
        assert!(directive.rules.contains("method-chaining"));
        assert_eq!(directive.reason.as_deref(), Some("query DSL"));
    }

    #[test]
    fn test_parse_multiple_rules() {
        let directive = parse_allow_directive("// chain-lint: allow(rule1, rule2)").unwrap();
        assert!(directive.rules.contains("rule1"));
        assert!(directive.rules.contains("rule2"));
    }

    #[test]
    fn test_not_a_directive() {
        assert!(parse_allow_directive("const a = 1; // plain comment").is_none());
        assert!(parse_allow_directive("// chain-lint: allow()").is_none());
        assert!(parse_allow_directive("a.b().c()").is_none());
    }

    #[test]
    fn test_directive_on_previous_line() {
        let content = "// chain-lint: allow(method-chaining)\nTest.map().filter().value();\n";
        assert!(check_allow_with_reason(content, 2, "method-chaining").is_allowed());
        assert!(!check_allow_with_reason(content, 2, "other-rule").is_allowed());
    }

    #[test]
    fn test_trailing_directive() {
        let content =
            "q.select().where().limit(); // chain-lint: allow(all) reason=\"generated\"\n";
        let result = check_allow_with_reason(content, 1, "method-chaining");
        assert!(result.is_allowed());
        assert_eq!(result.reason(), Some("generated"));
    }

    #[test]
    fn test_check_allow_denied() {
        let content = "Test.map().filter().value();\n";
        let result = check_allow_with_reason(content, 1, "method-chaining");
        assert_eq!(result, AllowCheck::Denied);
        assert_eq!(result.reason(), None);
    }
}
