//! Rule to require line breaks in long method chains.
//!
//! # Rationale
//!
//! Long chains such as `items.filter(f).map(g).sort()` on a single line are
//! hard to scan and produce noisy diffs. Once a chain is deeper than the
//! configured threshold, every call in it should start on its own line:
//!
//! ```text
//! items
//! .filter(f)
//! .map(g)
//! .sort()
//! ```
//!
//! # Exemptions
//!
//! - Chains used directly as an operand of `?:`
//! - Chains used directly as the condition of an `if`
//! - Links that already start on their own line
//!
//! # Configuration
//!
//! - `ignore_chain_with_depth`: Longest chain allowed on one line, 1-10 (default: 2)
//! - `require_allow_reason`: Require `reason="..."` on allow directives (default: false)
//!
//! # Allowing
//!
//! - `// chain-lint: allow(method-chaining)` on the link's line or the line before

mod diagnostic;
mod exemption;
mod linebreak;
mod render;
mod walker;

pub use diagnostic::{
    analyze_link, ChainDiagnostic, ChainOptions, DEFAULT_IGNORE_CHAIN_WITH_DEPTH,
    IGNORE_CHAIN_WITH_DEPTH_RANGE,
};

use chain_lint_core::utils::check_allow_with_reason;
use chain_lint_core::{
    Ast, Config, ConfigError, FileContext, Label, Location, Replacement, Rule, Severity,
    SourceCode, Suggestion, Violation,
};
use tracing::debug;

/// Rule code for method-chaining.
pub const CODE: &str = "CL001";

/// Rule name for method-chaining.
pub const NAME: &str = "method-chaining";

/// Requires a line break before each call of an over-long method chain.
#[derive(Debug, Clone)]
pub struct MethodChaining {
    options: ChainOptions,
    severity: Severity,
    require_allow_reason: bool,
}

impl Default for MethodChaining {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodChaining {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: ChainOptions::default(),
            severity: Severity::Warning,
            require_allow_reason: false,
        }
    }

    /// Creates the rule from the `[rules.method-chaining]` block of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `ignore_chain_with_depth`
    /// is not an integer in 1-10.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let Some(rule_config) = config.rule(NAME) else {
            return Ok(Self::new());
        };

        let depth = rule_config.usize_in_range(
            NAME,
            "ignore_chain_with_depth",
            IGNORE_CHAIN_WITH_DEPTH_RANGE,
            DEFAULT_IGNORE_CHAIN_WITH_DEPTH,
        )?;

        Ok(Self::new()
            .ignore_chain_with_depth(depth)
            .require_allow_reason(rule_config.get_bool("require_allow_reason", false)))
    }

    /// Sets the longest chain allowed on one line.
    #[must_use]
    pub fn ignore_chain_with_depth(mut self, depth: usize) -> Self {
        self.options.ignore_chain_with_depth = depth;
        self
    }

    /// Sets whether allow directives must carry a reason.
    #[must_use]
    pub fn require_allow_reason(mut self, require: bool) -> Self {
        self.require_allow_reason = require;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the effective options.
    #[must_use]
    pub fn options(&self) -> &ChainOptions {
        &self.options
    }

    fn violation(&self, ctx: &FileContext, diag: &ChainDiagnostic) -> Violation {
        let file = ctx.relative_path.clone();
        let fix = Replacement::insert_before(Location::from_span(file.clone(), diag.operator), "\n");

        Violation::new(
            CODE,
            NAME,
            self.severity,
            Location::from_span(file.clone(), diag.span),
            diag.message(),
        )
        .with_message_id(ChainDiagnostic::MESSAGE_ID)
        .with_data("callText", &diag.call_text)
        .with_data("chainings", diag.chainings)
        .with_data("nodeCode", &diag.node_code)
        .with_label(Label::new(
            Location::from_span(file, diag.chain),
            format!("{}-call chain", diag.chainings),
        ))
        .with_suggestion(Suggestion::with_fix(
            format!("Insert a line break before '.{}'", diag.call_text),
            fix,
        ))
    }

    fn missing_reason(&self, ctx: &FileContext, diag: &ChainDiagnostic) -> Violation {
        Violation::new(
            CODE,
            NAME,
            Severity::Warning,
            Location::from_span(ctx.relative_path.clone(), diag.span),
            format!("Allow directive for '{NAME}' is missing required reason"),
        )
        .with_suggestion(Suggestion::new(
            "Add reason=\"...\" to explain why this exception is necessary",
        ))
    }
}

impl Rule for MethodChaining {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a line break before each call of a long method chain"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn requires_allow_reason(&self) -> bool {
        self.require_allow_reason
    }

    fn check(&self, ctx: &FileContext, ast: &Ast) -> Vec<Violation> {
        let source = SourceCode::new(ctx.content, ast);
        let mut violations = Vec::new();

        for link in ast.members() {
            let Some(diag) = analyze_link(&self.options, &source, link) else {
                continue;
            };

            let allow = check_allow_with_reason(ctx.content, diag.operator.start_pos.line, NAME);
            if allow.is_allowed() {
                if self.requires_allow_reason() && allow.reason().is_none() {
                    violations.push(self.missing_reason(ctx, &diag));
                }
                continue;
            }

            violations.push(self.violation(ctx, &diag));
        }

        violations.sort_by_key(|v| v.location.offset);
        debug!(
            "{}: {} violations in {}",
            NAME,
            violations.len(),
            ctx.relative_path.display()
        );
        violations
    }
}
