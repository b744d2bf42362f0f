//! Rule trait for defining lint rules.

use crate::ast::Ast;
use crate::context::FileContext;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the language-agnostic [`Ast`].
///
/// Rules receive the lowered tree of one file and report violations. They
/// keep no state between files.
///
/// # Example
///
/// ```ignore
/// use chain_lint_core::{Ast, FileContext, Rule, Violation};
///
/// pub struct NoDeepMembers;
///
/// impl Rule for NoDeepMembers {
///     fn name(&self) -> &'static str { "no-deep-members" }
///     fn code(&self) -> &'static str { "CL100" }
///
///     fn check(&self, ctx: &FileContext, ast: &Ast) -> Vec<Violation> {
///         ast.members().filter_map(|id| self.check_member(ctx, ast, id)).collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "method-chaining").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext, ast: &Ast) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
