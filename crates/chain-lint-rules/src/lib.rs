//! # chain-lint-rules
//!
//! Built-in lint rules for chain-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CL001 | `method-chaining` | Requires a line break before each call of a method chain deeper than `ignore_chain_with_depth` |
//!
//! ## Usage
//!
//! ```ignore
//! use chain_lint_core::Analyzer;
//! use chain_lint_js::JavaScriptParser;
//! use chain_lint_rules::MethodChaining;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(JavaScriptParser::new())
//!     .rule(MethodChaining::new().ignore_chain_with_depth(3))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod method_chaining;
mod presets;

pub use method_chaining::{analyze_link, ChainDiagnostic, ChainOptions, MethodChaining};
pub use presets::{all_rules, rules_from_config};

/// Re-export core types for convenience.
pub use chain_lint_core::{Rule, Severity, Violation};
