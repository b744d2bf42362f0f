//! # chain-lint-core
//!
//! Core framework for linting method chains in tree-sitter based syntax trees.
//!
//! This crate provides the language-agnostic pieces of chain-lint:
//!
//! - [`Ast`] arena that language front ends lower into
//! - [`SourceParser`] trait for language front ends
//! - [`Rule`] trait for per-file rules
//! - [`Analyzer`] for orchestrating lint execution and automatic fixes
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use chain_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(JavaScriptParser::new())
//!     .rule(MethodChaining::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
mod analyzer;
mod config;
mod context;
mod fix;
mod parser;
mod rule;
mod source;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, FixedSource, MAX_FIX_PASSES};
pub use ast::{Ast, AstBuilder, Node, NodeId, NodeKind, Position, Span, Token};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use fix::{Fix, FixSet};
pub use parser::{ParseError, ParserBox, SourceParser};
pub use rule::{Rule, RuleBox};
pub use source::SourceCode;
pub use types::{
    Label, LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;
