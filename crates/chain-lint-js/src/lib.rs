//! # chain-lint-js
//!
//! Tree-sitter based JavaScript front end for chain-lint.
//!
//! Parses `.js`, `.mjs`, `.cjs` and `.jsx` sources with
//! `tree-sitter-javascript` and lowers the concrete syntax tree into the
//! [`chain_lint_core::Ast`] arena:
//!
//! - [`JavaScriptParser`] implements [`chain_lint_core::SourceParser`]
//! - parenthesized expressions are transparent, as in ESTree
//! - every non-comment leaf becomes a token, so rules can find `.`/`?.`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod javascript;
mod lower;

pub use javascript::JavaScriptParser;
