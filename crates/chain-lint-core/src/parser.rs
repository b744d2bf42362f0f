//! Language front-end trait.
//!
//! `SourceParser` is the extension point for adding new languages.
//! Implement it to teach chain-lint how to turn source text into the
//! language-agnostic [`Ast`] that rules consume.

use crate::ast::Ast;

/// Errors raised while parsing a source file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser gave up without producing a tree.
    #[error("parser produced no syntax tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line number (1-indexed).
        line: usize,
        /// Column number (1-indexed).
        column: usize,
    },
}

/// Trait for language-specific parsing.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"javascript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles (e.g., `&[".js", ".mjs"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into an [`Ast`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the source is not syntactically valid.
    fn parse(&self, source: &str) -> Result<Ast, ParseError>;

    /// Returns true if this parser claims files with the given extension
    /// (including the leading dot).
    fn handles_extension(&self, ext: &str) -> bool {
        self.extensions().contains(&ext)
    }
}

/// Type alias for boxed `SourceParser` trait objects.
pub type ParserBox = Box<dyn SourceParser>;
