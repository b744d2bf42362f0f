//! Per-link chain analysis.

use chain_lint_core::{NodeId, NodeKind, SourceCode, Span, Token};

use super::exemption::exemption;
use super::linebreak::has_line_break;
use super::render::call_text;
use super::walker::chain_depth;

/// Default for [`ChainOptions::ignore_chain_with_depth`].
pub const DEFAULT_IGNORE_CHAIN_WITH_DEPTH: usize = 2;

/// Accepted range for `ignore_chain_with_depth` in configuration.
pub const IGNORE_CHAIN_WITH_DEPTH_RANGE: std::ops::RangeInclusive<usize> = 1..=10;

/// Options for the method-chaining check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainOptions {
    /// Chains of this depth or shallower may stay on one line.
    pub ignore_chain_with_depth: usize,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            ignore_chain_with_depth: DEFAULT_IGNORE_CHAIN_WITH_DEPTH,
        }
    }
}

/// A link that should start on its own line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDiagnostic {
    /// The member access being reported.
    pub link: NodeId,
    /// `property` or `property(args)`.
    pub call_text: String,
    /// Depth of the whole chain.
    pub chainings: usize,
    /// Source text of the chain's outermost call.
    pub node_code: String,
    /// Span of the chain's outermost call.
    pub chain: Span,
    /// The `.` or `?.` token; the fix inserts a newline before it.
    pub operator: Span,
    /// From the operator through the end of the property.
    pub span: Span,
}

impl ChainDiagnostic {
    /// Message id shared by all method-chaining diagnostics.
    pub const MESSAGE_ID: &'static str = "expected";

    /// Renders the `expected` message.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "'.{}' is part of a {} methods chain and should therefore be prepended by a newline ('{}').",
            self.call_text, self.chainings, self.node_code
        )
    }
}

/// Decides whether the member access `link` must be moved to a new line.
///
/// Returns `None` for anything that is not a member access, for chains at
/// or below the configured depth, for exempt chains, and for links that
/// already start on their own line.
#[must_use]
pub fn analyze_link(
    options: &ChainOptions,
    source: &SourceCode<'_>,
    link: NodeId,
) -> Option<ChainDiagnostic> {
    let ast = source.ast();
    let NodeKind::Member { property, .. } = ast.kind(link) else {
        return None;
    };

    let (chainings, top) = chain_depth(ast, link);
    if chainings <= options.ignore_chain_with_depth {
        return None;
    }
    if exemption(ast, top).is_some() || has_line_break(ast, link) {
        return None;
    }

    let operator = operator_token(source, link)?.span;
    let property_span = ast.span(*property);
    let span = Span::new(
        operator.start,
        property_span.end,
        operator.start_pos,
        property_span.end_pos,
    );

    Some(ChainDiagnostic {
        link,
        call_text: call_text(source, link),
        chainings,
        node_code: source.text(top).to_string(),
        chain: ast.span(top),
        operator,
        span,
    })
}

/// The `.`/`?.` between a member's object and property.
///
/// Skips closing parentheses of a wrapped object; falls back to the first
/// token after the object.
fn operator_token<'a>(source: &SourceCode<'a>, link: NodeId) -> Option<&'a Token> {
    let ast = source.ast();
    let NodeKind::Member {
        object, property, ..
    } = ast.kind(link)
    else {
        return None;
    };

    let start = ast.span(*object).end;
    let end = ast.span(*property).start;
    let tokens = ast.tokens();
    let first = tokens.partition_point(|t| t.span.start < start);
    tokens[first..]
        .iter()
        .take_while(|t| t.span.start < end)
        .find(|t| matches!(t.kind.as_str(), "." | "?."))
        .or_else(|| source.token_after(*object))
}
