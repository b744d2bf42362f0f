//! Contexts in which a chain of any depth is accepted.

use chain_lint_core::{Ast, NodeId, NodeKind};

/// Why a chain is exempt from the depth check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exemption {
    /// The chain is an operand of `?:`.
    Ternary,
    /// The chain is the condition of an `if`.
    IfCondition,
}

/// Classifies the chain whose outermost node is `top`.
pub(crate) fn exemption(ast: &Ast, top: NodeId) -> Option<Exemption> {
    let parent = ast.parent(top)?;
    match ast.kind(parent) {
        NodeKind::Conditional { .. } => Some(Exemption::Ternary),
        NodeKind::If { test, .. } if *test == top => Some(Exemption::IfCondition),
        _ => None,
    }
}
