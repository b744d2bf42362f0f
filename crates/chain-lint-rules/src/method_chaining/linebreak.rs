//! Line-break detection between adjacent chain links.

use chain_lint_core::{Ast, NodeId};

use super::walker::member_object;

/// Returns true if the member access `link` ends on a later line than its
/// object, i.e. the link already starts on its own line.
pub(crate) fn has_line_break(ast: &Ast, link: NodeId) -> bool {
    member_object(ast, link)
        .is_some_and(|object| ast.span(link).end_pos.line != ast.span(object).end_pos.line)
}
