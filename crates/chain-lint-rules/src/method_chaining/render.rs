//! Display text for chain links.

use chain_lint_core::{NodeId, NodeKind, SourceCode};

/// Renders a link as `property` or `property(arg1,arg2)`.
///
/// Property and arguments use their exact source text; arguments are
/// joined with `,` and no added whitespace.
pub(crate) fn call_text(source: &SourceCode<'_>, link: NodeId) -> String {
    let ast = source.ast();
    let NodeKind::Member { property, .. } = ast.kind(link) else {
        return source.text(link).to_string();
    };
    let text = source.text(*property);

    let call = ast.parent(link).map(|parent| ast.kind(parent));
    match call {
        Some(NodeKind::Call {
            callee, arguments, ..
        }) if *callee == link => {
            let args: Vec<&str> = arguments.iter().map(|&arg| source.text(arg)).collect();
            format!("{text}({})", args.join(","))
        }
        _ => text.to_string(),
    }
}
