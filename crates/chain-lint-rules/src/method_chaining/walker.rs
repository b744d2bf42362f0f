//! Chain walking over member/call spines.
//!
//! A chain such as `a.b().c().d()` lowers to nested member and call nodes:
//!
//! ```text
//! Call(Member(Call(Member(Call(Member(a, b)), c)), d))
//! ```
//!
//! Each `Member` that is immediately called is one *method-call link*.
//! Depth counts the calls on one spine: every link, plus the call at the
//! base when the lowest link's object is itself a call (`f().a().b()` has
//! depth 3). Walking from any link downwards (towards `a`) and upwards
//! (towards the outermost call) and adding both counts gives the same depth
//! for every link of the chain.

use chain_lint_core::{Ast, NodeId, NodeKind};

/// Returns the call node if `id` is a member access used directly as a
/// callee with a plain identifier property.
pub(crate) fn method_call(ast: &Ast, id: NodeId) -> Option<NodeId> {
    let NodeKind::Member {
        property, computed, ..
    } = ast.kind(id)
    else {
        return None;
    };

    if *computed || !ast.kind(*property).is_identifier() {
        return None;
    }

    let call = ast.parent(id)?;
    match ast.kind(call) {
        NodeKind::Call { callee, .. } if *callee == id => Some(call),
        _ => None,
    }
}

/// Returns true if `id` is a method-call link.
pub(crate) fn is_method_call(ast: &Ast, id: NodeId) -> bool {
    method_call(ast, id).is_some()
}

/// The `object` of a member access.
pub(crate) fn member_object(ast: &Ast, id: NodeId) -> Option<NodeId> {
    match ast.kind(id) {
        NodeKind::Member { object, .. } => Some(*object),
        _ => None,
    }
}

/// Counts method-call links from `id` upwards, `id` included.
///
/// Returns the count and the chain's top node: the outermost call reached,
/// or `id` itself when it is not a method-call link.
pub(crate) fn methods_after(ast: &Ast, id: NodeId) -> (usize, NodeId) {
    let mut count = 0;
    let mut top = id;
    let mut current = id;

    while let Some(call) = method_call(ast, current) {
        count += 1;
        top = call;

        match ast.parent(call) {
            Some(next) if member_object(ast, next) == Some(call) => current = next,
            _ => break,
        }
    }

    (count, top)
}

/// Counts method-call links from `id` downwards whose object is itself a
/// call, `id` included.
pub(crate) fn methods_before(ast: &Ast, id: NodeId) -> usize {
    let mut count = 0;
    let mut current = id;

    while is_method_call(ast, current) {
        let Some(object) = member_object(ast, current) else {
            break;
        };
        let NodeKind::Call { callee, .. } = ast.kind(object) else {
            break;
        };
        count += 1;
        current = *callee;
    }

    count
}

/// Depth of the chain `id` belongs to, and the chain's top node.
pub(crate) fn chain_depth(ast: &Ast, id: NodeId) -> (usize, NodeId) {
    let (after, top) = methods_after(ast, id);
    (methods_before(ast, id) + after, top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_lint_core::SourceParser;
    use chain_lint_js::JavaScriptParser;

    fn parse(src: &str) -> Ast {
        JavaScriptParser::new().parse(src).unwrap()
    }

    /// Member nodes in source order of their operator.
    fn links(ast: &Ast) -> Vec<NodeId> {
        let mut ids: Vec<_> = ast.members().collect();
        ids.sort_by_key(|&id| member_object(ast, id).map(|o| ast.span(o).end));
        ids
    }

    #[test]
    fn every_link_sees_the_same_depth() {
        let ast = parse("Test.map().filter().value()");
        let depths: Vec<_> = links(&ast).iter().map(|&id| chain_depth(&ast, id).0).collect();
        assert_eq!(depths, vec![3, 3, 3]);
    }

    #[test]
    fn before_and_after_split() {
        let ast = parse("Test.map().filter().value()");
        let ids = links(&ast);
        let split: Vec<_> = ids
            .iter()
            .map(|&id| (methods_before(&ast, id), methods_after(&ast, id).0))
            .collect();
        assert_eq!(split, vec![(0, 3), (1, 2), (2, 1)]);
    }

    #[test]
    fn top_is_outermost_call() {
        let src = "x = Test.map().filter().value();";
        let ast = parse(src);
        for id in links(&ast) {
            let (_, top) = chain_depth(&ast, id);
            let span = ast.span(top);
            assert_eq!(&src[span.start..span.end], "Test.map().filter().value()");
        }
    }

    #[test]
    fn bare_property_is_the_base() {
        let ast = parse("Test.map.filter().value().log()");
        let depths: Vec<_> = links(&ast).iter().map(|&id| chain_depth(&ast, id).0).collect();
        assert_eq!(depths, vec![0, 3, 3, 3]);
    }

    #[test]
    fn single_property_access_has_no_depth() {
        let ast = parse("a.b");
        let id = links(&ast)[0];
        assert_eq!(chain_depth(&ast, id), (0, id));
    }

    #[test]
    fn trailing_property_is_not_a_link() {
        let ast = parse("a.b().c().length");
        let depths: Vec<_> = links(&ast).iter().map(|&id| chain_depth(&ast, id).0).collect();
        assert_eq!(depths, vec![2, 2, 0]);
    }

    #[test]
    fn computed_member_is_never_a_link() {
        // The call on `a[0]` still counts towards the depth of `.b()`/`.c()`.
        let ast = parse("a[0]().b().c()");
        let depths: Vec<_> = links(&ast).iter().map(|&id| chain_depth(&ast, id).0).collect();
        assert_eq!(depths, vec![0, 3, 3]);
    }

    #[test]
    fn argument_position_is_a_boundary() {
        let ast = parse("f(a.b().c()).d()");
        let depths: Vec<_> = links(&ast).iter().map(|&id| chain_depth(&ast, id).0).collect();
        assert_eq!(depths, vec![2, 2, 2]);
    }
}
