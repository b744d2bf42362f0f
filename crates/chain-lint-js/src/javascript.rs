//! JavaScript front end using Tree-sitter.

use chain_lint_core::{Ast, ParseError, SourceParser};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use crate::lower::lower_tree;

/// Parses JavaScript (including JSX) into a chain-lint [`Ast`].
pub struct JavaScriptParser {
    language: Language,
}

impl JavaScriptParser {
    /// Creates a new JavaScript parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    /// Locates the first error or missing node below `root`.
    fn first_error(root: Node<'_>) -> ParseError {
        let mut node = root;
        while !node.is_error() && !node.is_missing() {
            let mut cursor = node.walk();
            let next = node.children(&mut cursor).find(|c| c.has_error());
            match next {
                Some(child) => node = child,
                None => break,
            }
        }

        let pos = node.start_position();
        ParseError::Syntax {
            line: pos.row + 1,
            column: pos.column + 1,
        }
    }
}

impl Default for JavaScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for JavaScriptParser {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".js", ".mjs", ".cjs", ".jsx"]
    }

    fn parse(&self, source: &str) -> Result<Ast, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                language: "javascript",
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(Self::first_error(root));
        }

        let ast = lower_tree(root, source);
        debug!(
            "Lowered {} nodes and {} tokens",
            ast.len(),
            ast.tokens().len()
        );
        Ok(ast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_lint_core::{NodeId, NodeKind};

    fn parse(src: &str) -> Ast {
        JavaScriptParser::new().parse(src).expect("valid javascript")
    }

    fn members(ast: &Ast) -> Vec<NodeId> {
        ast.members().collect()
    }

    fn member_parts(ast: &Ast, id: NodeId) -> (NodeId, NodeId, bool, bool) {
        match ast.kind(id) {
            NodeKind::Member {
                object,
                property,
                computed,
                optional,
            } => (*object, *property, *computed, *optional),
            other => panic!("expected member, got {}", other.name()),
        }
    }

    #[test]
    fn handles_js_extensions() {
        let p = JavaScriptParser::new();
        assert_eq!(p.language_id(), "javascript");
        for ext in [".js", ".mjs", ".cjs", ".jsx"] {
            assert!(p.handles_extension(ext), "{ext}");
        }
        assert!(!p.handles_extension(".ts"));
    }

    #[test]
    fn program_and_statement() {
        let ast = parse("a.b();\n");
        let NodeKind::Program { body } = ast.kind(ast.root()) else {
            panic!("root is not a program");
        };
        assert_eq!(body.len(), 1);
        let NodeKind::ExpressionStatement { expression } = ast.kind(body[0]) else {
            panic!("expected expression statement");
        };
        assert!(ast.kind(*expression).is_call());
    }

    #[test]
    fn chain_lowers_to_nested_members_and_calls() {
        let ast = parse("Test.map().filter().value()");
        let ids = members(&ast);
        assert_eq!(ids.len(), 3);

        // Pre-order: the outermost member (`.value`) comes first.
        let (object, property, computed, optional) = member_parts(&ast, ids[0]);
        assert_eq!(
            ast.kind(property),
            &NodeKind::Identifier {
                name: "value".into()
            }
        );
        assert!(ast.kind(object).is_call());
        assert!(!computed);
        assert!(!optional);

        let parent = ast.parent(ids[0]).unwrap();
        assert!(ast.kind(parent).is_call());
    }

    #[test]
    fn positions_are_one_indexed_lines() {
        let ast = parse("Test\n  .map()");
        let (object, ..) = member_parts(&ast, members(&ast)[0]);
        let span = ast.span(object);
        assert_eq!(span.start_pos.line, 1);
        assert_eq!(span.end_pos.line, 1);
        assert_eq!(ast.span(members(&ast)[0]).end_pos.line, 2);
    }

    #[test]
    fn optional_chaining() {
        let ast = parse("a?.b()");
        let (_, _, _, optional) = member_parts(&ast, members(&ast)[0]);
        assert!(optional);
        assert!(ast.tokens().iter().any(|t| t.kind == "?."));
    }

    #[test]
    fn optional_call() {
        let ast = parse("a.b?.()");
        let call = ast
            .iter()
            .find(|(_, n)| n.kind.is_call())
            .map(|(id, _)| id)
            .unwrap();
        assert!(matches!(
            ast.kind(call),
            NodeKind::Call { optional: true, .. }
        ));
    }

    #[test]
    fn subscript_is_computed_member() {
        let ast = parse("a[b]()");
        let (_, property, computed, _) = member_parts(&ast, members(&ast)[0]);
        assert!(computed);
        assert!(ast.kind(property).is_identifier());
    }

    #[test]
    fn private_property_is_not_identifier() {
        let ast = parse("class A { #p() {} m() { this.#p(); } }");
        let (_, property, ..) = member_parts(&ast, members(&ast)[0]);
        assert_eq!(ast.kind(property).name(), "private_property_identifier");
    }

    #[test]
    fn parentheses_are_transparent() {
        let ast = parse("(a.b()).c()");
        let outer = members(&ast)[0];
        let (object, ..) = member_parts(&ast, outer);
        assert!(ast.kind(object).is_call());
        assert_eq!(ast.parent(object), Some(outer));
    }

    #[test]
    fn if_test_is_unwrapped_condition() {
        let ast = parse("if (a.b()) { c(); } else d();");
        let (id, node) = ast
            .iter()
            .find(|(_, n)| matches!(n.kind, NodeKind::If { .. }))
            .unwrap();
        let NodeKind::If {
            test, alternate, ..
        } = &node.kind
        else {
            unreachable!()
        };
        assert!(ast.kind(*test).is_call());
        assert_eq!(ast.parent(*test), Some(id));
        assert!(alternate.is_some());
    }

    #[test]
    fn ternary_is_conditional() {
        let ast = parse("x = a.b() ? 1 : 2;");
        assert!(ast
            .iter()
            .any(|(_, n)| matches!(n.kind, NodeKind::Conditional { .. })));
    }

    #[test]
    fn tagged_template_is_not_a_call() {
        let ast = parse("a.b`x`");
        assert!(!ast.iter().any(|(_, n)| n.kind.is_call()));
        assert_eq!(members(&ast).len(), 1);
    }

    #[test]
    fn comments_are_not_tokens() {
        let ast = parse("a /* note */ .b()");
        let (object, ..) = member_parts(&ast, members(&ast)[0]);
        let token = ast.token_after(object).unwrap();
        assert_eq!(token.kind, ".");
        assert_eq!(token.span.start, 13);
    }

    #[test]
    fn parses_jsx() {
        let ast = parse("const el = <div>{items.map(f).filter(g)}</div>;");
        assert_eq!(members(&ast).len(), 2);
    }

    #[test]
    fn syntax_error_reports_position() {
        let err = JavaScriptParser::new().parse("a.b(\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn empty_source_is_empty_program() {
        let ast = parse("");
        assert!(matches!(ast.kind(ast.root()), NodeKind::Program { body } if body.is_empty()));
    }

    #[test]
    fn lowers_deeply_nested_chain() {
        let src = format!("a{};", ".m()".repeat(5000));
        let ast = parse(&src);
        assert_eq!(members(&ast).len(), 5000);

        let innermost = members(&ast)[4999];
        let (object, ..) = member_parts(&ast, innermost);
        assert!(matches!(ast.kind(object), NodeKind::Identifier { name } if name == "a"));
    }

    #[test]
    fn lowers_deeply_nested_binary_expression() {
        let terms = vec![r#""x""#; 20_000].join(" + ");
        let ast = parse(&format!("var s = {terms};"));
        assert!(ast.len() > 20_000);
        assert!(members(&ast).is_empty());
    }
}
