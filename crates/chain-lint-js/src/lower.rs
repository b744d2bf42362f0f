//! Lowering of tree-sitter JavaScript trees into the chain-lint arena.

use chain_lint_core::{Ast, AstBuilder, NodeId, NodeKind, Position, Span};
use tree_sitter::Node;

/// Lowers an error-free tree rooted at `root` (a `program` node).
pub(crate) fn lower_tree(root: Node<'_>, src: &str) -> Ast {
    let mut lowering = Lowering {
        src,
        builder: AstBuilder::new(),
    };
    let program = lowering.lower(root, None);
    lowering.collect_tokens(root);
    lowering.builder.finish(program)
}

/// Stack kept free before recursing into a child (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Stack segment allocated when the red zone is hit (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

struct Lowering<'s> {
    src: &'s str,
    builder: AstBuilder,
}

impl Lowering<'_> {
    /// Lowers `node` and its subtree, growing the stack on deep nesting.
    fn lower(&mut self, node: Node<'_>, parent: Option<NodeId>) -> NodeId {
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
            self.lower_node(node, parent)
        })
    }

    fn lower_node(&mut self, node: Node<'_>, parent: Option<NodeId>) -> NodeId {
        match node.kind() {
            "program" => {
                let id = self.open(node, parent);
                let body = self.lower_children(node, id);
                self.builder.close(id, NodeKind::Program { body });
                return id;
            }
            "parenthesized_expression" => {
                if let Some(inner) = first_named(node) {
                    return self.lower(inner, parent);
                }
            }
            "expression_statement" => {
                if let Some(expr) = first_named(node) {
                    let id = self.open(node, parent);
                    let expression = self.lower(expr, Some(id));
                    self.builder
                        .close(id, NodeKind::ExpressionStatement { expression });
                    return id;
                }
            }
            "if_statement" => {
                if let (Some(cond), Some(cons)) = (field(node, "condition"), field(node, "consequence")) {
                    let id = self.open(node, parent);
                    let test = self.lower(cond, Some(id));
                    let consequent = self.lower(cons, Some(id));
                    let alternate = field(node, "alternative")
                        .and_then(first_named)
                        .map(|stmt| self.lower(stmt, Some(id)));
                    self.builder.close(
                        id,
                        NodeKind::If {
                            test,
                            consequent,
                            alternate,
                        },
                    );
                    return id;
                }
            }
            "ternary_expression" => {
                if let (Some(cond), Some(cons), Some(alt)) = (
                    field(node, "condition"),
                    field(node, "consequence"),
                    field(node, "alternative"),
                ) {
                    let id = self.open(node, parent);
                    let test = self.lower(cond, Some(id));
                    let consequent = self.lower(cons, Some(id));
                    let alternate = self.lower(alt, Some(id));
                    self.builder.close(
                        id,
                        NodeKind::Conditional {
                            test,
                            consequent,
                            alternate,
                        },
                    );
                    return id;
                }
            }
            "member_expression" | "subscript_expression" => {
                let computed = node.kind() == "subscript_expression";
                let property_field = if computed { "index" } else { "property" };
                if let (Some(obj), Some(prop)) = (field(node, "object"), field(node, property_field)) {
                    let id = self.open(node, parent);
                    let object = self.lower(obj, Some(id));
                    let property = self.lower(prop, Some(id));
                    self.builder.close(
                        id,
                        NodeKind::Member {
                            object,
                            property,
                            computed,
                            optional: has_optional_chain(node),
                        },
                    );
                    return id;
                }
            }
            "call_expression" => {
                let args = field(node, "arguments").filter(|a| a.kind() == "arguments");
                if let (Some(func), Some(args)) = (field(node, "function"), args) {
                    let id = self.open(node, parent);
                    let callee = self.lower(func, Some(id));
                    let arguments = self.lower_children(args, id);
                    self.builder.close(
                        id,
                        NodeKind::Call {
                            callee,
                            arguments,
                            optional: has_optional_chain(node),
                        },
                    );
                    return id;
                }
            }
            "identifier" | "property_identifier" => {
                let id = self.open(node, parent);
                let name = self.text(node).to_string();
                self.builder.close(id, NodeKind::Identifier { name });
                return id;
            }
            _ => {}
        }

        self.lower_other(node, parent)
    }

    /// Keeps the node under its grammar name, lowering its named children.
    fn lower_other(&mut self, node: Node<'_>, parent: Option<NodeId>) -> NodeId {
        let id = self.open(node, parent);
        let children = self.lower_children(node, id);
        self.builder.close(
            id,
            NodeKind::Other {
                kind: node.kind().to_string(),
                children,
            },
        );
        id
    }

    fn lower_children(&mut self, node: Node<'_>, parent: NodeId) -> Vec<NodeId> {
        named_children(node)
            .into_iter()
            .map(|child| self.lower(child, Some(parent)))
            .collect()
    }

    fn open(&mut self, node: Node<'_>, parent: Option<NodeId>) -> NodeId {
        self.builder.open(span_of(node), parent)
    }

    fn text(&self, node: Node<'_>) -> &str {
        self.src.get(node.byte_range()).unwrap_or("")
    }

    /// Records every non-comment leaf as a token.
    fn collect_tokens(&mut self, root: Node<'_>) {
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            if node.child_count() == 0 && !node.is_extra() {
                let kind = match node.kind() {
                    "optional_chain" => "?.",
                    other => other,
                };
                self.builder.push_token(kind, span_of(node));
            }

            if !node.is_extra() && cursor.goto_first_child() {
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }
}

fn span_of(node: Node<'_>) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span::new(
        node.start_byte(),
        node.end_byte(),
        Position::new(start.row + 1, start.column),
        Position::new(end.row + 1, end.column),
    )
}

fn field<'t>(node: Node<'t>, name: &str) -> Option<Node<'t>> {
    node.child_by_field_name(name)
}

/// Named children, comments excluded.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .collect()
}

fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    named_children(node).into_iter().next()
}

/// True when `?.` appears directly in this node (not in a sub-expression).
fn has_optional_chain(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| matches!(c.kind(), "optional_chain" | "?."));
    found
}
