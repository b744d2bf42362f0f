//! Source-text accessor pairing file contents with their [`Ast`].

use crate::ast::{Ast, NodeId, Token};

/// Read-only view over a parsed file.
///
/// Rules use it to recover the exact original text of nodes and tokens
/// instead of re-serializing the tree.
#[derive(Debug, Clone, Copy)]
pub struct SourceCode<'a> {
    text: &'a str,
    ast: &'a Ast,
}

impl<'a> SourceCode<'a> {
    /// Creates a new accessor.
    #[must_use]
    pub fn new(text: &'a str, ast: &'a Ast) -> Self {
        Self { text, ast }
    }

    /// The parsed tree.
    #[must_use]
    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    /// Exact source substring of a node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &'a str {
        let span = self.ast.span(id);
        self.text.get(span.start..span.end).unwrap_or("")
    }

    /// Exact source substring of a token.
    #[must_use]
    pub fn token_text(&self, token: &Token) -> &'a str {
        self.text.get(token.span.start..token.span.end).unwrap_or("")
    }

    /// First token after the end of `id`.
    #[must_use]
    pub fn token_after(&self, id: NodeId) -> Option<&'a Token> {
        self.ast.token_after(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AstBuilder, NodeKind, Position, Span};

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end, Position::new(1, start), Position::new(1, end))
    }

    #[test]
    fn text_and_token_after() {
        // `foo .bar` with a space before the dot
        let src = "foo .bar";
        let mut b = AstBuilder::new();
        let member = b.open(span(0, 8), None);
        let object = b.open(span(0, 3), Some(member));
        b.close(object, NodeKind::Identifier { name: "foo".into() });
        let property = b.open(span(5, 8), Some(member));
        b.close(property, NodeKind::Identifier { name: "bar".into() });
        b.close(
            member,
            NodeKind::Member {
                object,
                property,
                computed: false,
                optional: false,
            },
        );
        b.push_token("identifier", span(0, 3));
        b.push_token(".", span(4, 5));
        b.push_token("property_identifier", span(5, 8));
        let ast = b.finish(member);

        let source = SourceCode::new(src, &ast);
        assert_eq!(source.text(object), "foo");
        assert_eq!(source.text(member), "foo .bar");
        let dot = source.token_after(object).map(|t| source.token_text(t));
        assert_eq!(dot, Some("."));
    }
}
