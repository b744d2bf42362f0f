//! Read-only syntax tree consumed by rules.
//!
//! Language front ends lower their parser's tree into an [`Ast`] arena.
//! Nodes refer to each other by [`NodeId`], and every node except the root
//! records its parent, so rules can walk down through fields and up through
//! parents without owning anything.
//!
//! The node set follows ESTree naming for the shapes rules care about
//! (member access, call, conditional, `if`). Everything else is kept as
//! [`NodeKind::Other`] with its children, so walks never fall off the tree.

/// Index of a node inside its [`Ast`].
///
/// Ids are handed out in pre-order while lowering, so ascending ids are
/// document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A point in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within the line).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Byte range of a node or token, with its line/column endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Position of `start`.
    pub start_pos: Position,
    /// Position of `end`.
    pub end_pos: Position,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize, start_pos: Position, end_pos: Position) -> Self {
        Self {
            start,
            end,
            start_pos,
            end_pos,
        }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for zero-width spans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type tag and type-specific children of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Whole file.
    Program {
        /// Top-level statements.
        body: Vec<NodeId>,
    },
    /// `expr;`
    ExpressionStatement {
        /// The wrapped expression.
        expression: NodeId,
    },
    /// `if (test) consequent else alternate`
    If {
        /// Condition, with grouping parentheses removed.
        test: NodeId,
        /// Statement run when the test holds.
        consequent: NodeId,
        /// Statement after `else`, if any.
        alternate: Option<NodeId>,
    },
    /// `test ? consequent : alternate`
    Conditional {
        /// Condition.
        test: NodeId,
        /// Value when the test holds.
        consequent: NodeId,
        /// Value otherwise.
        alternate: NodeId,
    },
    /// `object.property`, `object?.property` or `object[property]`.
    Member {
        /// Accessed value.
        object: NodeId,
        /// Accessed property.
        property: NodeId,
        /// `object[property]` form.
        computed: bool,
        /// `?.` form.
        optional: bool,
    },
    /// `callee(arguments)`
    Call {
        /// Called expression.
        callee: NodeId,
        /// Arguments in source order.
        arguments: Vec<NodeId>,
        /// `callee?.()` form.
        optional: bool,
    },
    /// Plain identifier, including property names.
    Identifier {
        /// Identifier text.
        name: String,
    },
    /// Any other construct, tagged with the front end's node kind.
    Other {
        /// Front-end node kind (e.g. `"arrow_function"`).
        kind: String,
        /// Named children in source order.
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    /// Short human-readable tag.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Program { .. } => "Program",
            Self::ExpressionStatement { .. } => "ExpressionStatement",
            Self::If { .. } => "IfStatement",
            Self::Conditional { .. } => "ConditionalExpression",
            Self::Member { .. } => "MemberExpression",
            Self::Call { .. } => "CallExpression",
            Self::Identifier { .. } => "Identifier",
            Self::Other { kind, .. } => kind,
        }
    }

    /// Returns true for member-access nodes.
    #[must_use]
    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member { .. })
    }

    /// Returns true for call nodes.
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self, Self::Call { .. })
    }

    /// Returns true for plain identifiers.
    #[must_use]
    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier { .. })
    }
}

/// A syntax tree element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Type tag and children.
    pub kind: NodeKind,
    /// Source range.
    pub span: Span,
    /// Enclosing node; `None` only for the root.
    pub parent: Option<NodeId>,
}

/// A lexical token (a leaf of the parse tree, comments excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Front-end token kind (e.g. `"."`, `"?."`, `"identifier"`).
    pub kind: String,
    /// Source range.
    pub span: Span,
}

/// Arena holding one parsed file.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    tokens: Vec<Token>,
    root: NodeId,
}

impl Ast {
    /// Root node (the program).
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this arena.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the node for `id`, or `None` for a foreign id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Shorthand for `self.node(id).kind`.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Shorthand for `self.node(id).span`.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    /// Enclosing node of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Iterates all nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Iterates member-access nodes in document (pre-)order.
    pub fn members(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, n)| n.kind.is_member())
            .map(|(id, _)| id)
    }

    /// All tokens, sorted by start offset.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// First token starting at or after the end of `id`.
    #[must_use]
    pub fn token_after(&self, id: NodeId) -> Option<&Token> {
        let end = self.span(id).end;
        let idx = self.tokens.partition_point(|t| t.span.start < end);
        self.tokens.get(idx)
    }
}

/// Incremental [`Ast`] construction for language front ends.
///
/// Nodes are opened before their children are lowered, which keeps ids in
/// pre-order and lets children record their parent immediately.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
    tokens: Vec<Token>,
}

impl AstBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a node slot; its kind is filled in by [`AstBuilder::close`].
    pub fn open(&mut self, span: Span, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::Other {
                kind: String::new(),
                children: Vec::new(),
            },
            span,
            parent,
        });
        id
    }

    /// Sets the kind of a previously opened node.
    pub fn close(&mut self, id: NodeId, kind: NodeKind) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.kind = kind;
        }
    }

    /// Records a token.
    pub fn push_token(&mut self, kind: impl Into<String>, span: Span) {
        self.tokens.push(Token {
            kind: kind.into(),
            span,
        });
    }

    /// Finishes the arena with `root` as its root node.
    #[must_use]
    pub fn finish(mut self, root: NodeId) -> Ast {
        self.tokens.sort_by_key(|t| t.span.start);
        Ast {
            nodes: self.nodes,
            tokens: self.tokens,
            root,
        }
    }
}
