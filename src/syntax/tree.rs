//! Parse tree model.
//!
//! A [`ParseNode`] is either a rule node (a grammar construct with owned
//! children) or a leaf (a single token). The two shapes are distinct
//! variants; [`ParseNode::name`] and [`ParseNode::children`] give the
//! uniform view that tree consumers traverse and display.

use std::fmt;

use crate::syntax::token::Token;

/// Grammar construct labels for rule nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Program,
    Preprocessor,
    Declaration,
    FunctionDefinition,
    Params,
    Assignment,
    ExpressionStatement,
    ComparisonOp,
    BinaryOp,
    IfStatement,
    WhileStatement,
    ForStatement,
    ReturnStatement,
    Block,
    FunctionCall,
    Args,
    /// Root label used when parsing is abandoned entirely.
    Error,
}

impl RuleKind {
    /// The display label for this rule.
    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::Program => "program",
            RuleKind::Preprocessor => "preprocessor",
            RuleKind::Declaration => "declaration",
            RuleKind::FunctionDefinition => "function_definition",
            RuleKind::Params => "params",
            RuleKind::Assignment => "assignment",
            RuleKind::ExpressionStatement => "expression_statement",
            RuleKind::ComparisonOp => "comparison_op",
            RuleKind::BinaryOp => "binary_op",
            RuleKind::IfStatement => "if_statement",
            RuleKind::WhileStatement => "while_statement",
            RuleKind::ForStatement => "for_statement",
            RuleKind::ReturnStatement => "return_statement",
            RuleKind::Block => "block",
            RuleKind::FunctionCall => "function_call",
            RuleKind::Args => "args",
            RuleKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One node of the concrete syntax tree.
///
/// Nodes own their children exclusively and are never mutated after the
/// parser assembles them; a finished tree is handed to the consumer whole.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode {
    /// An internal node labeled with a grammar construct.
    Rule {
        kind: RuleKind,
        children: Vec<ParseNode>,
    },
    /// A terminal node carrying the token it was built from.
    Leaf { token: Token },
}

impl ParseNode {
    pub fn rule(kind: RuleKind, children: Vec<ParseNode>) -> Self {
        ParseNode::Rule { kind, children }
    }

    pub fn leaf(token: Token) -> Self {
        ParseNode::Leaf { token }
    }

    /// Uniform label: the rule name for internal nodes, the lexeme for
    /// leaves.
    pub fn name(&self) -> &str {
        match self {
            ParseNode::Rule { kind, .. } => kind.label(),
            ParseNode::Leaf { token } => &token.value,
        }
    }

    /// The rule label, if this is an internal node.
    pub fn kind(&self) -> Option<RuleKind> {
        match self {
            ParseNode::Rule { kind, .. } => Some(*kind),
            ParseNode::Leaf { .. } => None,
        }
    }

    /// The originating token, if this is a leaf.
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseNode::Rule { .. } => None,
            ParseNode::Leaf { token } => Some(token),
        }
    }

    /// Child nodes in source order. Leaves have none.
    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Rule { children, .. } => children,
            ParseNode::Leaf { .. } => &[],
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        writeln!(f, "{}", self.name())?;
        for child in self.children() {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Renders the subtree as an indented outline, one node per line.
impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}
