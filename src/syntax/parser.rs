//! Recursive descent parser for the C subset
//!
//! Consumes the token stream produced by the lexer (WHITESPACE filtered out;
//! COMMENT and PREPROCESSOR tokens stay in the stream) and builds a concrete
//! parse tree plus an ordered diagnostics list. Recovery is strictly local:
//! a missing terminal is reported and one token is skipped; the parser never
//! re-synchronizes to a statement boundary and never aborts.
//!
//! # Grammar
//!
//! ```text
//! program              ::= statement*
//! statement            ::= preprocessor | declaration | function_definition
//!                        | if_stmt | while_stmt | for_stmt | return_stmt
//!                        | assignment | expression_statement | block
//!                        | <skip one token on no match>
//! declaration          ::= type IDENTIFIER ('=' expression)? ';'
//! function_definition  ::= type IDENTIFIER '(' param* ')' block
//! assignment           ::= IDENTIFIER '=' expression ';'
//! expression_statement ::= expression ';'
//! if_stmt              ::= 'if' '(' expression ')' statement ('else' statement)?
//! while_stmt           ::= 'while' '(' expression ')' statement
//! for_stmt             ::= 'for' '(' statement expression ';' expression ')' statement
//! return_stmt          ::= 'return' expression? ';'
//! block                ::= '{' statement* '}'
//! expression           ::= simple_expression (comparison_op simple_expression)*
//! simple_expression    ::= term (('+' | '-') term)*
//! term                 ::= factor (('*' | '/') factor)*
//! factor               ::= NUMBER | STRING | CHAR | function_call
//!                        | IDENTIFIER | '(' expression ')'
//! function_call        ::= IDENTIFIER '(' (expression (',' expression)*)? ')'
//! ```
//!
//! Disambiguation uses one to two tokens of lookahead: `type IDENTIFIER (`
//! opens a function definition, `IDENTIFIER =` opens an assignment, and
//! `IDENTIFIER (` in factor position opens a function call.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::syntax::diagnostic::{Diagnostic, DiagnosticKind};
use crate::syntax::token::{Token, TokenType};
use crate::syntax::tree::{ParseNode, RuleKind};

/// Type keywords that can open a declaration or function definition.
const TYPE_KEYWORDS: [&str; 5] = ["int", "char", "float", "double", "void"];

/// Operators recognized at the comparison precedence level.
const COMPARISON_OPS: [&str; 6] = [">", "<", ">=", "<=", "==", "!="];

/// Nesting ceiling for statements and expressions combined. Exceeding it
/// abandons the parse through the containment path in [`TopDownParser::parse`].
const MAX_RECURSION_DEPTH: usize = 200;

/// Recursive descent parser over one token sequence.
///
/// A parser is built from one lexer output, consumed once by [`parse`]
/// (it takes `self` by value), and never reused.
///
/// [`parse`]: TopDownParser::parse
pub struct TopDownParser {
    tokens: Vec<Token>,
    position: usize,
    diagnostics: Vec<Diagnostic>,
    depth: usize,
}

impl TopDownParser {
    /// Create a parser over the given tokens, dropping WHITESPACE. Every
    /// other category, comments and directives included, stays in the
    /// stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| t.token_type != TokenType::Whitespace)
            .collect();
        Self {
            tokens,
            position: 0,
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    /// Parse the whole stream into a tree rooted at `program`, plus the
    /// diagnostics collected along the way.
    ///
    /// This call never fails and never panics outward. If parsing is
    /// abandoned internally (the nesting guard fired, or something
    /// unforeseen went wrong), the result degrades to a single `ERROR`
    /// root and one diagnostic describing the failure.
    pub fn parse(mut self) -> (ParseNode, Vec<Diagnostic>) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.parse_program()));
        match outcome {
            Ok(root) => (root, self.diagnostics),
            Err(payload) => {
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ParseFailure(panic_note(payload.as_ref())),
                    None,
                ));
                (ParseNode::rule(RuleKind::Error, Vec::new()), self.diagnostics)
            }
        }
    }

    fn parse_program(&mut self) -> ParseNode {
        let mut children = Vec::new();
        while matches!(self.current(), Some(t) if t.token_type != TokenType::Eof) {
            if let Some(statement) = self.parse_statement() {
                children.push(statement);
            }
        }
        ParseNode::rule(RuleKind::Program, children)
    }

    /// Parse one statement, or consume one token silently when no
    /// production matches.
    fn parse_statement(&mut self) -> Option<ParseNode> {
        self.enter();
        let statement = self.dispatch_statement();
        self.depth -= 1;
        statement
    }

    fn dispatch_statement(&mut self) -> Option<ParseNode> {
        let token = self.current()?.clone();
        match token.token_type {
            TokenType::Preprocessor => Some(self.parse_preprocessor()),
            TokenType::Keyword if self.is_type_keyword() => {
                let ident_next =
                    matches!(self.peek_ahead(1), Some(t) if t.token_type == TokenType::Identifier);
                let paren_after = matches!(
                    self.peek_ahead(2),
                    Some(t) if t.token_type == TokenType::Separator && t.value == "("
                );
                if ident_next && paren_after {
                    Some(self.parse_function_definition())
                } else {
                    Some(self.parse_declaration())
                }
            }
            TokenType::Keyword if token.value == "if" => Some(self.parse_if_statement()),
            TokenType::Keyword if token.value == "while" => Some(self.parse_while_statement()),
            TokenType::Keyword if token.value == "for" => Some(self.parse_for_statement()),
            TokenType::Keyword if token.value == "return" => Some(self.parse_return_statement()),
            TokenType::Identifier => {
                let assign_next = matches!(
                    self.peek_ahead(1),
                    Some(t) if t.token_type == TokenType::Operator && t.value == "="
                );
                if assign_next {
                    Some(self.parse_assignment())
                } else {
                    Some(self.parse_expression_statement())
                }
            }
            TokenType::Separator if token.value == "{" => Some(self.parse_block()),
            _ => {
                // No production matches: discard exactly one token.
                self.advance();
                None
            }
        }
    }

    /// Parse a preprocessor directive as a single-leaf node.
    fn parse_preprocessor(&mut self) -> ParseNode {
        let mut children = Vec::new();
        if matches!(self.current(), Some(t) if t.token_type == TokenType::Preprocessor) {
            self.push_leaf(&mut children);
        }
        ParseNode::rule(RuleKind::Preprocessor, children)
    }

    /// Parse `type IDENTIFIER ('=' expression)? ';'`.
    fn parse_declaration(&mut self) -> ParseNode {
        let mut children = Vec::new();
        if self.is_type_keyword() {
            self.push_leaf(&mut children);
        }
        if matches!(self.current(), Some(t) if t.token_type == TokenType::Identifier) {
            self.push_leaf(&mut children);
        }
        if self.check_operator("=") {
            self.advance();
            if let Some(initializer) = self.parse_expression() {
                children.push(initializer);
            }
        }
        self.expect_separator(";");
        ParseNode::rule(RuleKind::Declaration, children)
    }

    /// Parse `type IDENTIFIER '(' param* ')' block`. Parameters are kept
    /// as raw token leaves under a `params` node, commas included.
    fn parse_function_definition(&mut self) -> ParseNode {
        let mut children = Vec::new();
        if self.is_type_keyword() {
            self.push_leaf(&mut children);
        }
        if matches!(self.current(), Some(t) if t.token_type == TokenType::Identifier) {
            self.push_leaf(&mut children);
        }
        if self.eat_separator("(") {
            let mut params = Vec::new();
            while self.current().is_some() && !self.check_separator(")") {
                self.push_leaf(&mut params);
            }
            children.push(ParseNode::rule(RuleKind::Params, params));
            self.eat_separator(")");
        }
        if self.check_separator("{") {
            children.push(self.parse_block());
        } else {
            // The offending token is left for the statement loop.
            self.report_expected("{");
        }
        ParseNode::rule(RuleKind::FunctionDefinition, children)
    }

    /// Parse `IDENTIFIER '=' expression ';'`.
    fn parse_assignment(&mut self) -> ParseNode {
        let mut children = Vec::new();
        if matches!(self.current(), Some(t) if t.token_type == TokenType::Identifier) {
            self.push_leaf(&mut children);
        }
        if self.check_operator("=") {
            self.advance();
        }
        if let Some(value) = self.parse_expression() {
            children.push(value);
        }
        self.expect_separator(";");
        ParseNode::rule(RuleKind::Assignment, children)
    }

    /// Parse `expression ';'`.
    fn parse_expression_statement(&mut self) -> ParseNode {
        let mut children = Vec::new();
        if let Some(expression) = self.parse_expression() {
            children.push(expression);
        }
        self.expect_separator(";");
        ParseNode::rule(RuleKind::ExpressionStatement, children)
    }

    /// Parse `'if' '(' expression ')' statement ('else' statement)?`.
    /// A missing `(` skips the whole condition group without a diagnostic.
    fn parse_if_statement(&mut self) -> ParseNode {
        let mut children = Vec::new();
        self.advance(); // 'if'
        if self.eat_separator("(") {
            if let Some(condition) = self.parse_expression() {
                children.push(condition);
            }
            self.eat_separator(")");
        }
        if let Some(then_branch) = self.parse_statement() {
            children.push(then_branch);
        }
        if self.check_keyword("else") {
            self.advance();
            if let Some(else_branch) = self.parse_statement() {
                children.push(else_branch);
            }
        }
        ParseNode::rule(RuleKind::IfStatement, children)
    }

    /// Parse `'while' '(' expression ')' statement`.
    fn parse_while_statement(&mut self) -> ParseNode {
        let mut children = Vec::new();
        self.advance(); // 'while'
        if self.eat_separator("(") {
            if let Some(condition) = self.parse_expression() {
                children.push(condition);
            }
            self.eat_separator(")");
        }
        if let Some(body) = self.parse_statement() {
            children.push(body);
        }
        ParseNode::rule(RuleKind::WhileStatement, children)
    }

    /// Parse `'for' '(' statement expression ';' expression ')' statement`.
    /// The init slot is a full statement and consumes its own `;`.
    fn parse_for_statement(&mut self) -> ParseNode {
        let mut children = Vec::new();
        self.advance(); // 'for'
        if self.eat_separator("(") {
            if let Some(init) = self.parse_statement() {
                children.push(init);
            }
            if let Some(condition) = self.parse_expression() {
                children.push(condition);
            }
            self.eat_separator(";");
            if let Some(update) = self.parse_expression() {
                children.push(update);
            }
            self.eat_separator(")");
        }
        if let Some(body) = self.parse_statement() {
            children.push(body);
        }
        ParseNode::rule(RuleKind::ForStatement, children)
    }

    /// Parse `'return' expression? ';'`. The `;` is consumed when present
    /// and silently tolerated when absent.
    fn parse_return_statement(&mut self) -> ParseNode {
        let mut children = Vec::new();
        self.advance(); // 'return'
        if self.current().is_some() && !self.check_separator(";") {
            if let Some(value) = self.parse_expression() {
                children.push(value);
            }
        }
        self.eat_separator(";");
        ParseNode::rule(RuleKind::ReturnStatement, children)
    }

    /// Parse `'{' statement* '}'`.
    fn parse_block(&mut self) -> ParseNode {
        let mut children = Vec::new();
        if self.eat_separator("{") {
            while self.current().is_some() && !self.check_separator("}") {
                if let Some(statement) = self.parse_statement() {
                    children.push(statement);
                }
            }
            self.eat_separator("}");
        }
        ParseNode::rule(RuleKind::Block, children)
    }

    /// Parse the comparison precedence level, folding left.
    fn parse_expression(&mut self) -> Option<ParseNode> {
        self.enter();
        let mut node = self.parse_simple_expression();
        while self.check_comparison_operator() {
            let mut children = Vec::new();
            if let Some(left) = node {
                children.push(left);
            }
            self.push_leaf(&mut children);
            if let Some(right) = self.parse_simple_expression() {
                children.push(right);
            }
            node = Some(ParseNode::rule(RuleKind::ComparisonOp, children));
        }
        self.depth -= 1;
        node
    }

    /// Parse the additive precedence level.
    fn parse_simple_expression(&mut self) -> Option<ParseNode> {
        let mut node = self.parse_term();
        while self.check_additive_operator() {
            let mut children = Vec::new();
            if let Some(left) = node {
                children.push(left);
            }
            self.push_leaf(&mut children);
            if let Some(right) = self.parse_term() {
                children.push(right);
            }
            node = Some(ParseNode::rule(RuleKind::BinaryOp, children));
        }
        node
    }

    /// Parse the multiplicative precedence level.
    fn parse_term(&mut self) -> Option<ParseNode> {
        let mut node = self.parse_factor();
        while self.check_multiplicative_operator() {
            let mut children = Vec::new();
            if let Some(left) = node {
                children.push(left);
            }
            self.push_leaf(&mut children);
            if let Some(right) = self.parse_factor() {
                children.push(right);
            }
            node = Some(ParseNode::rule(RuleKind::BinaryOp, children));
        }
        node
    }

    /// Parse a factor. Returns `None`, after reporting and skipping the
    /// current token, when nothing a factor can start with is present.
    fn parse_factor(&mut self) -> Option<ParseNode> {
        let token = self.current()?.clone();
        match token.token_type {
            TokenType::Number | TokenType::String | TokenType::Char => self.take_leaf(),
            TokenType::Identifier => {
                let call_next = matches!(
                    self.peek_ahead(1),
                    Some(t) if t.token_type == TokenType::Separator && t.value == "("
                );
                if call_next {
                    return Some(self.parse_function_call());
                }
                let leaf = self.take_leaf();
                // Whatever follows an identifier must be able to continue
                // an expression.
                if let Some(next) = self.current() {
                    if !matches!(
                        next.token_type,
                        TokenType::Operator | TokenType::Separator | TokenType::Eof
                    ) {
                        self.diagnostics.push(Diagnostic::new(
                            DiagnosticKind::UnexpectedIdentifier(token.value),
                            Some(token.line),
                        ));
                    }
                }
                leaf
            }
            TokenType::Separator if token.value == "(" => {
                self.advance();
                let inner = self.parse_expression();
                self.expect_separator(")");
                inner
            }
            _ => {
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnexpectedToken(token.value),
                    Some(token.line),
                ));
                self.advance();
                None
            }
        }
    }

    /// Parse `IDENTIFIER '(' (expression (',' expression)*)? ')'`.
    fn parse_function_call(&mut self) -> ParseNode {
        let mut children = Vec::new();
        if matches!(self.current(), Some(t) if t.token_type == TokenType::Identifier) {
            self.push_leaf(&mut children);
        }
        if self.eat_separator("(") {
            let mut args = Vec::new();
            while self.current().is_some() && !self.check_separator(")") {
                if let Some(argument) = self.parse_expression() {
                    args.push(argument);
                }
                if self.check_separator(",") {
                    self.advance();
                } else {
                    break;
                }
            }
            children.push(ParseNode::rule(RuleKind::Args, args));
            self.expect_separator(")");
        }
        ParseNode::rule(RuleKind::FunctionCall, children)
    }

    /// Current token without consuming.
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Look ahead n tokens.
    fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Consume the current token, if any.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Clone the current token into a leaf and consume it.
    fn take_leaf(&mut self) -> Option<ParseNode> {
        let token = self.current()?.clone();
        self.advance();
        Some(ParseNode::leaf(token))
    }

    /// Consume the current token into `children` as a leaf.
    fn push_leaf(&mut self, children: &mut Vec<ParseNode>) {
        if let Some(leaf) = self.take_leaf() {
            children.push(leaf);
        }
    }

    fn check_separator(&self, symbol: &str) -> bool {
        matches!(
            self.current(),
            Some(t) if t.token_type == TokenType::Separator && t.value == symbol
        )
    }

    fn check_operator(&self, symbol: &str) -> bool {
        matches!(
            self.current(),
            Some(t) if t.token_type == TokenType::Operator && t.value == symbol
        )
    }

    fn check_keyword(&self, word: &str) -> bool {
        matches!(
            self.current(),
            Some(t) if t.token_type == TokenType::Keyword && t.value == word
        )
    }

    fn check_comparison_operator(&self) -> bool {
        matches!(
            self.current(),
            Some(t) if t.token_type == TokenType::Operator
                && COMPARISON_OPS.contains(&t.value.as_str())
        )
    }

    fn check_additive_operator(&self) -> bool {
        matches!(
            self.current(),
            Some(t) if t.token_type == TokenType::Operator
                && (t.value == "+" || t.value == "-")
        )
    }

    fn check_multiplicative_operator(&self) -> bool {
        matches!(
            self.current(),
            Some(t) if t.token_type == TokenType::Operator
                && (t.value == "*" || t.value == "/")
        )
    }

    fn is_type_keyword(&self) -> bool {
        matches!(
            self.current(),
            Some(t) if t.token_type == TokenType::Keyword
                && TYPE_KEYWORDS.contains(&t.value.as_str())
        )
    }

    /// Consume the expected separator, or report it missing and skip one
    /// token.
    fn expect_separator(&mut self, symbol: &'static str) {
        if self.check_separator(symbol) {
            self.advance();
        } else {
            self.report_expected(symbol);
            self.advance();
        }
    }

    /// Consume the separator only when present.
    fn eat_separator(&mut self, symbol: &str) -> bool {
        if self.check_separator(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn report_expected(&mut self, symbol: &'static str) {
        let line = self.current().map(|t| t.line);
        self.diagnostics
            .push(Diagnostic::new(DiagnosticKind::Expected(symbol), line));
    }

    /// Bump the nesting depth, abandoning the parse when it runs away.
    fn enter(&mut self) {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            panic!("nesting deeper than {} levels", MAX_RECURSION_DEPTH);
        }
    }
}

/// Best-effort text for a panic payload.
fn panic_note(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown internal failure".to_string()
    }
}
