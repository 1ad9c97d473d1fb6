//! Token model: the data contract between the lexer and everything
//! downstream of it.

use std::fmt;

/// Lexical category of a token.
///
/// `Whitespace` is a reserved slot: the scanner always skips whitespace
/// instead of emitting it, and the parser filters the category out of its
/// input stream regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Keyword,
    Identifier,
    Number,
    String,
    Char,
    Operator,
    Separator,
    Comment,
    Preprocessor,
    Whitespace,
    Error,
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Keyword => "KEYWORD",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::Number => "NUMBER",
            TokenType::String => "STRING",
            TokenType::Char => "CHAR",
            TokenType::Operator => "OPERATOR",
            TokenType::Separator => "SEPARATOR",
            TokenType::Comment => "COMMENT",
            TokenType::Preprocessor => "PREPROCESSOR",
            TokenType::Whitespace => "WHITESPACE",
            TokenType::Error => "ERROR",
            TokenType::Eof => "EOF",
        };
        write!(f, "{}", name)
    }
}

/// A classified, positioned lexeme.
///
/// `value` holds the exact source substring, delimiters included (`"hi"`
/// keeps its quotes, `/* x */` keeps its markers). The synthetic EOF token
/// has an empty value and an offset equal to the input length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub token_type: TokenType,
    /// The exact lexeme text.
    pub value: String,
    /// 1-based line of the first character of the lexeme.
    pub line: usize,
    /// 1-based column of the first character of the lexeme.
    pub column: usize,
    /// 0-based absolute character index into the source.
    pub offset: usize,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        value: impl Into<String>,
        line: usize,
        column: usize,
        offset: usize,
    ) -> Self {
        Token {
            token_type,
            value: value.into(),
            line,
            column,
            offset,
        }
    }

    /// Length of the lexeme in characters (not bytes).
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' at line {}, col {}",
            self.token_type, self.value, self.line, self.column
        )
    }
}
