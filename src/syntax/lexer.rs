//! Lexical analyzer for C source code
//!
//! Converts raw source text into a flat [`Token`] stream. Scanning never
//! fails: malformed input (unterminated literals, unrecognized characters)
//! is emitted in-band as ERROR tokens and the scanner keeps going. Every
//! stream ends with a single EOF token whose offset equals the input length.

use rustc_hash::FxHashSet;

use crate::syntax::token::{Token, TokenType};

/// The 32 reserved words of C.
const KEYWORDS: [&str; 32] = [
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while",
];

/// Operator lexemes. Matching probes two characters first, then one; the
/// `<<=`/`>>=` entries are never produced whole because the probe window is
/// two characters wide, so `<<=` lexes as `<<` then `=`.
const OPERATORS: [&str; 33] = [
    "+", "-", "*", "/", "%", "=", "==", "!=", "<", ">", "<=", ">=", "&&", "||", "!", "&", "|",
    "^", "~", "<<", ">>", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
];

/// Single-character separators, emitted directly from the START state.
const SEPARATORS: [char; 11] = ['(', ')', '{', '}', '[', ']', ';', ',', '.', ':', '?'];

/// Characters that can stand alone as an operator.
fn is_operator_char(ch: char) -> bool {
    "+-*/%=<>!&|^~".contains(ch)
}

/// Scanner state. START inspects one character and either emits a separator
/// directly, skips whitespace, or hands off to the state that accumulates
/// the full lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexicalState {
    Start,
    Identifier,
    Number,
    StringLit,
    CharLit,
    LineComment,
    BlockComment,
    Preprocessor,
    Operator,
}

/// Finite-state lexical analyzer.
///
/// Holds only the classification tables; all cursor state lives in a
/// per-call [`Scanner`], so one analyzer can be shared freely and repeated
/// calls are independent.
pub struct LexicalAnalyzer {
    keywords: FxHashSet<&'static str>,
    operators: FxHashSet<&'static str>,
    separators: FxHashSet<char>,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            keywords: KEYWORDS.iter().copied().collect(),
            operators: OPERATORS.iter().copied().collect(),
            separators: SEPARATORS.iter().copied().collect(),
        }
    }

    /// Tokenize the entire input.
    ///
    /// Always terminates and never returns an error; see the module docs
    /// for how malformed input is represented.
    pub fn analyze(&self, text: &str) -> Vec<Token> {
        Scanner::new(self, text).run()
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Call-local cursor over the input characters.
struct Scanner<'a> {
    tables: &'a LexicalAnalyzer,
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    state: LexicalState,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(tables: &'a LexicalAnalyzer, text: &str) -> Self {
        Self {
            tables,
            input: text.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            state: LexicalState::Start,
            tokens: Vec::new(),
        }
    }

    /// Drive the state machine over the whole input and append the EOF
    /// token.
    fn run(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.step();
        }
        self.tokens.push(Token::new(
            TokenType::Eof,
            String::new(),
            self.line,
            self.column,
            self.position,
        ));
        self.tokens
    }

    /// Execute one state-machine step.
    fn step(&mut self) {
        match self.state {
            LexicalState::Start => self.dispatch(),
            LexicalState::Identifier => self.scan_identifier(),
            LexicalState::Number => self.scan_number(),
            LexicalState::StringLit => self.scan_string(),
            LexicalState::CharLit => self.scan_char(),
            LexicalState::LineComment => self.scan_line_comment(),
            LexicalState::BlockComment => self.scan_block_comment(),
            LexicalState::Preprocessor => self.scan_preprocessor(),
            LexicalState::Operator => self.scan_operator(),
        }
    }

    /// START: pick the next state from the current character.
    fn dispatch(&mut self) {
        let Some(ch) = self.current() else {
            return;
        };
        match ch {
            c if c.is_whitespace() => self.skip_whitespace(),
            c if c.is_alphabetic() || c == '_' => self.state = LexicalState::Identifier,
            c if c.is_ascii_digit() => self.state = LexicalState::Number,
            '"' => self.state = LexicalState::StringLit,
            '\'' => self.state = LexicalState::CharLit,
            '#' => self.state = LexicalState::Preprocessor,
            '/' if self.peek() == Some('/') => self.state = LexicalState::LineComment,
            '/' if self.peek() == Some('*') => self.state = LexicalState::BlockComment,
            c if self.tables.separators.contains(&c) => {
                let (line, column, offset) = self.mark();
                self.advance();
                self.push(TokenType::Separator, c.to_string(), line, column, offset);
            }
            _ => self.state = LexicalState::Operator,
        }
    }

    /// Consume a whitespace run without emitting anything.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Scan an identifier and classify it as KEYWORD or IDENTIFIER.
    fn scan_identifier(&mut self) {
        let (line, column, offset) = self.mark();
        let mut lexeme = String::new();
        while let Some(ch) = self.current() {
            if ch.is_alphanumeric() || ch == '_' {
                lexeme.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        let token_type = if self.tables.keywords.contains(lexeme.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        self.push(token_type, lexeme, line, column, offset);
        self.state = LexicalState::Start;
    }

    /// Scan a decimal number with at most one dot. A second dot ends the
    /// token; the rest of the input starts fresh from START.
    fn scan_number(&mut self) {
        let (line, column, offset) = self.mark();
        let mut lexeme = String::new();
        let mut has_dot = false;
        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() {
                lexeme.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                lexeme.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        self.push(TokenType::Number, lexeme, line, column, offset);
        self.state = LexicalState::Start;
    }

    /// Scan a string literal, delimiters included. A backslash consumes the
    /// next character verbatim, even a closing quote. Unterminated input
    /// yields an ERROR token holding the partial text.
    fn scan_string(&mut self) {
        let (line, column, offset) = self.mark();
        let mut lexeme = String::from('"');
        self.advance();
        while let Some(ch) = self.current() {
            if ch == '"' {
                break;
            }
            if ch == '\\' && self.peek().is_some() {
                lexeme.push(ch);
                self.advance();
                if let Some(escaped) = self.current() {
                    lexeme.push(escaped);
                    self.advance();
                }
            } else {
                lexeme.push(ch);
                self.advance();
            }
        }
        if self.current() == Some('"') {
            lexeme.push('"');
            self.advance();
            self.push(TokenType::String, lexeme, line, column, offset);
        } else {
            self.push(TokenType::Error, lexeme, line, column, offset);
        }
        self.state = LexicalState::Start;
    }

    /// Scan a character literal. The body is capped at two accumulation
    /// rounds (an escape pair counts as one round) before the closing quote
    /// is required.
    fn scan_char(&mut self) {
        let (line, column, offset) = self.mark();
        let mut lexeme = String::from('\'');
        self.advance();
        let mut rounds = 0;
        while rounds < 2 {
            match self.current() {
                None | Some('\'') => break,
                Some('\\') if self.peek().is_some() => {
                    lexeme.push('\\');
                    self.advance();
                    if let Some(escaped) = self.current() {
                        lexeme.push(escaped);
                        self.advance();
                    }
                }
                Some(ch) => {
                    lexeme.push(ch);
                    self.advance();
                }
            }
            rounds += 1;
        }
        if self.current() == Some('\'') {
            lexeme.push('\'');
            self.advance();
            self.push(TokenType::Char, lexeme, line, column, offset);
        } else {
            self.push(TokenType::Error, lexeme, line, column, offset);
        }
        self.state = LexicalState::Start;
    }

    /// Scan a `//` comment to end of line, newline excluded.
    fn scan_line_comment(&mut self) {
        let (line, column, offset) = self.mark();
        let lexeme = self.take_until_newline();
        self.push(TokenType::Comment, lexeme, line, column, offset);
        self.state = LexicalState::Start;
    }

    /// Scan a `/* ... */` comment, markers included. Reaching end of input
    /// before `*/` ends the token silently with whatever accumulated.
    fn scan_block_comment(&mut self) {
        let (line, column, offset) = self.mark();
        let mut lexeme = String::new();
        // Opening "/*".
        for _ in 0..2 {
            if let Some(ch) = self.current() {
                lexeme.push(ch);
                self.advance();
            }
        }
        while let Some(ch) = self.current() {
            if ch == '*' && self.peek() == Some('/') {
                lexeme.push('*');
                self.advance();
                lexeme.push('/');
                self.advance();
                break;
            }
            lexeme.push(ch);
            self.advance();
        }
        self.push(TokenType::Comment, lexeme, line, column, offset);
        self.state = LexicalState::Start;
    }

    /// Scan a `#` directive to end of line, newline excluded. Directives are
    /// tokenized whole, never interpreted.
    fn scan_preprocessor(&mut self) {
        let (line, column, offset) = self.mark();
        let lexeme = self.take_until_newline();
        self.push(TokenType::Preprocessor, lexeme, line, column, offset);
        self.state = LexicalState::Start;
    }

    /// Scan an operator: two-character match first, then a single operator
    /// character, otherwise a one-character ERROR token.
    fn scan_operator(&mut self) {
        let (line, column, offset) = self.mark();
        if let (Some(ch), Some(next)) = (self.current(), self.peek()) {
            let mut pair = String::new();
            pair.push(ch);
            pair.push(next);
            if self.tables.operators.contains(pair.as_str()) {
                self.advance();
                self.advance();
                self.push(TokenType::Operator, pair, line, column, offset);
                self.state = LexicalState::Start;
                return;
            }
        }
        if let Some(ch) = self.current() {
            self.advance();
            if is_operator_char(ch) {
                self.push(TokenType::Operator, ch.to_string(), line, column, offset);
            } else {
                self.push(TokenType::Error, ch.to_string(), line, column, offset);
            }
        }
        self.state = LexicalState::Start;
    }

    /// Accumulate characters up to (not including) the next newline.
    fn take_until_newline(&mut self) -> String {
        let mut lexeme = String::new();
        while let Some(ch) = self.current() {
            if ch == '\n' {
                break;
            }
            lexeme.push(ch);
            self.advance();
        }
        lexeme
    }

    /// Current character without consuming.
    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// One character of lookahead.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Consume the current character, keeping line/column/offset in step.
    fn advance(&mut self) {
        if let Some(ch) = self.current() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Position snapshot (line, column, offset) for the token about to be
    /// scanned.
    fn mark(&self) -> (usize, usize, usize) {
        (self.line, self.column, self.position)
    }

    fn push(
        &mut self,
        token_type: TokenType,
        value: String,
        line: usize,
        column: usize,
        offset: usize,
    ) {
        self.tokens
            .push(Token::new(token_type, value, line, column, offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        LexicalAnalyzer::new().analyze(source)
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex("int main() { return 0; }");

        assert!(matches!(tokens[0].token_type, TokenType::Keyword));
        assert_eq!(tokens[0].value, "int");
        assert!(matches!(tokens[1].token_type, TokenType::Identifier));
        assert_eq!(tokens[1].value, "main");
        assert_eq!(tokens[2].value, "(");
        assert_eq!(tokens[3].value, ")");
        assert_eq!(tokens[4].value, "{");
        assert!(matches!(tokens[5].token_type, TokenType::Keyword));
        assert!(matches!(tokens[6].token_type, TokenType::Number));
        assert_eq!(tokens[7].value, ";");
        assert_eq!(tokens[8].value, "}");
        assert!(matches!(tokens[9].token_type, TokenType::Eof));
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_every_reserved_word_is_a_keyword() {
        for word in KEYWORDS {
            let tokens = lex(word);
            assert!(
                matches!(tokens[0].token_type, TokenType::Keyword),
                "'{}' should lex as KEYWORD",
                word
            );
            assert_eq!(tokens[0].value, word);
        }
    }

    #[test]
    fn test_identifier_is_not_keyword() {
        let tokens = lex("integer whileish _if");
        assert!(matches!(tokens[0].token_type, TokenType::Identifier));
        assert!(matches!(tokens[1].token_type, TokenType::Identifier));
        assert!(matches!(tokens[2].token_type, TokenType::Identifier));
    }

    #[test]
    fn test_two_char_operators_take_priority() {
        let tokens = lex("==");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[0].token_type, TokenType::Operator));
        assert_eq!(tokens[0].value, "==");

        let tokens = lex("a <= b != c");
        assert_eq!(tokens[1].value, "<=");
        assert_eq!(tokens[3].value, "!=");
    }

    #[test]
    fn test_compound_shift_assign_splits() {
        // The probe window is two characters, so <<= comes out as << then =.
        let tokens = lex("a <<= 1");
        assert_eq!(tokens[1].value, "<<");
        assert_eq!(tokens[2].value, "=");
        assert!(matches!(tokens[3].token_type, TokenType::Number));
    }

    #[test]
    fn test_eof_offset_equals_input_length() {
        for source in ["", "x", "x+", "int x = 5;", "a\nb\nc", "\"open", "1.2.3"] {
            let tokens = lex(source);
            let eof = tokens.last().unwrap();
            assert!(matches!(eof.token_type, TokenType::Eof));
            assert_eq!(eof.value, "");
            assert_eq!(
                eof.offset,
                source.chars().count(),
                "EOF offset wrong for {:?}",
                source
            );
            let eof_count = tokens
                .iter()
                .filter(|t| t.token_type == TokenType::Eof)
                .count();
            assert_eq!(eof_count, 1);
        }
    }

    #[test]
    fn test_trailing_operator_takes_single_char_path() {
        let tokens = lex("x+");
        assert_eq!(tokens[1].value, "+");
        assert!(matches!(tokens[1].token_type, TokenType::Operator));
        assert_eq!(tokens[2].offset, 2);
    }

    #[test]
    fn test_unterminated_string_is_single_error() {
        let tokens = lex("\"abc");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[0].token_type, TokenType::Error));
        assert_eq!(tokens[0].value, "\"abc");
        assert!(matches!(tokens[1].token_type, TokenType::Eof));
    }

    #[test]
    fn test_string_escape_consumes_closing_quote() {
        let tokens = lex(r#""a\"b""#);
        assert!(matches!(tokens[0].token_type, TokenType::String));
        assert_eq!(tokens[0].value, r#""a\"b""#);
    }

    #[test]
    fn test_string_with_trailing_backslash_is_error() {
        let tokens = lex("\"ab\\");
        assert!(matches!(tokens[0].token_type, TokenType::Error));
        assert_eq!(tokens[0].value, "\"ab\\");
    }

    #[test]
    fn test_char_literals() {
        let tokens = lex(r"'a' '\n'");
        assert!(matches!(tokens[0].token_type, TokenType::Char));
        assert_eq!(tokens[0].value, "'a'");
        assert!(matches!(tokens[1].token_type, TokenType::Char));
        assert_eq!(tokens[1].value, r"'\n'");
    }

    #[test]
    fn test_char_literal_body_cap() {
        // Two rounds fit; a third character breaks the literal apart.
        let tokens = lex("'ab'");
        assert!(matches!(tokens[0].token_type, TokenType::Char));
        assert_eq!(tokens[0].value, "'ab'");

        let tokens = lex("'abc'");
        assert!(matches!(tokens[0].token_type, TokenType::Error));
        assert_eq!(tokens[0].value, "'ab");
        assert!(matches!(tokens[1].token_type, TokenType::Identifier));
        assert_eq!(tokens[1].value, "c");
        assert!(matches!(tokens[2].token_type, TokenType::Error));
        assert_eq!(tokens[2].value, "'");
    }

    #[test]
    fn test_number_allows_one_dot() {
        let tokens = lex("3.14");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].value, "3.14");

        let tokens = lex("1.2.3");
        assert_eq!(tokens[0].value, "1.2");
        assert!(matches!(tokens[1].token_type, TokenType::Separator));
        assert_eq!(tokens[1].value, ".");
        assert_eq!(tokens[2].value, "3");
    }

    #[test]
    fn test_comments_are_tokens() {
        let tokens = lex("// note\nint x; /* block\ncomment */");
        assert!(matches!(tokens[0].token_type, TokenType::Comment));
        assert_eq!(tokens[0].value, "// note");
        assert!(matches!(tokens[1].token_type, TokenType::Keyword));
        let block = &tokens[4];
        assert!(matches!(block.token_type, TokenType::Comment));
        assert_eq!(block.value, "/* block\ncomment */");
    }

    #[test]
    fn test_unterminated_block_comment_stays_silent() {
        let tokens = lex("/* dangling");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[0].token_type, TokenType::Comment));
        assert_eq!(tokens[0].value, "/* dangling");
        assert!(matches!(tokens[1].token_type, TokenType::Eof));
    }

    #[test]
    fn test_preprocessor_excludes_newline() {
        let tokens = lex("#include <stdio.h>\nint x;");
        assert!(matches!(tokens[0].token_type, TokenType::Preprocessor));
        assert_eq!(tokens[0].value, "#include <stdio.h>");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].value, "int");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_positions() {
        let tokens = lex("int x;\ny = 1;");

        assert_eq!((tokens[0].line, tokens[0].column, tokens[0].offset), (1, 1, 0));
        assert_eq!((tokens[1].line, tokens[1].column, tokens[1].offset), (1, 5, 4));
        assert_eq!((tokens[2].line, tokens[2].column, tokens[2].offset), (1, 6, 5));
        // 'y' starts line 2.
        assert_eq!((tokens[3].line, tokens[3].column, tokens[3].offset), (2, 1, 7));
        assert_eq!(tokens[4].value, "=");
        assert_eq!((tokens[4].line, tokens[4].column), (2, 3));
    }

    #[test]
    fn test_unknown_character_is_one_char_error() {
        let tokens = lex("a @ b");
        assert!(matches!(tokens[1].token_type, TokenType::Error));
        assert_eq!(tokens[1].value, "@");
        assert!(matches!(tokens[2].token_type, TokenType::Identifier));
        assert_eq!(tokens[2].value, "b");
    }

    #[test]
    fn test_lossless_reassembly() {
        let source = "int main() {\n  char c = 'x'; // end\n  s = \"a\\\"b\" + 1.5.2;\n}\n@";
        let chars: Vec<char> = source.chars().collect();
        let tokens = lex(source);

        let mut rebuilt = String::new();
        let mut cursor = 0;
        for token in &tokens {
            if token.token_type == TokenType::Eof {
                break;
            }
            // The gap before each token must be pure whitespace.
            for &ch in &chars[cursor..token.offset] {
                assert!(ch.is_whitespace());
                rebuilt.push(ch);
            }
            rebuilt.push_str(&token.value);
            cursor = token.offset + token.len();
        }
        for &ch in &chars[cursor..] {
            assert!(ch.is_whitespace());
            rebuilt.push(ch);
        }
        assert_eq!(rebuilt, source);
    }
}
