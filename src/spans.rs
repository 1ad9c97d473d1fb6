//! Highlight spans for editor integration
//!
//! Maps a token stream onto line-relative spans a display layer can color
//! without re-scanning the text. Spans carry the same 1-based line and
//! column as the tokens they come from; lengths are in characters, not
//! bytes, so they line up with what a text widget indexes by.

use crate::syntax::token::{Token, TokenType};

/// One colorable run of characters on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character.
    pub column: usize,
    /// Length in characters.
    pub length: usize,
    /// Token category the display layer keys its palette on.
    pub category: TokenType,
}

/// Project a token stream onto highlight spans.
///
/// The synthetic EOF token is skipped; it has no characters to color.
/// Multi-line tokens (block comments) keep their starting position and
/// total character length, matching how the scanner located them.
pub fn token_spans(tokens: &[Token]) -> Vec<TokenSpan> {
    tokens
        .iter()
        .filter(|token| token.token_type != TokenType::Eof)
        .map(|token| TokenSpan {
            line: token.line,
            column: token.column,
            length: token.len(),
            category: token.token_type,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::LexicalAnalyzer;

    #[test]
    fn test_spans_mirror_token_positions() {
        let tokens = LexicalAnalyzer::new().analyze("int x;\nx = 1;");
        let spans = token_spans(&tokens);

        assert_eq!(spans.len(), tokens.len() - 1);
        assert_eq!(
            spans[0],
            TokenSpan {
                line: 1,
                column: 1,
                length: 3,
                category: TokenType::Keyword
            }
        );
        // 'x' on the second line starts the line over at column 1.
        assert_eq!(
            spans[3],
            TokenSpan {
                line: 2,
                column: 1,
                length: 1,
                category: TokenType::Identifier
            }
        );
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let tokens = LexicalAnalyzer::new().analyze("\"çay\"");
        let spans = token_spans(&tokens);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, TokenType::String);
        assert_eq!(spans[0].length, 5);
    }

    #[test]
    fn test_error_tokens_are_colorable() {
        let tokens = LexicalAnalyzer::new().analyze("@");
        let spans = token_spans(&tokens);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, TokenType::Error);
        assert_eq!(spans[0].length, 1);
    }
}
