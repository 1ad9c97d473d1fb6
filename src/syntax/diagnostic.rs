//! Syntax diagnostics.
//!
//! The parser reports problems out-of-band as [`Diagnostic`] records and
//! keeps going. A diagnostic stays structured (kind + line) so callers can
//! match on it; the user-facing text lives in the `Display` impls alone.

use std::fmt;

/// What went wrong, independent of where.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A required terminal symbol was not found.
    #[error("expected '{0}'")]
    Expected(&'static str),

    /// A token that fits no construct at this position.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    /// An identifier followed by a token that can never continue an
    /// expression.
    #[error("unexpected use of identifier '{0}'")]
    UnexpectedIdentifier(String),

    /// Parsing was abandoned entirely; the tree is a bare ERROR root.
    #[error("parse failure: {0}")]
    ParseFailure(String),
}

/// A syntax finding tied to the line it was detected on.
///
/// `line` is `None` when the token stream was already exhausted, which
/// renders as `EOF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: Option<usize>) -> Self {
        Diagnostic { kind, line }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} at line {}", self.kind, line),
            None => write!(f, "{} at EOF", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let diag = Diagnostic::new(DiagnosticKind::Expected(";"), Some(3));
        assert_eq!(diag.to_string(), "expected ';' at line 3");
    }

    #[test]
    fn test_display_at_eof() {
        let diag = Diagnostic::new(DiagnosticKind::UnexpectedToken(")".to_string()), None);
        assert_eq!(diag.to_string(), "unexpected token ')' at EOF");
    }
}
