//! Bracket pairing check over raw source text
//!
//! Walks the text once with a stack of open brackets and reports every
//! bracket left without a partner. The scan is purely textual: brackets
//! inside string literals and comments count like any other, and a closer
//! that does not match the innermost opener is reported without popping,
//! so the opener still gets its own report later.

use std::fmt;

/// A bracket with no partner, at its 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnmatchedBracket {
    pub bracket: char,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for UnmatchedBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unmatched '{}' at line {}, col {}",
            self.bracket, self.line, self.column
        )
    }
}

/// Report every unpaired `()`, `{}`, or `[]` bracket in the text.
///
/// Mismatched closers come out in scan order first, then the openers
/// still on the stack, outermost first.
pub fn unmatched_brackets(text: &str) -> Vec<UnmatchedBracket> {
    let mut issues = Vec::new();
    let mut stack: Vec<UnmatchedBracket> = Vec::new();
    let mut line = 1;
    let mut column = 0;

    for ch in text.chars() {
        if ch == '\n' {
            line += 1;
            column = 0;
            continue;
        }
        column += 1;
        match ch {
            '(' | '{' | '[' => stack.push(UnmatchedBracket {
                bracket: ch,
                line,
                column,
            }),
            ')' | '}' | ']' => {
                let wanted = opening_for(ch);
                if matches!(stack.last(), Some(open) if open.bracket == wanted) {
                    stack.pop();
                } else {
                    issues.push(UnmatchedBracket {
                        bracket: ch,
                        line,
                        column,
                    });
                }
            }
            _ => {}
        }
    }

    issues.extend(stack);
    issues
}

fn opening_for(closer: char) -> char {
    match closer {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}
