//! Syntax analysis for the C subset
//!
//! This module turns C source text into labeled tokens and a concrete parse
//! tree:
//! - [`token`]: token categories and the located [`token::Token`] record
//! - [`lexer`]: finite-state scanning (source text → tokens)
//! - [`parser`]: recursive descent parsing (tokens → parse tree)
//! - [`tree`]: parse tree node definitions
//! - [`diagnostic`]: structured syntax error reports
//!
//! # Supported C Subset
//!
//! The grammar covers a pedagogical slice of C:
//! - Types: `int`, `char`, `float`, `double`, `void`
//! - Statements: declarations, assignments, `if`/`else`, `while`, `for`,
//!   `return`, blocks, preprocessor directives
//! - Expressions: `+ - * /`, six comparison operators, calls, grouping
//! - All 32 reserved words are recognized lexically even where the grammar
//!   gives them no production
//!
//! Scanning never fails: malformed input becomes in-band ERROR tokens.
//! Parsing never fails either; it reports diagnostics and recovers by
//! skipping single tokens.

pub mod diagnostic;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod tree;
