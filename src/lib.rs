//! # Introduction
//!
//! csight analyzes the syntax of a subset of C: it scans source text into
//! labeled tokens, parses them into a concrete parse tree, and collects
//! structured diagnostics instead of stopping at the first error.  Nothing
//! here executes code; the output is the analysis itself, suitable for
//! driving an editor pane or the bundled command line report.
//!
//! ## Analysis pipeline
//!
//! ```text
//! Source → LexicalAnalyzer → Tokens → TopDownParser → Tree + Diagnostics
//! ```
//!
//! 1. [`syntax`]: the scanner, parser, token and tree types, and the
//!    diagnostic record they report through.
//! 2. [`spans`]: projects tokens onto line/column highlight spans for
//!    display layers.
//! 3. [`brackets`]: standalone bracket pairing check over raw text.
//!
//! Both analysis passes are total: the scanner embeds malformed input as
//! ERROR tokens and the parser recovers by skipping single tokens, so every
//! input yields a tree and a (possibly empty) diagnostics list.  The
//! analyzers hold no interior state between runs; one `LexicalAnalyzer` can
//! be shared freely, while a `TopDownParser` is built per input and
//! consumed by its `parse` call.
//!
//! ## Supported C subset
//!
//! Types: `int`, `char`, `float`, `double`, `void`.
//! Statements: declarations, assignments, `if/else`, `while`, `for`,
//! `return`, blocks, preprocessor directives.
//! Expressions: arithmetic, comparisons, calls, grouping.

pub mod brackets;
pub mod spans;
pub mod syntax;
