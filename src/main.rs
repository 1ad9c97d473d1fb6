// csight: syntax analysis reports for a subset of C

use std::error::Error;
use std::fs;
use std::io::{self, Read};

use clap::Parser;

use csight::brackets::unmatched_brackets;
use csight::syntax::lexer::LexicalAnalyzer;
use csight::syntax::parser::TopDownParser;
use csight::syntax::token::{Token, TokenType};

#[derive(Parser, Debug)]
#[command(version, about = "Token, parse tree, and diagnostic reports for a C subset")]
struct Args {
    /// C source file; reads stdin when omitted
    filename: Option<String>,

    /// Print the token table
    #[arg(short, long)]
    tokens: bool,

    /// Print the parse tree
    #[arg(short = 'p', long)]
    tree: bool,

    /// Print the bracket pairing report
    #[arg(short, long)]
    brackets: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Read source code
    let source = match &args.filename {
        Some(filename) => fs::read_to_string(filename)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // No section flags means every section.
    let everything = !(args.tokens || args.tree || args.brackets);

    let tokens = LexicalAnalyzer::new().analyze(&source);
    let lexical_errors = tokens
        .iter()
        .filter(|t| t.token_type == TokenType::Error)
        .count();

    if everything || args.tokens {
        print_token_table(&tokens);
    }

    let (tree, diagnostics) = TopDownParser::new(tokens).parse();

    if everything || args.tree {
        println!("tree:");
        // The tree renders its own trailing newline.
        print!("{}", tree);
    }

    if diagnostics.is_empty() {
        println!("no syntax errors");
    } else {
        println!("diagnostics:");
        for diagnostic in &diagnostics {
            println!("  {}", diagnostic);
        }
    }

    let bracket_issues = unmatched_brackets(&source);
    if everything || args.brackets {
        if bracket_issues.is_empty() {
            println!("brackets balanced");
        } else {
            println!("brackets:");
            for issue in &bracket_issues {
                println!("  {}", issue);
            }
        }
    }

    if !diagnostics.is_empty() || lexical_errors > 0 || !bracket_issues.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_token_table(tokens: &[Token]) {
    println!("tokens:");
    for (index, token) in tokens.iter().enumerate() {
        if token.token_type == TokenType::Eof {
            continue;
        }
        println!(
            "{:>4}: {:<12} | {:<24} | line {}, col {}",
            index,
            token.token_type.to_string(),
            token.value.escape_debug().to_string(),
            token.line,
            token.column
        );
    }
}
