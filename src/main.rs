use anyhow::Result;
use clap::Parser;
use patlex::cli::{Action, Cli};
use patlex::error::WarningSet;
use patlex::lexer::LexerBuilder;
use patlex::regex::CompiledPattern;

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.action {
        Action::Lex {
            definitions,
            source,
        } => {
            let mut warnings = WarningSet::default();
            let lexer = LexerBuilder::new()
                .with_grammar_file(definitions, &mut warnings)?
                .with_source_file(source)?
                .build()?;
            for warning in warnings.iter() {
                eprintln!("warning: {warning}");
            }
            for token in lexer.lex()?.iter() {
                println!("{token}");
            }
        }
        Action::Compile { pattern } => {
            let compiled = CompiledPattern::compile(&pattern)?;
            print!("{compiled}");
        }
        Action::Match { pattern, input } => {
            let compiled = CompiledPattern::compile(&pattern)?;
            match compiled.find(input.as_bytes()) {
                Some(matched) => {
                    let rest = String::from_utf8_lossy(&input.as_bytes()[matched.length()..]);
                    let state = if rest.is_empty() { "END" } else { "next" };
                    println!("The start of '{input}' is {pattern}, {state}: '{rest}'.");
                }
                None => println!("The start of '{input}' is *NOT* {pattern}."),
            }
        }
    }
    Ok(())
}
