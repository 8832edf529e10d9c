use clap::{Parser as CliParser, Subcommand};
use std::path::PathBuf;

#[derive(CliParser)]
#[command(author, version, about, long_about=None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand)]
pub enum Action {
    /// Tokenize a source file
    Lex {
        /// Specify the token definitions file
        #[arg(id = "definitions")]
        definitions: PathBuf,
        /// The file to lex
        source: PathBuf,
    },
    /// Compile a pattern and show its compiled form
    Compile {
        /// The pattern to compile
        pattern: String,
    },
    /// Match a pattern against the start of an input string
    Match {
        /// The pattern to compile
        pattern: String,
        /// The input to match against
        input: String,
    },
}
