//! # Lexer
//!
//! This module contains both the definitions-file loader and the lexer
//! itself.
//!
//! The loader reads a definitions file (conventionally a `.lex` file) where
//! each line binds a token type to a pattern, and compiles every pattern
//! with [`crate::regex`]. The lexer then tokenizes a source text against
//! those definitions, in file order, producing a [`TokenStream`].

mod grammar;
#[allow(clippy::module_inception)]
mod lexer;

pub use grammar::{Grammar, GrammarBuilder, TerminalId, TokenDefinition};
pub use lexer::{Lexer, LexerBuilder, Token, TokenStream};
