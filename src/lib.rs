//! # Patlex
//!
//! A lexer driven by a definitions file. Each line of the definitions file
//! binds a token type to a pattern written in a small regex dialect, and a
//! source text is tokenized by trying the definitions in file order at each
//! position. The most useful entry points are:
//!  - [`lexer::LexerBuilder`], which assembles a [`lexer::Lexer`] from a
//!    definitions file and a source file;
//!  - [`lexer::Lexer::lex`], which produces a [`lexer::TokenStream`];
//!  - [`regex::CompiledPattern`], the pattern engine itself, usable on its
//!    own.

pub mod cli;
pub mod error;
pub mod lexer;
pub mod location;
pub mod regex;
pub mod stream;
mod utilities;
