//! # Error
//!
//! The error and warning types of the crate. Errors are fatal and abort the
//! whole run; warnings are collected in a [`WarningSet`] and reported to the
//! caller without interrupting anything.

use crate::location::Location;
use crate::regex::RegexError;
use std::path::PathBuf;
use thiserror::Error;


pub type Result<T> = std::result::Result<T, Error>;

/// # Summary
///
/// `Error` covers every fatal outcome of a lexing run:
///  - `Io`: a definitions or source file could not be read;
///  - `PatternSyntax`: a definition's pattern does not comply with the
///    dialect, which aborts the whole load;
///  - `Lexing`: no definition matched at some position of the source text,
///    which aborts the whole scan;
///  - `Internal`: the crate was driven incorrectly (e.g. building a lexer
///    without a grammar).
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "in {path}, line {line}: invalid pattern for token type `{name}`: {source}",
        path = .path.display()
    )]
    PatternSyntax {
        path: PathBuf,
        line: usize,
        name: String,
        source: RegexError,
    },
    #[error("in {path}, at {location}: no token definition matches", path = .path.display())]
    Lexing { path: PathBuf, location: Location },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl Error {
    pub fn with_file(error: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source: error,
        }
    }
}

/// # Summary
///
/// A non-fatal problem met while loading a definitions file. The offending
/// line is skipped, the load goes on.
#[derive(Debug, Error)]
pub enum Warning {
    #[error(
        "in {path}, line {line}: missing pattern after the token type, definition skipped",
        path = .path.display()
    )]
    MissingPattern { path: PathBuf, line: usize },
}

/// # Summary
///
/// An ordered collection of [`Warning`]s. Passed `&mut` through the load
/// phase, so that every non-fatal problem ends up in a single place the
/// caller can inspect or print.
#[derive(Debug, Default)]
pub struct WarningSet(Vec<Warning>);

impl WarningSet {
    pub fn add(&mut self, warning: Warning) {
        self.0.push(warning);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for WarningSet {
    type Item = Warning;
    type IntoIter = std::vec::IntoIter<Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
