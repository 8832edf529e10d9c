//! # Regex
//!
//! The pattern engine: a restricted regex dialect compiled into a flat
//! sequence of character groups, and matched by direct greedy simulation.
//! The most useful items are:
//!  - [`CompiledPattern`], the compiled form of one pattern, with its
//!    anchored [`CompiledPattern::find`] entry point;
//!  - [`CharGroup`], the atomic matchable unit (membership set, negation,
//!    quantifier);
//!  - [`RegexError`], reported when a pattern does not comply with the
//!    dialect.
//!
//! The dialect deliberately has no alternation, no groups, no nested
//! quantifiers and no backreferences, and it operates on single bytes 0-127.
//! Matching is greedy and never backtracks: once a quantified group has
//! consumed its maximal run, the next group picks up right after it.

mod api;
mod chargroup;
mod matching;
mod parsing;

pub use api::{CompiledPattern, Match};
pub use chargroup::{CharGroup, Quantifier};
pub use parsing::RegexError;
