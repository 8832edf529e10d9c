use super::chargroup::CharGroup;
use super::matching;
use super::parsing::{read, RegexError};


/// # Summary
///
/// `Match` reports a successful, anchored match: the first `length` bytes of
/// the input were consumed by the pattern.
///
/// # Methods
///
/// `length`: the number of consumed bytes.
/// `text`: the consumed bytes themselves.
#[derive(Debug)]
pub struct Match<'text> {
    length: usize,
    text: &'text [u8],
}

impl Match<'_> {
    /// Return the length of the match, in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Return the consumed bytes.
    pub fn text(&self) -> &[u8] {
        self.text
    }
}

/// # Summary
///
/// `CompiledPattern` is a pattern of the dialect, compiled once into its
/// ordered [`CharGroup`] sequence. Matching is a direct simulation of that
/// sequence; there is no automaton construction and no caching, so compiling
/// is cheap and should be done once per pattern.
///
/// # Methods
///
/// `compile`: compile a pattern string.
/// `find`: match against the start of an input.
/// `groups`: expose the compiled sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    groups: Vec<CharGroup>,
}

impl CompiledPattern {
    /// Compile `pattern`. An empty pattern is valid and yields an empty
    /// sequence, which matches any input consuming zero bytes.
    pub fn compile(pattern: &str) -> Result<Self, RegexError> {
        read(pattern).map(|groups| Self { groups })
    }

    /// Match against the start of `input`. The match is anchored: it either
    /// covers a (possibly empty) prefix of `input` or fails.
    pub fn find<'text>(&self, input: &'text [u8]) -> Option<Match<'text>> {
        matching::find(&self.groups, input).map(|length| Match {
            length,
            text: &input[..length],
        })
    }

    /// Return the compiled [`CharGroup`] sequence.
    pub fn groups(&self) -> &[CharGroup] {
        &self.groups
    }
}

impl std::fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for group in &self.groups {
            writeln!(f, "{group}")?;
        }
        Ok(())
    }
}
