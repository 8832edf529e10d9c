//! # Location
//!
//! Data to locate a token in its source text.
//! The main struct is [`Location`].


/// # Summary
///
/// The position of a byte in a source text, stored as a
/// line number (starting at 1) and a column number (starting at 0).
///
/// # Example
///
/// ```text
/// abc def
/// ghi
/// ```
///
/// Here, the `Location` of `a` is `1:0`,
/// and the one of `i` is `2:2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    line: usize,
    column: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Location {
    /// Create a new `Location`. `line` is 1-based, `column` is 0-based.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Return the line number (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the column number (0-based).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Return the location reached after reading `consumed` from `self`.
    /// A newline byte moves to the start of the next line, any other byte
    /// moves one column to the right.
    pub fn after(&self, consumed: &[u8]) -> Self {
        let mut line = self.line;
        let mut column = self.column;
        for &byte in consumed {
            if byte == b'\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}
