use super::chargroup::CharGroup;
use thiserror::Error;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::Quantifier;

    fn groups(pattern: &str) -> Vec<CharGroup> {
        read(pattern).unwrap()
    }

    fn error(pattern: &str) -> RegexError {
        read(pattern).unwrap_err()
    }

    #[test]
    fn empty_pattern() {
        // An empty pattern is not a failure: it matches the empty string.
        assert_eq!(groups(""), Vec::new());
    }

    #[test]
    fn literals() {
        let compiled = groups("ab");
        assert_eq!(compiled.len(), 2);
        assert!(compiled[0].contains(b'a'));
        assert!(!compiled[0].contains(b'b'));
        assert!(compiled[1].contains(b'b'));
        assert_eq!(compiled[0].quantifier(), None);
        assert!(!compiled[0].negated());
    }

    #[test]
    fn any() {
        let compiled = groups(".");
        assert_eq!(compiled.len(), 1);
        for byte in 0..0x80 {
            assert!(compiled[0].contains(byte));
        }
    }

    #[test]
    fn quantifiers() {
        let compiled = groups("a*b+c?d");
        assert_eq!(compiled[0].quantifier(), Some(Quantifier::ZeroOrMore));
        assert_eq!(compiled[1].quantifier(), Some(Quantifier::OneOrMore));
        assert_eq!(compiled[2].quantifier(), Some(Quantifier::ZeroOrOne));
        assert_eq!(compiled[3].quantifier(), None);
    }

    #[test]
    fn negation() {
        let compiled = groups("^ab");
        assert!(compiled[0].negated());
        assert!(compiled[0].contains(b'a'));
        assert!(!compiled[1].negated());
        let compiled = groups("^[a-z]*");
        assert!(compiled[0].negated());
        assert_eq!(compiled[0].quantifier(), Some(Quantifier::ZeroOrMore));
    }

    #[test]
    fn escapes() {
        let compiled = groups(r"\n\t\\\.\[");
        assert!(compiled[0].contains(b'\n'));
        assert!(compiled[1].contains(b'\t'));
        assert!(compiled[2].contains(b'\\'));
        assert!(compiled[3].contains(b'.'));
        assert!(compiled[4].contains(b'['));
        // An escaped dot is a literal, not the "any byte" atom.
        assert!(!compiled[3].contains(b'a'));
    }

    #[test]
    fn char_class() {
        let compiled = groups("[a-z]");
        for byte in b'a'..=b'z' {
            assert!(compiled[0].contains(byte));
        }
        assert!(!compiled[0].contains(b'A'));
        assert!(!compiled[0].contains(b'{'));

        let compiled = groups(r"[a-z0-9\-\n_]");
        assert!(compiled[0].contains(b'-'));
        assert!(compiled[0].contains(b'\n'));
        assert!(compiled[0].contains(b'_'));
        assert!(compiled[0].contains(b'5'));
        assert!(!compiled[0].contains(b' '));
    }

    #[test]
    fn consecutive_quantifiers() {
        assert_eq!(error("a**").position, 2);
        assert_eq!(error("a*?").position, 2);
        assert_eq!(error("a+*").position, 2);
    }

    #[test]
    fn quantified_negation_marker() {
        // `^` is not an atom of its own; it cannot carry a quantifier.
        assert_eq!(error("a^*").position, 2);
        assert_eq!(error("^+a").position, 1);
    }

    #[test]
    fn leading_quantifier() {
        assert_eq!(error("*a").position, 0);
        assert_eq!(error("+").position, 0);
        assert_eq!(error("?ab").position, 0);
    }

    #[test]
    fn double_negation() {
        assert_eq!(error("^^a").position, 1);
    }

    #[test]
    fn dangling_negation() {
        assert!(read("ab^").is_err());
    }

    #[test]
    fn trailing_backslash() {
        assert!(read(r"ab\").is_err());
        assert!(read(r"[ab\").is_err());
    }

    #[test]
    fn raw_control_bytes() {
        assert!(read("a\nb").is_err());
        assert!(read("a\tb").is_err());
        assert!(read("[a\n]").is_err());
        assert!(read("[a\t]").is_err());
    }

    #[test]
    fn unbalanced_brackets() {
        assert!(read("ab]").is_err());
        assert!(read("[abc").is_err());
        assert!(read("[").is_err());
    }

    #[test]
    fn bad_classes() {
        // Empty class.
        assert!(read("[]").is_err());
        // Hyphen with no byte on its left.
        assert!(read("[-a]").is_err());
        // Hyphen with no byte on its right.
        assert!(read("[a-]").is_err());
        // Inverted range.
        assert!(read("[z-a]").is_err());
        // Stray hyphen after a range.
        assert!(read("[a-b-z]").is_err());
        // Raw specials must be escaped inside a class.
        assert!(read("[a+]").is_err());
        assert!(read("[a*]").is_err());
        assert!(read("[a?]").is_err());
        assert!(read("[a^]").is_err());
        assert!(read("[a.]").is_err());
        assert!(read("[a[]").is_err());
        assert!(read(r"[a\+\*\?\^\.\[]").is_ok());
    }

    #[test]
    fn single_byte_range() {
        let compiled = groups("[a-a]");
        assert!(compiled[0].contains(b'a'));
        assert!(!compiled[0].contains(b'b'));
    }

    #[test]
    fn non_ascii() {
        assert!(read("é").is_err());
        assert!(read("[à-é]").is_err());
    }

    #[test]
    fn determinism() {
        assert_eq!(read("[a-z]+\\.?"), read("[a-z]+\\.?"));
    }
}

/// # Summary
///
/// `RegexError` reports a pattern that does not comply with the dialect.
/// `position` is the byte offset in the pattern at which the error occured.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("at offset {position}: {message}")]
pub struct RegexError {
    pub position: usize,
    pub message: String,
}

impl RegexError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// The class of the previous significant byte of the pattern, threaded
/// through the compile loop as an explicit accumulator. "Significant" means
/// the byte that opened an atom, a quantifier, or a negation marker; bytes
/// inside a class or an escape do not take part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrevClass {
    Other,
    Operator,
    Negation,
}

/// Classify the byte that starts the next syntactic element, rejecting the
/// operator sequences the dialect forbids. Returns the accumulator value for
/// the next step.
fn operator_step(byte: u8, prev: PrevClass, pos: usize) -> Result<PrevClass, RegexError> {
    match byte {
        b'*' | b'+' | b'?' => match prev {
            PrevClass::Operator => Err(RegexError::new(
                pos,
                format!("quantifier `{}` cannot follow another quantifier", byte as char),
            )),
            PrevClass::Negation => Err(RegexError::new(
                pos,
                format!("quantifier `{}` cannot apply to `^`", byte as char),
            )),
            PrevClass::Other => Err(RegexError::new(
                pos,
                format!("quantifier `{}` has no character group to repeat", byte as char),
            )),
        },
        b'^' => {
            if prev == PrevClass::Negation {
                Err(RegexError::new(pos, "`^` cannot negate another `^`"))
            } else {
                Ok(PrevClass::Negation)
            }
        }
        _ => Ok(PrevClass::Other),
    }
}

/// Parse an escaped byte at `pos` (which holds the backslash) and add the
/// denoted byte to `group`. Returns the offset of the next unread byte.
fn read_escape(
    pattern: &[u8],
    pos: usize,
    group: &mut CharGroup,
) -> Result<usize, RegexError> {
    let Some(&escaped) = pattern.get(pos + 1) else {
        return Err(RegexError::new(pos, "`\\` at the end of the pattern"));
    };
    match escaped {
        b'n' => group.add(b'\n'),
        b't' => group.add(b'\t'),
        byte => group.add(byte),
    }
    Ok(pos + 2)
}

/// Parse a `[...]` class whose opening bracket is at `pos`, adding its bytes
/// to `group`. Returns the offset right after the closing bracket.
fn read_class(
    pattern: &[u8],
    pos: usize,
    group: &mut CharGroup,
) -> Result<usize, RegexError> {
    let mut idx = pos + 1;
    match pattern.get(idx) {
        None => return Err(RegexError::new(pos, "`[` is never closed")),
        Some(b']') => return Err(RegexError::new(idx, "empty character class `[]`")),
        Some(b'-') => {
            return Err(RegexError::new(idx, "`-` with no byte on its left in a class"))
        }
        _ => {}
    }
    while pattern.get(idx) != Some(&b']') {
        let Some(&byte) = pattern.get(idx) else {
            return Err(RegexError::new(idx, "missing `]` to close the class"));
        };
        match byte {
            b'\n' | b'\t' => {
                return Err(RegexError::new(
                    idx,
                    "raw newline or tab in a class, use `\\n` or `\\t`",
                ));
            }
            b'\\' => {
                idx = read_escape(pattern, idx, group)?;
                continue;
            }
            _ => {}
        }
        // Range lookahead: a `-` flanked by two bytes, neither of which is
        // the closing bracket.
        if pattern.get(idx + 1) == Some(&b'-') && idx + 2 < pattern.len() {
            if pattern[idx + 2] == b']' {
                return Err(RegexError::new(
                    idx + 1,
                    "`-` with no byte on its right in a class",
                ));
            }
            let (lo, hi) = (byte, pattern[idx + 2]);
            if lo > hi {
                return Err(RegexError::new(
                    idx,
                    format!("inverted range `{}-{}`", lo as char, hi as char),
                ));
            }
            group.add_range(lo, hi);
            idx += 3;
            if pattern.get(idx) == Some(&b'-') {
                return Err(RegexError::new(idx, "stray `-` after a range"));
            }
            continue;
        }
        if matches!(byte, b'+' | b'*' | b'?' | b'^' | b'[' | b'.') {
            return Err(RegexError::new(
                idx,
                format!("`{}` must be escaped inside a class", byte as char),
            ));
        }
        group.add(byte);
        idx += 1;
    }
    Ok(idx + 1)
}

/// Parse a pattern of the dialect into its compiled [`CharGroup`] sequence.
///
/// The dialect has, per atom: an optional leading `^` (negation), then a
/// literal byte, `.`, an escape or a `[...]` class, then an optional
/// quantifier among `*`, `+`, `?`. An empty pattern compiles to an empty
/// sequence, which matches any input consuming zero bytes.
pub fn read(pattern: &str) -> Result<Vec<CharGroup>, RegexError> {
    if let Some(position) = pattern.bytes().position(|byte| byte >= 0x80) {
        return Err(RegexError::new(
            position,
            "the dialect only covers the byte values 0-127",
        ));
    }
    let pattern = pattern.as_bytes();
    let mut compiled = Vec::new();
    let mut idx = 0;
    let mut prev = PrevClass::Other;
    while idx < pattern.len() {
        let byte = pattern[idx];
        if byte == b'\n' || byte == b'\t' {
            return Err(RegexError::new(
                idx,
                "raw newline or tab in a pattern, use `\\n` or `\\t`",
            ));
        }
        prev = operator_step(byte, prev, idx)?;
        let mut group = CharGroup::new();
        let byte = if byte == b'^' {
            group.negate();
            idx += 1;
            let Some(&next) = pattern.get(idx) else {
                return Err(RegexError::new(
                    idx - 1,
                    "`^` at the end of the pattern, with nothing to negate",
                ));
            };
            if next == b'\n' || next == b'\t' {
                return Err(RegexError::new(
                    idx,
                    "raw newline or tab in a pattern, use `\\n` or `\\t`",
                ));
            }
            prev = operator_step(next, prev, idx)?;
            next
        } else {
            byte
        };
        match byte {
            b'\\' => idx = read_escape(pattern, idx, &mut group)?,
            b'.' => {
                group.add_all();
                idx += 1;
            }
            b'[' => idx = read_class(pattern, idx, &mut group)?,
            b']' => return Err(RegexError::new(idx, "`]` with no matching `[`")),
            byte => {
                group.add(byte);
                idx += 1;
            }
        }
        if group.is_empty() {
            return Err(RegexError::new(idx, "character group holds no byte"));
        }
        if let Some(&quantifier @ (b'*' | b'+' | b'?')) = pattern.get(idx) {
            match quantifier {
                b'*' => group.set_zero_or_more(),
                b'+' => group.set_one_or_more(),
                _ => group.set_zero_or_one(),
            }
            prev = PrevClass::Operator;
            idx += 1;
        }
        compiled.push(group);
    }
    Ok(compiled)
}
