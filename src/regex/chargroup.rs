use fixedbitset::FixedBitSet;
use itertools::Itertools;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let mut group = CharGroup::new();
        assert!(group.is_empty());
        group.add(b'a');
        group.add(b'a');
        assert!(!group.is_empty());
        assert!(group.contains(b'a'));
        assert!(!group.contains(b'b'));
        assert!(!group.contains(0x80));
        assert!(!group.contains(0xff));
    }

    #[test]
    fn all_bytes() {
        let mut group = CharGroup::new();
        group.add_all();
        for byte in 0..0x80 {
            assert!(group.contains(byte));
        }
        assert!(!group.contains(0x80));
    }

    #[test]
    fn range() {
        let mut group = CharGroup::new();
        group.add_range(b'a', b'z');
        assert!(group.contains(b'a'));
        assert!(group.contains(b'm'));
        assert!(group.contains(b'z'));
        assert!(!group.contains(b'A'));
        assert!(!group.contains(b'{'));
    }

    #[test]
    fn range_upper_bound_is_inclusive() {
        let mut group = CharGroup::new();
        group.add_range(0x7c, 0x7f);
        assert!(group.contains(0x7c));
        assert!(group.contains(0x7f));
        assert!(!group.contains(0x7b));
        assert!(!group.contains(0x80));
    }

    #[test]
    fn negation_is_not_applied_by_contains() {
        let mut group = CharGroup::new();
        group.add(b'a');
        group.negate();
        assert!(group.negated());
        // `contains` always answers about the raw membership set;
        // interpreting the negation flag is the matcher's job.
        assert!(group.contains(b'a'));
        assert!(!group.contains(b'b'));
    }

    #[test]
    fn quantifier_precedence() {
        let mut group = CharGroup::new();
        assert_eq!(group.quantifier(), None);
        group.set_one_or_more();
        assert_eq!(group.quantifier(), Some(Quantifier::OneOrMore));
        group.set_zero_or_one();
        assert_eq!(group.quantifier(), Some(Quantifier::ZeroOrOne));
        group.set_zero_or_more();
        assert_eq!(group.quantifier(), Some(Quantifier::ZeroOrMore));
    }

    #[test]
    fn display() {
        let mut group = CharGroup::new();
        group.add_range(b'a', b'd');
        group.add(b'\n');
        assert_eq!(group.to_string(), r#"One in "\na-d", one time."#);
        group.negate();
        group.set_zero_or_more();
        assert_eq!(
            group.to_string(),
            r#"One not in "\na-d", zero or more times."#
        );
    }
}

/// The number of distinct byte values a [`CharGroup`] ranges over.
pub const BYTE_VALUES: usize = 0x80;

/// # Summary
///
/// The repetition attached to a [`CharGroup`]: `*`, `+` or `?`.
/// A group without quantifier matches exactly one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    ZeroOrMore,
    OneOrMore,
    ZeroOrOne,
}

/// # Summary
///
/// `CharGroup` is the atomic unit of a compiled pattern: a membership set
/// over the byte values 0–127, a negation flag, and an optional
/// [`Quantifier`]. It is built once by the compiler and never mutated
/// afterwards.
///
/// # Methods
///
/// `add`: add one byte to the membership set (idempotent).
/// `add_range`: add an inclusive range of bytes.
/// `add_all`: add every byte 0–127 (the `.` atom).
/// `contains`: raw membership query, ignoring the negation flag.
/// `negate`/`negated`: set/read the negation flag.
/// `set_zero_or_more`/`set_one_or_more`/`set_zero_or_one`: attach a quantifier.
/// `quantifier`: which quantifier is attached, if any.
/// `is_empty`: whether the membership set holds no byte at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharGroup {
    set: FixedBitSet,
    negated: bool,
    // The three quantifiers are kept as independent flags; `quantifier`
    // resolves them with star over question over plus. The compiler only
    // ever sets one.
    star: bool,
    plus: bool,
    question: bool,
}

impl CharGroup {
    /// Create an empty, non-negated, unquantified group.
    pub fn new() -> Self {
        Self {
            set: FixedBitSet::with_capacity(BYTE_VALUES),
            ..Self::default()
        }
    }

    /// Add `byte` to the membership set. Adding a byte twice is a no-op.
    pub fn add(&mut self, byte: u8) {
        debug_assert!((byte as usize) < BYTE_VALUES);
        self.set.insert(byte as usize);
    }

    /// Add every byte of `lo..=hi` to the membership set.
    pub fn add_range(&mut self, lo: u8, hi: u8) {
        debug_assert!(lo <= hi && (hi as usize) < BYTE_VALUES);
        // `insert_range` only takes half-open ranges; `hi < 128` so the
        // upper bound cannot overflow.
        self.set.insert_range(lo as usize..hi as usize + 1);
    }

    /// Add every byte 0–127 to the membership set.
    pub fn add_all(&mut self) {
        self.set.insert_range(..);
    }

    /// Return whether `byte` belongs to the membership set. The negation
    /// flag is *not* applied here; the matcher combines both.
    pub fn contains(&self, byte: u8) -> bool {
        self.set.contains(byte as usize)
    }

    /// Mark the group as negated.
    pub fn negate(&mut self) {
        self.negated = true;
    }

    /// Return whether the group is negated.
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// Attach the `*` quantifier.
    pub fn set_zero_or_more(&mut self) {
        self.star = true;
    }

    /// Attach the `+` quantifier.
    pub fn set_one_or_more(&mut self) {
        self.plus = true;
    }

    /// Attach the `?` quantifier.
    pub fn set_zero_or_one(&mut self) {
        self.question = true;
    }

    /// Return the quantifier attached to the group, if any. If several
    /// flags were ever set, `*` takes precedence over `?`, which takes
    /// precedence over `+`.
    pub fn quantifier(&self) -> Option<Quantifier> {
        if self.star {
            Some(Quantifier::ZeroOrMore)
        } else if self.question {
            Some(Quantifier::ZeroOrOne)
        } else if self.plus {
            Some(Quantifier::OneOrMore)
        } else {
            None
        }
    }

    /// Return whether the membership set holds no byte at all.
    pub fn is_empty(&self) -> bool {
        self.set.count_ones(..) == 0
    }
}

fn write_byte(f: &mut std::fmt::Formatter<'_>, byte: u8) -> std::fmt::Result {
    match byte {
        b'\n' => write!(f, r"\n"),
        b'\t' => write!(f, r"\t"),
        0x21..=0x7e | b' ' => write!(f, "{}", byte as char),
        _ => write!(f, r"\x{byte:02x}"),
    }
}

impl std::fmt::Display for CharGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "One not in \"")?;
        } else {
            write!(f, "One in \"")?;
        }
        let runs = self.set.ones().map(|b| (b, b)).coalesce(|left, right| {
            if left.1 + 1 == right.0 {
                Ok((left.0, right.1))
            } else {
                Err((left, right))
            }
        });
        for (start, end) in runs {
            write_byte(f, start as u8)?;
            if end > start {
                if end - start > 1 {
                    write!(f, "-")?;
                }
                write_byte(f, end as u8)?;
            }
        }
        write!(f, "\", ")?;
        match self.quantifier() {
            Some(Quantifier::ZeroOrMore) => write!(f, "zero or more times."),
            Some(Quantifier::OneOrMore) => write!(f, "one or more times."),
            Some(Quantifier::ZeroOrOne) => write!(f, "zero or one time."),
            None => write!(f, "one time."),
        }
    }
}
