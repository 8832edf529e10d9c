use super::chargroup::{CharGroup, Quantifier};


/// Whether `group` accepts `byte`: raw membership, flipped when the group is
/// negated.
fn held(group: &CharGroup, byte: u8) -> bool {
    group.contains(byte) ^ group.negated()
}

/// # Summary
///
/// Match `compiled` against the start of `input`, greedily and without
/// backtracking: each group consumes as much as its quantifier allows, then
/// hands over to the next one; the first group to fail fails the whole
/// match. Trailing input beyond the compiled sequence is never looked at.
///
/// Returns the end offset of the match (the number of consumed bytes), or
/// `None` if some group failed.
pub fn find(compiled: &[CharGroup], input: &[u8]) -> Option<usize> {
    let mut pos = 0;
    for group in compiled {
        match group.quantifier() {
            Some(Quantifier::ZeroOrMore) => {
                while pos < input.len() && held(group, input[pos]) {
                    pos += 1;
                }
            }
            Some(Quantifier::ZeroOrOne) => {
                if pos < input.len() && held(group, input[pos]) {
                    pos += 1;
                }
            }
            Some(Quantifier::OneOrMore) => {
                if pos >= input.len() || !held(group, input[pos]) {
                    return None;
                }
                while pos < input.len() && held(group, input[pos]) {
                    pos += 1;
                }
            }
            None => {
                if pos < input.len() && held(group, input[pos]) {
                    pos += 1;
                } else {
                    return None;
                }
            }
        }
    }
    Some(pos)
}
