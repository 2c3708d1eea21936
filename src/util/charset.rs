/*!
A small set of ASCII bytes used by character class states.

Character classes in this crate are deliberately not Unicode aware. A
[`CharacterSet`] is a 128-bit membership set over the ASCII range plus a
negation flag. Every byte outside the ASCII range is treated as a member only
when the set is negated: such a byte is "not in" any bounded set that a pattern
can spell out.
*/

use crate::util::escape::DebugByte;

/// A set of ASCII bytes with an optional negation.
///
/// Membership is computed against the stored bits first and the negation flag
/// is applied afterwards. For example, the class `[^0-9]` is represented by
/// the bits for `0` through `9` with `negated` set, and thus contains `x`,
/// `\n` and every non-ASCII byte.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct CharacterSet {
    bits: u128,
    negated: bool,
}

impl CharacterSet {
    /// Create a new empty set. An empty set that isn't negated matches
    /// nothing.
    pub fn empty() -> CharacterSet {
        CharacterSet { bits: 0, negated: false }
    }

    /// Create a set that contains every possible byte.
    pub fn any() -> CharacterSet {
        CharacterSet { bits: 0, negated: true }
    }

    /// Add the given byte to this set.
    ///
    /// Bytes outside the ASCII range cannot be represented and are ignored.
    pub fn add(&mut self, byte: u8) {
        if byte < 0x80 {
            self.bits |= 1 << byte;
        }
    }

    /// Add every byte in the inclusive range `start..=end` to this set.
    ///
    /// The portion of the range outside of ASCII is ignored.
    pub fn add_range(&mut self, start: u8, end: u8) {
        for byte in start..=end.min(0x7F) {
            self.add(byte);
        }
    }

    /// Set whether this set is negated.
    pub fn set_negated(&mut self, yes: bool) {
        self.negated = yes;
    }

    /// Returns true if and only if this set is negated.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns true if and only if the given byte is a member of this set.
    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        if byte >= 0x80 {
            return self.negated;
        }
        let in_set = self.bits & (1 << byte) != 0;
        in_set != self.negated
    }

    /// Returns an iterator over the ASCII bytes whose bits are set, ignoring
    /// the negation flag.
    fn iter_bits(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..0x80).filter(move |&b| self.bits & (1 << b) != 0)
    }
}

impl core::fmt::Debug for CharacterSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[")?;
        if self.negated {
            write!(f, "^")?;
        }
        let mut bytes = self.iter_bits().peekable();
        while let Some(start) = bytes.next() {
            let mut end = start;
            while bytes.peek() == Some(&(end + 1)) {
                end = bytes.next().unwrap();
            }
            if start == end {
                write!(f, "{:?}", DebugByte(start))?;
            } else {
                write!(f, "{:?}-{:?}", DebugByte(start), DebugByte(end))?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let mut set = CharacterSet::empty();
        set.add_range(b'0', b'9');
        set.add(b'_');
        assert!(set.contains(b'5'));
        assert!(set.contains(b'_'));
        assert!(!set.contains(b'a'));
        assert!(!set.contains(0xFF));

        set.set_negated(true);
        assert!(!set.contains(b'5'));
        assert!(set.contains(b'a'));
        assert!(set.contains(0xFF));
    }

    #[test]
    fn non_ascii_is_ignored() {
        let mut set = CharacterSet::empty();
        set.add(0xE9);
        set.add_range(b'z', 0xFF);
        assert!(set.contains(b'z'));
        assert!(set.contains(0x7F));
        assert!(!set.contains(0xE9));
    }

    #[test]
    fn any_and_empty() {
        for b in 0..=255u8 {
            assert!(CharacterSet::any().contains(b));
            assert!(!CharacterSet::empty().contains(b));
        }
    }

    #[test]
    fn debug_collapses_ranges() {
        let mut set = CharacterSet::empty();
        set.add_range(b'a', b'c');
        set.add(b'x');
        set.set_negated(true);
        assert_eq!("[^a-cx]", format!("{:?}", set));
    }
}
