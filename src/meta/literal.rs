use memchr::memmem;

use crate::meta::regex::MatchMode;

/// The bytes that give a pattern any meaning beyond its literal text.
const META: &[u8] = b".*+?[]{}()^$|\\";

/// Returns true if the pattern contains none of the characters
/// `.*+?[]{}()^$|\`, in which case it only ever matches its own text.
///
/// The empty pattern is not a literal, since it fails to compile.
pub fn is_simple_literal(pattern: &str) -> bool {
    !pattern.is_empty() && !pattern.bytes().any(|b| META.contains(&b))
}

/// A matcher for patterns without metacharacters, which skips building and
/// walking automata entirely.
#[derive(Clone, Debug)]
pub(crate) struct Literal {
    finder: memmem::Finder<'static>,
    mode: MatchMode,
}

impl Literal {
    /// Build a literal matcher for the given pattern, or return `None` if
    /// the pattern has metacharacters.
    pub(crate) fn new(pattern: &str, mode: MatchMode) -> Option<Literal> {
        if !is_simple_literal(pattern) {
            return None;
        }
        debug!("using literal fast path for {:?} ({:?})", pattern, mode);
        let finder = memmem::Finder::new(pattern.as_bytes()).into_owned();
        Some(Literal { finder, mode })
    }

    pub(crate) fn is_match(&self, haystack: &[u8]) -> bool {
        match self.mode {
            MatchMode::Full => haystack == self.finder.needle(),
            MatchMode::Substring => self.finder.find(haystack).is_some(),
        }
    }

    pub(crate) fn memory_usage(&self) -> usize {
        self.finder.needle().len()
    }
}
