use crate::syntax::{Token, TokenKind};

/// Metadata about the features a pattern uses.
///
/// This is computed from the tokens of a pattern *before* bounded
/// quantifiers are expanded, so it reflects what was written rather than
/// the size of the compiled NFA. The strategy heuristic uses it to estimate
/// how expensive determinizing the pattern is likely to be.
///
/// # Example
///
/// ```
/// use regex_hybrid::{meta::Complexity, syntax};
///
/// let tokens = syntax::tokenize("(cat|dog)s")?;
/// let complexity = Complexity::analyze(&tokens);
/// assert!(complexity.has_alternation());
/// assert!(complexity.has_complex_features());
/// // 10 pattern tokens, plus the end marker.
/// assert_eq!(11, complexity.token_count());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Complexity {
    has_complex_features: bool,
    has_quantifiers: bool,
    has_alternation: bool,
    has_wildcards: bool,
    token_count: usize,
}

impl Complexity {
    /// Scan the given tokens once and record which features they use.
    pub fn analyze(tokens: &[Token]) -> Complexity {
        let mut c = Complexity {
            token_count: tokens.len(),
            ..Complexity::default()
        };
        let (mut classes, mut groups) = (false, false);
        for t in tokens {
            match t.kind() {
                TokenKind::Quantifier => c.has_quantifiers = true,
                TokenKind::Alternation => c.has_alternation = true,
                TokenKind::Wildcard => c.has_wildcards = true,
                TokenKind::CharClass => classes = true,
                TokenKind::GroupOpen => groups = true,
                _ => {}
            }
        }
        c.has_complex_features =
            c.has_quantifiers || c.has_alternation || classes || groups;
        c
    }

    /// Returns true when the pattern uses a bounded quantifier, an
    /// alternation, a character class or a group.
    ///
    /// Wildcards and the `*`, `+` and `?` operators do not count.
    pub fn has_complex_features(&self) -> bool {
        self.has_complex_features
    }

    /// Returns true when the pattern uses a bounded quantifier such as
    /// `{2,4}`.
    pub fn has_quantifiers(&self) -> bool {
        self.has_quantifiers
    }

    pub fn has_alternation(&self) -> bool {
        self.has_alternation
    }

    pub fn has_wildcards(&self) -> bool {
        self.has_wildcards
    }

    /// Returns the number of tokens in the pattern, including the end
    /// marker.
    pub fn token_count(&self) -> usize {
        self.token_count
    }
}
