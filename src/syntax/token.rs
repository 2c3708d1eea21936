use std::sync::Arc;

/// The kind of a single lexical token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    /// A single character that matches itself.
    Literal,
    /// A bracketed character class, e.g., `[a-z]`. Shorthand escapes such as
    /// `\d` are also represented this way, with their bracketed spelling as
    /// the token text.
    CharClass,
    /// One of the repetition operators `*`, `+` or `?`.
    Operator,
    /// `(`
    GroupOpen,
    /// `)`
    GroupClose,
    /// `^`
    AnchorStart,
    /// `$`
    AnchorEnd,
    /// A bounded repetition such as `{2,4}`. The token text includes the
    /// braces.
    Quantifier,
    /// `|`
    Alternation,
    /// `.`
    Wildcard,
    /// A sentinel marking the end of the pattern. Every token sequence
    /// produced by the tokenizer ends with exactly one of these.
    End,
}

/// A single token of a pattern.
///
/// Tokens are immutable once produced. The text of a token is reference
/// counted, which makes copying tokens (as the quantifier expander does
/// heavily) cheap.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Token {
    kind: TokenKind,
    text: Arc<str>,
}

impl Token {
    /// Create a new token with the given kind and text.
    ///
    /// Callers must ensure that the text agrees with the kind. Outside of
    /// this crate, tokens are made with the typed constructors instead.
    pub(crate) fn new(kind: TokenKind, text: &str) -> Token {
        Token { kind, text: Arc::from(text) }
    }

    /// Create a literal token for the given character.
    pub fn literal(ch: char) -> Token {
        let mut buf = [0; 4];
        Token::new(TokenKind::Literal, ch.encode_utf8(&mut buf))
    }

    /// Create a repetition operator token.
    ///
    /// This panics if `op` is not one of `*`, `+` or `?`.
    pub fn operator(op: char) -> Token {
        assert!(
            matches!(op, '*' | '+' | '?'),
            "{:?} is not a repetition operator",
            op,
        );
        let mut buf = [0; 4];
        Token::new(TokenKind::Operator, op.encode_utf8(&mut buf))
    }

    /// Create a character class token from its bracketed spelling, e.g.,
    /// `[a-z]` or `[^0-9]`.
    ///
    /// The text is not validated here. A class whose text lacks the
    /// surrounding brackets is read as if they were present.
    pub fn class(text: &str) -> Token {
        Token::new(TokenKind::CharClass, text)
    }

    /// Create a bounded quantifier token from its spelling, including the
    /// braces, e.g., `{2,4}`.
    ///
    /// The text is only checked when the quantifier is expanded, at which
    /// point malformed bounds are reported as
    /// [`MalformedQuantifier`](crate::syntax::ErrorKind::MalformedQuantifier).
    pub fn quantifier(text: &str) -> Token {
        Token::new(TokenKind::Quantifier, text)
    }

    /// Create a token whose text is implied by its kind, e.g., `(` for
    /// `GroupOpen`.
    ///
    /// This panics when given a kind whose text varies, i.e., `Literal`,
    /// `CharClass`, `Operator` or `Quantifier`.
    pub fn simple(kind: TokenKind) -> Token {
        let text = match kind {
            TokenKind::GroupOpen => "(",
            TokenKind::GroupClose => ")",
            TokenKind::AnchorStart => "^",
            TokenKind::AnchorEnd => "$",
            TokenKind::Alternation => "|",
            TokenKind::Wildcard => ".",
            TokenKind::End => "",
            _ => panic!("token kind {:?} requires explicit text", kind),
        };
        Token::new(kind, text)
    }

    /// Create the end-of-pattern sentinel.
    pub fn end() -> Token {
        Token::simple(TokenKind::End)
    }

    /// Return the kind of this token.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Return the text of this token.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Return the shared text of this token.
    pub(crate) fn shared_text(&self) -> &Arc<str> {
        &self.text
    }

    /// If this is a literal, return the character it matches.
    pub fn as_literal(&self) -> Option<char> {
        if self.kind != TokenKind::Literal {
            return None;
        }
        self.text.chars().next()
    }

    /// Returns true if this token, on its own, is a complete thing that a
    /// repetition operator can apply to.
    pub(crate) fn is_atom(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Literal
                | TokenKind::CharClass
                | TokenKind::Wildcard
                | TokenKind::AnchorStart
                | TokenKind::AnchorEnd
        )
    }
}

impl core::fmt::Debug for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            TokenKind::End => write!(f, "End"),
            kind => write!(f, "{:?}({:?})", kind, self.text()),
        }
    }
}
