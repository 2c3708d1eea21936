/// An error that occurred while turning a pattern into postfix symbols.
///
/// Every error of this type is caused by the pattern given by the caller. It
/// can be inspected via [`Error::kind`], and lexical errors additionally
/// report the byte offset in the pattern at which they were detected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    offset: Option<usize>,
}

/// The kind of syntax error that occurred.
///
/// This enum may grow new variants in future releases.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The pattern contained no atoms at all.
    EmptyPattern,
    /// A `{...}` span was not a valid repetition bound. This covers spans
    /// with characters other than digits and commas, unterminated spans,
    /// missing or overflowing numbers and a minimum larger than the maximum.
    MalformedQuantifier,
    /// A repetition operator or quantifier had nothing to apply to.
    DanglingOperator,
    /// A group `()` contained no atoms.
    EmptyGroup,
    /// One side of an alternation was empty, as in `a|` or `(|a)`.
    EmptyAlternation,
    /// A `[` was never closed.
    UnclosedClass,
    /// The pattern ended with a lone `\`.
    TrailingEscape,
    /// A `)` had no matching `(` or a `(` was never closed.
    UnbalancedGroup,
    /// A quantifier token reached the postfix converter. Quantifiers must be
    /// rewritten by the expander first.
    UnexpandedQuantifier,
    /// Expanding bounded quantifiers would produce more NFA states than the
    /// configured limit permits.
    ExpansionTooLarge,
}

impl Error {
    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the byte offset into the pattern at which this error was
    /// detected, when it is known.
    ///
    /// Only errors found by the tokenizer carry an offset. Errors found
    /// after tokenization refer to tokens rather than to pattern text.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error { kind, offset: None }
    }

    pub(crate) fn at(kind: ErrorKind, offset: usize) -> Error {
        Error { kind, offset: Some(offset) }
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self.kind {
            ErrorKind::EmptyPattern => "empty pattern",
            ErrorKind::MalformedQuantifier => "malformed repetition quantifier",
            ErrorKind::DanglingOperator => {
                "repetition operator is missing an expression to repeat"
            }
            ErrorKind::EmptyGroup => "empty group",
            ErrorKind::EmptyAlternation => "empty alternation branch",
            ErrorKind::UnclosedClass => "unclosed character class",
            ErrorKind::TrailingEscape => "incomplete escape sequence",
            ErrorKind::UnbalancedGroup => "unbalanced parentheses",
            ErrorKind::UnexpandedQuantifier => {
                "bounded quantifier was not expanded before conversion"
            }
            ErrorKind::ExpansionTooLarge => {
                "bounded repetition exceeds the NFA size limit"
            }
        };
        match self.offset {
            None => write!(f, "{}", msg),
            Some(offset) => write!(f, "{} at offset {}", msg, offset),
        }
    }
}
