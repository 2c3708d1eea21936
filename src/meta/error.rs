use crate::{nfa, syntax};

/// An error that occurs when compiling a pattern.
///
/// This wraps the errors of each compilation phase. Use
/// [`BuildError::kind`] to find out what went wrong without caring about
/// which phase caught it, or [`BuildError::syntax_error`] to get at the
/// details of a malformed pattern, such as the offset of the problem.
#[derive(Clone, Debug)]
pub struct BuildError {
    kind: BuildErrorKind,
}

#[derive(Clone, Debug)]
enum BuildErrorKind {
    Syntax(syntax::Error),
    NFA(nfa::thompson::BuildError),
}

/// A coarse classification of a [`BuildError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The pattern is malformed.
    Syntax(syntax::ErrorKind),
    /// The compiled NFA would exceed its configured size limit.
    TooManyStates,
    /// Compilation failed because of a bug in this crate rather than a
    /// problem with the pattern.
    Internal,
}

impl BuildError {
    pub(crate) fn syntax(err: syntax::Error) -> BuildError {
        BuildError { kind: BuildErrorKind::Syntax(err) }
    }

    pub(crate) fn nfa(err: nfa::thompson::BuildError) -> BuildError {
        BuildError { kind: BuildErrorKind::NFA(err) }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        if let Some(err) = self.syntax_error() {
            return ErrorKind::Syntax(err.kind());
        }
        if self.state_limit().is_some() {
            return ErrorKind::TooManyStates;
        }
        ErrorKind::Internal
    }

    /// If the pattern was malformed, return the syntax error describing
    /// why.
    pub fn syntax_error(&self) -> Option<&syntax::Error> {
        match self.kind {
            BuildErrorKind::Syntax(ref err) => Some(err),
            BuildErrorKind::NFA(ref err) => err.syntax_error(),
        }
    }

    /// If the NFA exceeded its size limit, return that limit.
    pub fn state_limit(&self) -> Option<usize> {
        match self.kind {
            BuildErrorKind::Syntax(_) => None,
            BuildErrorKind::NFA(ref err) => err.state_limit(),
        }
    }

    /// Returns true if and only if this error was caused by a bug in this
    /// crate rather than by the pattern.
    pub fn is_internal(&self) -> bool {
        match self.kind {
            BuildErrorKind::Syntax(_) => false,
            BuildErrorKind::NFA(ref err) => err.is_internal(),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind {
            BuildErrorKind::Syntax(ref err) => Some(err),
            BuildErrorKind::NFA(ref err) => Some(err),
        }
    }
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            BuildErrorKind::Syntax(_) => write!(f, "error parsing pattern"),
            BuildErrorKind::NFA(_) => write!(f, "error building NFA"),
        }
    }
}
