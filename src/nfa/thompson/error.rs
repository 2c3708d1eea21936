use crate::{syntax, util::id::StateID};

/// An error that can occur during the construction of a Thompson NFA.
///
/// This error does not provide many introspection capabilities. There are
/// generally only a few things you can do with it:
///
/// * Obtain a human readable message via its `std::fmt::Display` impl.
/// * Access an underlying [`syntax::Error`] via [`BuildError::syntax_error`]
/// or the `source` method of the `std::error::Error` trait. This error only
/// occurs when using convenience routines for building an NFA directly from
/// a pattern string.
/// * Ask whether the error was caused by a state limit being exceeded, see
/// [`Config::nfa_size_limit`](crate::nfa::thompson::Config::nfa_size_limit).
/// * Ask whether the error is internal, which means it was caused by a bug
/// in this crate rather than by the pattern.
#[derive(Clone, Debug)]
pub struct BuildError {
    kind: BuildErrorKind,
}

/// The kind of error that occurred during the construction of a Thompson NFA.
#[derive(Clone, Debug)]
enum BuildErrorKind {
    /// An error that occurred while turning the pattern into postfix
    /// symbols.
    Syntax(syntax::Error),
    /// An error that occurs if too many states are produced while building
    /// an NFA.
    TooManyStates {
        /// The minimum number of states that are desired, which exceeds the
        /// limit.
        given: usize,
        /// The limit on the number of states.
        limit: usize,
    },
    /// The postfix symbols did not reduce to exactly one fragment. This is
    /// never caused by a pattern that passed syntax checking.
    MalformedPostfix {
        /// The number of fragments left on the stack.
        fragments: usize,
    },
    /// A state still had an unpatched transition when the NFA was finished.
    DanglingTransition {
        /// The state with the unpatched transition.
        state: StateID,
    },
}

impl BuildError {
    /// If this error was caused by a malformed pattern, return the syntax
    /// error describing it.
    pub fn syntax_error(&self) -> Option<&syntax::Error> {
        match self.kind {
            BuildErrorKind::Syntax(ref err) => Some(err),
            _ => None,
        }
    }

    /// If this error occurred because the NFA exceeded its state limit, then
    /// this returns the limit that was exceeded.
    pub fn state_limit(&self) -> Option<usize> {
        match self.kind {
            BuildErrorKind::TooManyStates { limit, .. } => Some(limit),
            _ => None,
        }
    }

    /// Returns true if and only if this error indicates a bug in the
    /// compiler rather than a problem with the pattern.
    ///
    /// Such errors are reported rather than causing a panic, but they are
    /// kept apart from syntax errors so that callers never present them to
    /// an end user as something they did wrong.
    pub fn is_internal(&self) -> bool {
        matches!(
            self.kind,
            BuildErrorKind::MalformedPostfix { .. }
                | BuildErrorKind::DanglingTransition { .. }
        )
    }

    pub(crate) fn syntax(err: syntax::Error) -> BuildError {
        BuildError { kind: BuildErrorKind::Syntax(err) }
    }

    pub(crate) fn too_many_states(given: usize, limit: usize) -> BuildError {
        BuildError { kind: BuildErrorKind::TooManyStates { given, limit } }
    }

    pub(crate) fn malformed_postfix(fragments: usize) -> BuildError {
        BuildError { kind: BuildErrorKind::MalformedPostfix { fragments } }
    }

    pub(crate) fn dangling_transition(state: StateID) -> BuildError {
        BuildError { kind: BuildErrorKind::DanglingTransition { state } }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind {
            BuildErrorKind::Syntax(ref err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            BuildErrorKind::Syntax(_) => write!(f, "error parsing regex"),
            BuildErrorKind::TooManyStates { given, limit } => write!(
                f,
                "attempted to compile {} NFA states, \
                 which exceeds the limit of {}",
                given, limit,
            ),
            BuildErrorKind::MalformedPostfix { fragments } => write!(
                f,
                "internal error: postfix expression reduced to {} \
                 fragments instead of 1",
                fragments,
            ),
            BuildErrorKind::DanglingTransition { state } => write!(
                f,
                "internal error: NFA state {} has an unpatched transition",
                state.as_usize(),
            ),
        }
    }
}
