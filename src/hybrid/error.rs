use crate::nfa;

/// An error that occurs when initial construction of a lazy DFA fails.
///
/// A build error can only occur when building a lazy DFA from a pattern
/// string, in which case it wraps the error from building the underlying
/// NFA. Building a lazy DFA from an existing NFA never fails, since all
/// of the actual determinization work happens during search.
#[derive(Clone, Debug)]
pub struct BuildError {
    kind: BuildErrorKind,
}

#[derive(Clone, Debug)]
enum BuildErrorKind {
    NFA(nfa::thompson::BuildError),
}

impl BuildError {
    pub(crate) fn nfa(err: nfa::thompson::BuildError) -> BuildError {
        BuildError { kind: BuildErrorKind::NFA(err) }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind {
            BuildErrorKind::NFA(ref err) => Some(err),
        }
    }
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            BuildErrorKind::NFA(_) => write!(f, "error building NFA"),
        }
    }
}

/// An error that occurs when a lazy DFA's cache cannot hold another state.
///
/// A lazy DFA adds states to its cache as a search discovers them. When the
/// configured limit on the number of states is reached, the search in
/// progress stops and returns this error. The cache is left intact, so that
/// repeating a search over bytes it has already seen still succeeds, but a
/// caller that wants to make progress should either
/// [reset the cache](crate::hybrid::dfa::Cache::reset) or use a different
/// regex engine, such as the [`PikeVM`](crate::nfa::thompson::pikevm::PikeVM).
#[derive(Clone, Debug)]
pub struct CacheError {
    limit: usize,
}

impl CacheError {
    pub(crate) fn state_limit_exceeded(limit: usize) -> CacheError {
        CacheError { limit }
    }

    /// Returns the number of states the cache was permitted to hold.
    pub fn state_limit(&self) -> usize {
        self.limit
    }
}

impl std::error::Error for CacheError {}

impl core::fmt::Display for CacheError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "lazy DFA cache is full, it already holds the maximum of {} states",
            self.limit,
        )
    }
}
