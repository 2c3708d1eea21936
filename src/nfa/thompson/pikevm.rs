/*!
An NFA simulation that steps a set of active states over the haystack.

This is a Thompson/Pike style simulation restricted to answering whether a
haystack matches. It never backtracks and runs in `O(m * n)` time, where `m`
is the number of NFA states and `n` is the length of the haystack.
*/

use crate::{
    nfa::thompson::{error::BuildError, State, NFA},
    util::{
        id::StateID,
        state_set::{StateSet, StateSets},
    },
};

/// A simulation of a Thompson NFA.
///
/// A `PikeVM` is cheap to clone and can be shared between threads. The
/// mutable scratch space needed during a search lives in a separate
/// [`Cache`], which must not be used by two searches at the same time.
///
/// # Example
///
/// ```
/// use regex_hybrid::nfa::thompson::pikevm::PikeVM;
///
/// let vm = PikeVM::new("a(b|c)*")?;
/// let mut cache = vm.create_cache();
/// assert!(vm.is_match(&mut cache, b"abcb"));
/// assert!(!vm.is_match(&mut cache, b"abd"));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct PikeVM {
    nfa: NFA,
}

impl PikeVM {
    /// Parse the given pattern and build a PikeVM for it using the default
    /// NFA configuration.
    pub fn new(pattern: &str) -> Result<PikeVM, BuildError> {
        NFA::new(pattern).map(PikeVM::new_from_nfa)
    }

    /// Create a PikeVM that searches the given NFA.
    pub fn new_from_nfa(nfa: NFA) -> PikeVM {
        PikeVM { nfa }
    }

    /// Create a new cache for this PikeVM.
    pub fn create_cache(&self) -> Cache {
        Cache::new(self)
    }

    /// Return the NFA that this PikeVM searches.
    pub fn nfa(&self) -> &NFA {
        &self.nfa
    }

    /// Returns true if and only if the NFA, starting at its start state,
    /// ends in its match state after consuming all of `haystack`.
    ///
    /// Whether this is a whole-haystack match or a substring match is a
    /// property of the NFA. See
    /// [`Config::unanchored`](crate::nfa::thompson::Config::unanchored).
    ///
    /// This panics if the cache was not created for an NFA of the same
    /// size as this one.
    pub fn is_match(&self, cache: &mut Cache, haystack: &[u8]) -> bool {
        let Cache { ref mut stack, ref mut sets } = *cache;
        sets.clear();
        self.epsilon_closure(
            stack,
            &mut sets.set1,
            self.nfa.start(),
            0,
            haystack.len(),
        );
        for (at, &byte) in haystack.iter().enumerate() {
            if sets.set1.is_empty() {
                return false;
            }
            sets.set2.clear();
            self.step(
                stack,
                &sets.set1,
                &mut sets.set2,
                byte,
                at + 1,
                haystack.len(),
            );
            sets.swap();
        }
        let matched = sets.set1.contains(self.nfa.match_state());
        trace!(
            "PikeVM searched {} bytes, {} states active at end, match: {}",
            haystack.len(),
            sets.set1.len(),
            matched,
        );
        matched
    }

    /// Follow every transition on `byte` out of `curr`, adding the epsilon
    /// closure of each target to `next`. `at` is the position after `byte`.
    #[inline(always)]
    fn step(
        &self,
        stack: &mut Vec<StateID>,
        curr: &StateSet,
        next: &mut StateSet,
        byte: u8,
        at: usize,
        len: usize,
    ) {
        for sid in curr {
            if let Some(to) = self.nfa.state(sid).matches_byte(byte) {
                self.epsilon_closure(stack, next, to, at, len);
            }
        }
    }

    /// Add every state reachable from `sid` without consuming input to
    /// `set`. Anchors are resolved against the position `at` in a haystack
    /// of length `len`, and any anchor that does not hold is a dead end.
    fn epsilon_closure(
        &self,
        stack: &mut Vec<StateID>,
        set: &mut StateSet,
        sid: StateID,
        at: usize,
        len: usize,
    ) {
        stack.push(sid);
        while let Some(mut sid) = stack.pop() {
            loop {
                if !set.visit(sid) {
                    break;
                }
                match *self.nfa.state(sid) {
                    State::Char { .. }
                    | State::CharSet { .. }
                    | State::Match => {
                        set.push(sid);
                        break;
                    }
                    State::Split { out1, out2 } => {
                        stack.push(out2);
                        sid = out1;
                    }
                    State::AnchorStart { next } => {
                        if at != 0 {
                            break;
                        }
                        sid = next;
                    }
                    State::AnchorEnd { next } => {
                        if at != len {
                            break;
                        }
                        sid = next;
                    }
                }
            }
        }
    }
}

/// A cache represents mutable state that a [`PikeVM`] requires during a
/// search.
///
/// For a given PikeVM, its corresponding cache may be created either via
/// [`PikeVM::create_cache`] or via [`Cache::new`]. They are equivalent in
/// every way, except the former does not require explicitly importing
/// `Cache`.
///
/// A cache holds two sets of active states and a stack used for computing
/// epsilon closures. Each set records visits with a generation counter, so
/// moving from one byte of the haystack to the next never needs to touch
/// every NFA state.
#[derive(Clone, Debug)]
pub struct Cache {
    stack: Vec<StateID>,
    sets: StateSets,
}

impl Cache {
    /// Create a new cache for the given PikeVM.
    pub fn new(vm: &PikeVM) -> Cache {
        Cache { stack: vec![], sets: StateSets::new(vm.nfa().len()) }
    }

    /// Reset this cache such that it can be used with the given PikeVM,
    /// which may differ from the one this cache was created for.
    pub fn reset(&mut self, vm: &PikeVM) {
        self.stack.clear();
        self.sets = StateSets::new(vm.nfa().len());
    }

    /// Returns the heap memory usage, in bytes, of this cache.
    pub fn memory_usage(&self) -> usize {
        self.stack.capacity() * StateID::SIZE + self.sets.memory_usage()
    }
}
