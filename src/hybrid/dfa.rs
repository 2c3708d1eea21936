/*!
Types and routines specific to lazy DFAs.

This module is the home of [`hybrid::dfa::DFA`](DFA), which is a DFA that
is built from a Thompson NFA one state at a time, and only for the states
that a search actually visits.
*/

use std::{collections::HashMap, iter, mem::size_of};

use crate::{
    hybrid::{
        error::{BuildError, CacheError},
        id::LazyStateID,
        state::State,
    },
    nfa::thompson,
    util::{determinize, id::StateID, state_set::StateSets},
};

/// The number of bits needed to address every transition of one state.
const STRIDE2: usize = 8;

/// The number of transitions of each state, one for every possible byte.
const STRIDE: usize = 1 << STRIDE2;

/// The default limit on the number of states in a cache. With 256
/// transitions of 4 bytes each, a full cache uses about 2MB.
const DEFAULT_STATE_LIMIT: usize = 2_000;

/// A map from states to state identifiers.
///
/// The main purpose of this map is to reuse states where possible: two sets
/// of NFA states with the same members always map to the same DFA state.
type StateMap = HashMap<State, LazyStateID>;

/// A hybrid NFA/DFA (also called a "lazy DFA") for regex searching.
///
/// A lazy DFA is a DFA that builds itself at search time. It otherwise has
/// very similar characteristics as a fully compiled DFA: each byte of the
/// haystack is handled by a single table lookup, once the state for it has
/// been computed. Computing a state means performing subset construction
/// on the underlying [`thompson::NFA`]: the set of NFA states reachable
/// from the current set on the given byte becomes a new DFA state, unless
/// an equal set was seen before.
///
/// All of the computed states and transitions live in a [`Cache`], which
/// is separate from the DFA itself. A `DFA` is therefore immutable, cheap to
/// clone and can be shared between threads, while each thread (or a lock)
/// provides its own cache.
///
/// # Matching semantics
///
/// A lazy DFA answers whether the NFA, started at its start state, accepts
/// the entire haystack. Positional anchors are supported. A `^` is resolved
/// while computing the start state, since that is the only place it can
/// match. A `$` cannot be resolved while states are being built, since a DFA
/// state can be reached at many different positions. Instead, end anchors
/// are carried along in each state and only consulted when deciding whether
/// a state is a match state, which is only meaningful at the end of the
/// haystack.
///
/// # Cache limits
///
/// The number of states a cache may hold is bounded by
/// [`Config::state_limit`]. When a search needs more states than that, it
/// returns a [`CacheError`] instead of a result.
///
/// # Example
///
/// ```
/// use regex_hybrid::hybrid::dfa::DFA;
///
/// let dfa = DFA::new("(cat|dog)s")?;
/// let mut cache = dfa.create_cache();
/// assert!(dfa.try_is_match(&mut cache, b"cats")?);
/// assert!(!dfa.try_is_match(&mut cache, b"bird")?);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct DFA {
    nfa: thompson::NFA,
    config: Config,
}

impl DFA {
    /// Parse the given pattern and build a lazy DFA for it using the default
    /// configuration.
    pub fn new(pattern: &str) -> Result<DFA, BuildError> {
        DFA::builder().build(pattern)
    }

    /// Create a lazy DFA that determinizes the given NFA using the default
    /// configuration.
    pub fn new_from_nfa(nfa: thompson::NFA) -> DFA {
        DFA::builder().build_from_nfa(nfa)
    }

    /// Return a default configuration for a `DFA`.
    pub fn config() -> Config {
        Config::new()
    }

    /// Return a builder for configuring the construction of a `DFA`.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Create a new cache for this lazy DFA.
    ///
    /// The cache returned should only be used for searches for this lazy
    /// DFA. If you want to reuse the cache for another DFA, then you must
    /// call [`Cache::reset`] with that DFA.
    pub fn create_cache(&self) -> Cache {
        Cache::new(self)
    }

    /// Returns the configuration of this lazy DFA.
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// Returns a reference to the underlying NFA.
    pub fn nfa(&self) -> &thompson::NFA {
        &self.nfa
    }

    /// Returns the ID of the state in which every search begins.
    ///
    /// The state is computed and cached on first use, which fails only if
    /// the cache is full.
    pub fn start_state(
        &self,
        cache: &mut Cache,
    ) -> Result<LazyStateID, CacheError> {
        match cache.start {
            Some((sid, _)) => Ok(sid),
            None => Lazy::new(self, cache).cache_start().map(|(sid, _)| sid),
        }
    }

    /// Transitions from the `current` state to the next state, given the next
    /// byte of input.
    ///
    /// The given cache is used to either reuse pre-computed state
    /// transitions, or to store this newly computed transition for future
    /// reuse. Thus, this routine guarantees that it will never return a state
    /// ID that has an "unknown" tag.
    ///
    /// # State identifier validity
    ///
    /// The only valid value for `current` is the lazy state ID returned by
    /// the most recent call to `next_state` or `start_state` for the same
    /// `cache`. Any state ID returned from prior calls to these routines may
    /// still be valid, but only until the cache is reset.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_hybrid::hybrid::dfa::DFA;
    ///
    /// let dfa = DFA::new("ab*")?;
    /// let mut cache = dfa.create_cache();
    ///
    /// let mut sid = dfa.start_state(&mut cache)?;
    /// assert!(!sid.is_match());
    /// sid = dfa.next_state(&mut cache, sid, b'a')?;
    /// assert!(sid.is_match());
    /// sid = dfa.next_state(&mut cache, sid, b'c')?;
    /// assert!(sid.is_dead());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn next_state(
        &self,
        cache: &mut Cache,
        current: LazyStateID,
        input: u8,
    ) -> Result<LazyStateID, CacheError> {
        let offset = current.as_usize_unmasked() + usize::from(input);
        let sid = cache.trans[offset];
        if !sid.is_unknown() {
            return Ok(sid);
        }
        Lazy::new(self, cache).cache_next_state(current, input)
    }

    /// Returns true if and only if the underlying NFA accepts the entire
    /// haystack.
    ///
    /// # Errors
    ///
    /// This returns an error if the cache filled up before the search could
    /// finish. Transitions computed up to that point remain in the cache.
    pub fn try_is_match(
        &self,
        cache: &mut Cache,
        haystack: &[u8],
    ) -> Result<bool, CacheError> {
        let (mut sid, empty_match) = match cache.start {
            Some(start) => start,
            None => Lazy::new(self, cache).cache_start()?,
        };
        if haystack.is_empty() {
            return Ok(empty_match);
        }
        for &byte in haystack {
            sid = self.next_state(cache, sid, byte)?;
            if sid.is_dead() {
                return Ok(false);
            }
        }
        Ok(sid.is_match())
    }
}

/// A cache represents a partially computed DFA.
///
/// A cache is the key component that differentiates a classical DFA and a
/// hybrid NFA/DFA (also called a "lazy DFA"). Where a classical DFA builds a
/// complete transition table that can handle all possible inputs, a hybrid
/// NFA/DFA starts with an empty transition table and builds only the parts
/// required during search. The parts that are built are stored in a cache.
///
/// The cache is append only. States are never evicted: the first row of the
/// transition table is always the dead state and every other row belongs to
/// a state that was reached by some search. Searching a haystack whose
/// transitions were all computed before never adds a state.
#[derive(Clone, Debug)]
pub struct Cache {
    /// The transition table. Each state has a row of `STRIDE` transitions,
    /// starting at its premultiplied ID.
    trans: Vec<LazyStateID>,
    /// The NFA states behind each DFA state, indexed by the row of the state
    /// in the transition table.
    states: Vec<State>,
    /// A map from NFA state sets to the DFA state that represents them.
    states_to_id: StateMap,
    /// The start state, along with whether the empty haystack is a match.
    /// The latter differs from the start state's match tag when the pattern
    /// has a `^` that may be followed by a `$`.
    start: Option<(LazyStateID, bool)>,
    /// Scratch space for subset construction.
    sets: StateSets,
    /// The stack used for computing epsilon closures.
    stack: Vec<StateID>,
    /// The canonical (sorted) form of the set being turned into a state.
    scratch: Vec<StateID>,
    /// The heap memory used by the NFA state IDs inside of `states`.
    memory_usage_state: usize,
}

impl Cache {
    /// Create a new cache for the given lazy DFA.
    pub fn new(dfa: &DFA) -> Cache {
        let dead = State::dead();
        let mut states_to_id = StateMap::new();
        states_to_id.insert(dead.clone(), LazyStateID::dead());
        Cache {
            trans: vec![LazyStateID::dead(); STRIDE],
            states: vec![dead],
            states_to_id,
            start: None,
            sets: StateSets::new(dfa.nfa().len()),
            stack: vec![],
            scratch: vec![],
            memory_usage_state: 0,
        }
    }

    /// Reset this cache such that it can be used for searching with the
    /// given lazy DFA (and only that DFA).
    ///
    /// This drops every state that was computed so far, including states
    /// computed for a different DFA.
    pub fn reset(&mut self, dfa: &DFA) {
        *self = Cache::new(dfa);
    }

    /// Returns the number of states currently in this cache. The dead state
    /// is always present and is included in the count.
    pub fn state_len(&self) -> usize {
        self.states.len()
    }

    /// Returns the heap memory usage, in bytes, of this cache.
    ///
    /// This does **not** include the stack size used up by this cache. To
    /// compute that, use `std::mem::size_of::<Cache>()`.
    pub fn memory_usage(&self) -> usize {
        const ID_SIZE: usize = size_of::<LazyStateID>();
        // Each state's NFA IDs are shared by the state list and the map, so
        // they're only counted once.
        self.trans.len() * ID_SIZE
            + self.states.len() * (2 * size_of::<State>() + ID_SIZE)
            + self.memory_usage_state
            + self.sets.memory_usage()
            + self.stack.capacity() * StateID::SIZE
            + self.scratch.capacity() * StateID::SIZE
    }
}

/// A type that groups methods that require the base DFA and a mutable
/// reference to the cache.
///
/// Subset construction touches a few different parts of the cache at once,
/// so this keeps the borrows of the DFA and the cache together.
#[derive(Debug)]
struct Lazy<'i, 'c> {
    dfa: &'i DFA,
    cache: &'c mut Cache,
}

impl<'i, 'c> Lazy<'i, 'c> {
    fn new(dfa: &'i DFA, cache: &'c mut Cache) -> Lazy<'i, 'c> {
        Lazy { dfa, cache }
    }

    /// Compute the start state and whether an empty haystack matches, and
    /// remember both in the cache.
    fn cache_start(&mut self) -> Result<(LazyStateID, bool), CacheError> {
        let nfa = &self.dfa.nfa;
        let c = &mut *self.cache;
        c.sets.set1.clear();
        determinize::epsilon_closure(
            nfa,
            nfa.start(),
            true,
            &mut c.stack,
            &mut c.sets.set1,
        );
        let empty_match = determinize::is_match_at_eoi(
            nfa,
            c.sets.set1.as_slice(),
            true,
            &mut c.stack,
            &mut c.sets.set2,
        );
        let sid = self.add_or_get_state()?;
        self.cache.start = Some((sid, empty_match));
        Ok((sid, empty_match))
    }

    /// Compute, cache and return the state that follows `current` on
    /// `input`.
    fn cache_next_state(
        &mut self,
        current: LazyStateID,
        input: u8,
    ) -> Result<LazyStateID, CacheError> {
        // Cloning only bumps a reference count, and frees up the cache for
        // the mutable borrows below.
        let state = self.cache.states[current.as_usize_unmasked() >> STRIDE2]
            .clone();
        let c = &mut *self.cache;
        c.sets.set1.clear();
        determinize::next(
            &self.dfa.nfa,
            state.nfa_states(),
            input,
            &mut c.stack,
            &mut c.sets.set1,
        );
        let next = self.add_or_get_state()?;
        self.set_transition(current, input, next);
        Ok(next)
    }

    /// Return the state for the NFA states in `set1`, adding a new state to
    /// the cache if no equal set has been seen before.
    fn add_or_get_state(&mut self) -> Result<LazyStateID, CacheError> {
        let c = &mut *self.cache;
        c.scratch.clear();
        c.scratch.extend_from_slice(c.sets.set1.as_slice());
        c.scratch.sort_unstable();
        if let Some(&sid) = c.states_to_id.get(&c.scratch[..]) {
            return Ok(sid);
        }
        self.add_state()
    }

    /// Add the state for the NFA states in `scratch`, which must not be in
    /// the cache yet.
    fn add_state(&mut self) -> Result<LazyStateID, CacheError> {
        let c = &mut *self.cache;
        if let Some(limit) = self.dfa.config.get_state_limit() {
            if c.states.len() >= limit {
                debug!(
                    "lazy DFA cache reached its limit of {} states",
                    limit,
                );
                return Err(CacheError::state_limit_exceeded(limit));
            }
        }
        let mut sid = LazyStateID::new(c.trans.len()).map_err(|_| {
            CacheError::state_limit_exceeded(c.states.len())
        })?;
        let is_match = determinize::is_match_at_eoi(
            &self.dfa.nfa,
            &c.scratch,
            false,
            &mut c.stack,
            &mut c.sets.set2,
        );
        if is_match {
            sid = sid.to_match();
        }
        c.trans.extend(iter::repeat(LazyStateID::unknown()).take(STRIDE));
        let state = State::new(&c.scratch);
        c.memory_usage_state += state.memory_usage();
        c.states.push(state.clone());
        c.states_to_id.insert(state, sid);
        trace!(
            "added lazy DFA state {} (match: {}) for NFA states {:?}",
            c.states.len() - 1,
            is_match,
            c.scratch,
        );
        Ok(sid)
    }

    fn set_transition(
        &mut self,
        from: LazyStateID,
        input: u8,
        to: LazyStateID,
    ) {
        let offset = from.as_usize_unmasked() + usize::from(input);
        self.cache.trans[offset] = to;
    }
}

/// The configuration used for building a lazy DFA.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    state_limit: Option<Option<usize>>,
}

impl Config {
    /// Return a new default lazy DFA builder configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Set the maximum number of states that a cache may hold, including
    /// the dead state. `None` means there is no limit.
    ///
    /// When a search needs to add a state to a full cache, it stops and
    /// returns a [`CacheError`].
    ///
    /// The default is 2,000 states.
    pub fn state_limit(mut self, limit: Option<usize>) -> Config {
        self.state_limit = Some(limit);
        self
    }

    /// Returns the maximum number of states permitted in a cache, if any.
    pub fn get_state_limit(&self) -> Option<usize> {
        self.state_limit.unwrap_or(Some(DEFAULT_STATE_LIMIT))
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    pub(crate) fn overwrite(&self, o: Config) -> Config {
        Config { state_limit: o.state_limit.or(self.state_limit) }
    }
}

/// A builder for constructing a lazy DFA.
///
/// This builder permits configuring options for the lazy DFA itself and for
/// the Thompson NFA it is built from.
///
/// # Example
///
/// ```
/// use regex_hybrid::{hybrid::dfa::DFA, nfa::thompson};
///
/// let dfa = DFA::builder()
///     .configure(DFA::config().state_limit(Some(100)))
///     .thompson(thompson::Config::new().unanchored(true))
///     .build("needle")?;
/// let mut cache = dfa.create_cache();
/// assert!(dfa.try_is_match(&mut cache, b"haystack with a needle in it")?);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    config: Config,
    thompson: thompson::Compiler,
}

impl Builder {
    /// Create a new lazy DFA builder with the default configuration.
    pub fn new() -> Builder {
        Builder { config: Config::default(), thompson: thompson::Compiler::new() }
    }

    /// Build a lazy DFA from the given pattern.
    pub fn build(&self, pattern: &str) -> Result<DFA, BuildError> {
        let nfa = self.thompson.build(pattern).map_err(BuildError::nfa)?;
        Ok(self.build_from_nfa(nfa))
    }

    /// Build a lazy DFA from the given NFA.
    ///
    /// This never fails, since no states are computed until a search needs
    /// them.
    pub fn build_from_nfa(&self, nfa: thompson::NFA) -> DFA {
        DFA { nfa, config: self.config }
    }

    /// Apply the given lazy DFA configuration options to this builder.
    pub fn configure(&mut self, config: Config) -> &mut Builder {
        self.config = self.config.overwrite(config);
        self
    }

    /// Set the Thompson NFA configuration for this builder using
    /// [`nfa::thompson::Config`](thompson::Config).
    ///
    /// This permits setting things like whether the DFA should match
    /// substrings or only entire haystacks.
    pub fn thompson(&mut self, config: thompson::Config) -> &mut Builder {
        self.thompson.configure(config);
        self
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}
