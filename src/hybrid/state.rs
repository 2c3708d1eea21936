use std::sync::Arc;

use crate::util::id::StateID;

/// The identity of a lazy DFA state: the set of NFA states it stands for.
///
/// NFA state IDs are always stored sorted and without duplicates, which
/// makes the representation canonical. Two subsets with the same members
/// compare equal no matter what order their members were discovered in.
///
/// Cloning a state is cheap. The cache stores each state twice: once in the
/// list of states indexed by lazy state ID and once as a key in the map from
/// states to their IDs.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) struct State(Arc<[StateID]>);

/// This Borrow impl permits us to lookup any state in a map by its slice of
/// NFA state IDs. Thus, checking whether a subset was already seen needs no
/// allocation.
impl core::borrow::Borrow<[StateID]> for State {
    fn borrow(&self) -> &[StateID] {
        &*self.0
    }
}

impl State {
    /// Create a state from NFA state IDs that must already be sorted and
    /// deduplicated.
    pub(crate) fn new(nfa_states: &[StateID]) -> State {
        debug_assert!(nfa_states.windows(2).all(|w| w[0] < w[1]));
        State(Arc::from(nfa_states))
    }

    /// Create the state for the empty subset, which is the dead state.
    pub(crate) fn dead() -> State {
        State::new(&[])
    }

    /// Returns the NFA states in this subset, in ascending order.
    pub(crate) fn nfa_states(&self) -> &[StateID] {
        &self.0
    }

    /// Returns the heap memory used by this state.
    pub(crate) fn memory_usage(&self) -> usize {
        self.0.len() * StateID::SIZE
    }
}
