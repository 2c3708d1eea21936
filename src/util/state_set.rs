use crate::util::id::StateID;

/// A pair of state sets.
///
/// This is useful when one needs to compute NFA epsilon closures from a
/// previous set of states derived from an epsilon closure. One set can be the
/// starting states where as the other set can be the destination states after
/// following the transitions for a particular byte of input.
///
/// There is no significance to 'set1' or 'set2'. They are both sets of the
/// same size.
///
/// The members of this struct are exposed so that callers may borrow 'set1'
/// and 'set2' individually without being force to borrow both at the same
/// time.
#[derive(Clone, Debug)]
pub(crate) struct StateSets {
    pub(crate) set1: StateSet,
    pub(crate) set2: StateSet,
}

impl StateSets {
    /// Create a new pair of state sets where each set has the given capacity.
    ///
    /// This panics if the capacity given is bigger than `StateID::LIMIT`.
    pub(crate) fn new(capacity: usize) -> StateSets {
        StateSets {
            set1: StateSet::new(capacity),
            set2: StateSet::new(capacity),
        }
    }

    /// Clear both state sets.
    pub(crate) fn clear(&mut self) {
        self.set1.clear();
        self.set2.clear();
    }

    /// Swap set1 with set2.
    pub(crate) fn swap(&mut self) {
        core::mem::swap(&mut self.set1, &mut self.set2);
    }

    /// Returns the memory usage, in bytes, used by this pair of state sets.
    pub(crate) fn memory_usage(&self) -> usize {
        self.set1.memory_usage() + self.set2.memory_usage()
    }
}

/// A set of NFA states stamped with a generation counter.
///
/// Every NFA state has a slot recording the last generation in which it was
/// visited. A state is a member of the current generation if and only if its
/// stamp equals the set's generation. Clearing the set therefore only bumps
/// the generation, which makes clearing, visiting and membership testing all
/// constant time without rebuilding a hash set per byte of input.
///
/// Visiting and listing are separate operations. Epsilon closure visits every
/// state it passes through (including splits) so that cycles terminate, but
/// only lists the states that remain meaningful after the closure, i.e., the
/// states that consume input or signal a match. Iteration yields listed
/// elements in the order in which they were pushed.
#[derive(Clone)]
pub(crate) struct StateSet {
    /// The current generation. Always greater than zero, so that a freshly
    /// allocated stamp of zero never counts as visited.
    generation: u32,
    /// Stamps maps a state ID to the last generation it was visited in.
    stamps: Vec<u32>,
    /// Dense contains the listed ids in the order in which they were pushed.
    dense: Vec<StateID>,
}

impl StateSet {
    /// Create a new state set with the given capacity.
    ///
    /// Attempting to visit a state ID greater than or equal to the capacity
    /// will result in a panic.
    ///
    /// This panics if the capacity given is bigger than `StateID::LIMIT`.
    pub(crate) fn new(capacity: usize) -> StateSet {
        assert!(
            capacity <= StateID::LIMIT,
            "state set capacity cannot excced {:?}",
            StateID::LIMIT
        );
        StateSet {
            generation: 1,
            stamps: vec![0; capacity],
            dense: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of listed elements in this set.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns true if and only if nothing has been listed in this set.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stamp the given state ID with the current generation and return true
    /// if it was not already visited in this generation.
    ///
    /// This is marked as inline(always) since it is the hottest piece of code
    /// in both epsilon closure and subset construction.
    #[inline(always)]
    pub(crate) fn visit(&mut self, id: StateID) -> bool {
        if self.stamps[id] == self.generation {
            return false;
        }
        self.stamps[id] = self.generation;
        true
    }

    /// Returns true if and only if the given state ID has been visited in
    /// the current generation.
    #[inline]
    pub(crate) fn contains(&self, id: StateID) -> bool {
        self.stamps[id] == self.generation
    }

    /// Append an already visited state ID to the list of members.
    #[inline]
    pub(crate) fn push(&mut self, id: StateID) {
        debug_assert!(self.contains(id), "pushed {:?} before visiting", id);
        self.dense.push(id);
    }

    /// Returns the listed members as a slice, in insertion order.
    #[inline]
    pub(crate) fn as_slice(&self) -> &[StateID] {
        &self.dense
    }

    /// Clear this set such that it has no members by moving to the next
    /// generation.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.dense.clear();
        if self.generation == u32::MAX {
            // Wrapping around would make stale stamps look current, so pay
            // for a full reset once every four billion clears.
            for stamp in self.stamps.iter_mut() {
                *stamp = 0;
            }
            self.generation = 0;
        }
        self.generation += 1;
    }

    /// Returns the heap memory usage, in bytes, used by this set.
    #[inline]
    pub(crate) fn memory_usage(&self) -> usize {
        self.stamps.len() * core::mem::size_of::<u32>()
            + self.dense.capacity() * StateID::SIZE
    }
}

impl core::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("StateSet").field(&self.dense).finish()
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateID;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, StateID>>;

    fn into_iter(self) -> Self::IntoIter {
        self.dense.iter().copied()
    }
}
