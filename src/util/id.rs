/*!
Type definitions for identifier types.

A [`StateID`] identifies a single state in a compiled Thompson NFA. States are
stored in a flat arena and every edge in the automaton is expressed as a
`StateID` pointing back into that arena. This is what permits the automaton to
contain cycles (via the split states created by `*` and `+`) without any state
owning its successors.

The identifier is clamped to a range that is smaller than its internal `u32`
representation. Users of this type may not rely on this clamping for the
purpose of memory safety, but may rely on it to avoid panics or other types of
logic bugs.
*/

use core::{convert::TryFrom, ops};

/// An identifier for a state in a Thompson NFA.
///
/// A state ID is guaranteed to be representable by a `usize`. Similarly, the
/// number of states in any NFA compiled by this crate is guaranteed to be
/// representable by a `usize`.
///
/// # Representation
///
/// This type is always represented internally by a `u32` and is marked as
/// `repr(transparent)`. Thus, this type always has the same representation as
/// a `u32`.
///
/// # Indexing
///
/// For convenience, callers may use a `StateID` to index slices.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord,
)]
pub struct StateID(u32);

impl StateID {
    /// The maximum state ID value.
    pub const MAX: StateID =
        StateID::new_unchecked(core::i32::MAX as usize - 1);

    /// The total number of states that are allowed in any single NFA.
    pub const LIMIT: usize = StateID::MAX.as_usize() + 1;

    /// The number of bytes that a single `StateID` uses in memory.
    pub const SIZE: usize = core::mem::size_of::<StateID>();

    /// Create a new state ID.
    ///
    /// If the given identifier exceeds [`StateID::MAX`], then this returns
    /// an error.
    #[inline]
    pub fn new(id: usize) -> Result<StateID, StateIDError> {
        StateID::try_from(id)
    }

    /// Create a new state ID without checking whether the given value
    /// exceeds [`StateID::MAX`].
    ///
    /// While this is unchecked, providing an incorrect value must never
    /// sacrifice memory safety.
    #[inline]
    pub const fn new_unchecked(id: usize) -> StateID {
        StateID(id as u32)
    }

    /// Like [`StateID::new`], but panics if the given ID is not valid.
    #[inline]
    pub fn must(id: usize) -> StateID {
        StateID::new(id).expect("invalid state ID")
    }

    /// Return this state ID as a `usize`.
    #[inline]
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Returns an iterator over all state IDs from 0 up to and not including
    /// the given length.
    ///
    /// If the given length exceeds [`StateID::LIMIT`], then this panics.
    pub(crate) fn iter(len: usize) -> StateIDIter {
        StateIDIter::new(len)
    }
}

impl TryFrom<usize> for StateID {
    type Error = StateIDError;

    #[inline]
    fn try_from(id: usize) -> Result<StateID, StateIDError> {
        if id > StateID::MAX.as_usize() {
            return Err(StateIDError { attempted: id as u64 });
        }
        Ok(StateID::new_unchecked(id))
    }
}

impl<T> ops::Index<StateID> for [T] {
    type Output = T;

    #[inline]
    fn index(&self, index: StateID) -> &T {
        &self[index.as_usize()]
    }
}

impl<T> ops::IndexMut<StateID> for [T] {
    #[inline]
    fn index_mut(&mut self, index: StateID) -> &mut T {
        &mut self[index.as_usize()]
    }
}

impl<T> ops::Index<StateID> for Vec<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: StateID) -> &T {
        &self[index.as_usize()]
    }
}

impl<T> ops::IndexMut<StateID> for Vec<T> {
    #[inline]
    fn index_mut(&mut self, index: StateID) -> &mut T {
        &mut self[index.as_usize()]
    }
}

/// This error occurs when a state ID could not be constructed.
///
/// This occurs when given an integer exceeding the maximum state ID value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateIDError {
    attempted: u64,
}

impl StateIDError {
    /// Returns the value that failed to constructed a state ID.
    pub fn attempted(&self) -> u64 {
        self.attempted
    }
}

impl std::error::Error for StateIDError {}

impl core::fmt::Display for StateIDError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to create StateID from {:?}, which exceeds {:?}",
            self.attempted(),
            StateID::MAX,
        )
    }
}

/// An iterator over a contiguous range of state IDs.
#[derive(Clone, Debug)]
pub(crate) struct StateIDIter {
    rng: ops::Range<usize>,
}

impl StateIDIter {
    fn new(len: usize) -> StateIDIter {
        assert!(
            len <= StateID::LIMIT,
            "cannot create iterator with IDs when number of \
             elements exceed {:?}",
            StateID::LIMIT,
        );
        StateIDIter { rng: 0..len }
    }
}

impl Iterator for StateIDIter {
    type Item = StateID;

    fn next(&mut self) -> Option<StateID> {
        if self.rng.start >= self.rng.end {
            return None;
        }
        let next_id = self.rng.start + 1;
        let id = core::mem::replace(&mut self.rng.start, next_id);
        // new_unchecked is OK since we asserted that the number of
        // elements in this iterator will fit in an ID at construction.
        Some(StateID::new_unchecked(id))
    }
}

/// An iterator adapter that is like std::iter::Enumerate, but attaches
/// state IDs instead of plain indices.
#[derive(Clone, Debug)]
pub(crate) struct WithStateIDIter<I> {
    it: I,
    ids: StateIDIter,
}

impl<I: Iterator + ExactSizeIterator> WithStateIDIter<I> {
    fn new(it: I) -> WithStateIDIter<I> {
        let ids = StateID::iter(it.len());
        WithStateIDIter { it, ids }
    }
}

impl<I: Iterator + ExactSizeIterator> Iterator for WithStateIDIter<I> {
    type Item = (StateID, I::Item);

    fn next(&mut self) -> Option<(StateID, I::Item)> {
        let item = self.it.next()?;
        // Number of elements in this iterator must match, according
        // to contract of ExactSizeIterator.
        let id = self.ids.next()?;
        Some((id, item))
    }
}

/// An extension trait that adds a `with_state_ids` adapter to any exact
/// size iterator.
pub(crate) trait IteratorIDExt: Iterator {
    fn with_state_ids(self) -> WithStateIDIter<Self>
    where
        Self: Sized + ExactSizeIterator,
    {
        WithStateIDIter::new(self)
    }
}

impl<I: Iterator> IteratorIDExt for I {}
