use core::fmt;

use std::sync::Arc;

use crate::{
    nfa::thompson::{
        compiler::{Compiler, Config},
        error::BuildError,
    },
    util::{
        charset::CharacterSet,
        escape::DebugByte,
        id::{IteratorIDExt, StateID},
    },
};

/// A byte oriented Thompson non-deterministic finite automaton (NFA).
///
/// A Thompson NFA is a finite state machine that permits unconditional
/// epsilon transitions (here, only via [`State::Split`]) and whose other
/// states each consume at most one byte of input. It is built from the
/// postfix form of a pattern by [`Compiler`], and may be searched directly
/// by the [`PikeVM`](crate::nfa::thompson::pikevm::PikeVM) or used to
/// build a [lazy DFA](crate::hybrid::dfa::DFA).
///
/// States live in a flat arena and every edge is a [`StateID`] into that
/// arena. The graph may be cyclic: repetition operators create split states
/// whose edges point backwards. There is exactly one start state and
/// exactly one [`State::Match`] state.
///
/// # Cheap clones
///
/// An NFA uses reference counting internally, so it is cheap to clone and
/// it is encouraged to do so. Both matching engines built from a pattern
/// share one NFA.
///
/// # Byte oriented
///
/// All transitions are defined on bytes. A literal character outside of
/// ASCII is compiled to a sequence of [`State::Char`] states, one per byte
/// of its UTF-8 encoding.
///
/// # Example
///
/// ```
/// use regex_hybrid::nfa::thompson::{State, NFA};
///
/// let nfa = NFA::new("a|b")?;
/// assert_eq!(4, nfa.len());
/// assert!(matches!(nfa.state(nfa.start()), State::Split { .. }));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct NFA(Arc<Inner>);

impl NFA {
    /// Parse the given pattern and build an NFA from it using the default
    /// configuration.
    ///
    /// If you want a non-default configuration, use the [`Compiler`].
    pub fn new(pattern: &str) -> Result<NFA, BuildError> {
        NFA::compiler().build(pattern)
    }

    /// Return a default configuration for an `NFA`.
    pub fn config() -> Config {
        Config::new()
    }

    /// Return a compiler for configuring the construction of an `NFA`.
    pub fn compiler() -> Compiler {
        Compiler::new()
    }

    /// Returns the state that every search starts from.
    #[inline]
    pub fn start(&self) -> StateID {
        self.0.start
    }

    /// Returns the identifier of the single match state.
    #[inline]
    pub fn match_state(&self) -> StateID {
        self.0.match_id
    }

    /// Return a reference to the NFA state corresponding to the given ID.
    ///
    /// This panics if the given ID does not refer to a state in this NFA.
    #[inline]
    pub fn state(&self, id: StateID) -> &State {
        &self.0.states[id]
    }

    /// Returns a slice of all states in this NFA, indexable by `StateID`.
    #[inline]
    pub fn states(&self) -> &[State] {
        &self.0.states
    }

    /// Returns the total number of states in this NFA.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.states.len()
    }

    /// Returns the heap memory usage, in bytes, of this NFA.
    ///
    /// This does **not** include the stack size used up by this NFA. To
    /// compute that, use `std::mem::size_of::<NFA>()`.
    pub fn memory_usage(&self) -> usize {
        core::mem::size_of::<Inner>()
            + self.0.states.len() * core::mem::size_of::<State>()
    }
}

impl fmt::Debug for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The "inner" part of the NFA, wrapped in an `Arc` by `NFA`.
///
/// See builder.rs for the code that constructs this type.
pub(super) struct Inner {
    /// The state sequence, indexable by every state ID found in any state's
    /// transitions.
    states: Vec<State>,
    /// The starting state of this NFA.
    start: StateID,
    /// The match state of this NFA.
    match_id: StateID,
}

impl Inner {
    pub(super) fn new(
        states: Vec<State>,
        start: StateID,
        match_id: StateID,
    ) -> NFA {
        NFA(Arc::new(Inner { states, start, match_id }))
    }
}

impl fmt::Debug for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "thompson::NFA(")?;
        for (sid, state) in self.states.iter().with_state_ids() {
            let status = if sid == self.start { '>' } else { ' ' };
            writeln!(f, "{}{:06?}: {:?}", status, sid.as_usize(), state)?;
        }
        writeln!(f, ")")?;
        Ok(())
    }
}

/// A state in a Thompson NFA.
///
/// Every state except for `Split` and `Match` has exactly one outgoing
/// transition. `Split` has two, and `Match` has none.
#[derive(Clone, Eq, PartialEq)]
pub enum State {
    /// A state that transitions to `next` only if the current input byte
    /// is equal to `byte`.
    Char { byte: u8, next: StateID },
    /// A state that transitions to `next` only if the current input byte is
    /// a member of `set`.
    CharSet { set: CharacterSet, next: StateID },
    /// An unconditional epsilon transition to both `out1` and `out2`.
    Split { out1: StateID, out2: StateID },
    /// A conditional epsilon transition to `next` that is only satisfied at
    /// the beginning of the haystack.
    AnchorStart { next: StateID },
    /// A conditional epsilon transition to `next` that is only satisfied at
    /// the end of the haystack.
    AnchorEnd { next: StateID },
    /// A match state. Once a search has consumed the entire haystack, it
    /// reports a match if and only if it is in this state.
    Match,
}

impl State {
    /// Returns true if and only if this state contains one or more epsilon
    /// transitions.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        match *self {
            State::Char { .. } | State::CharSet { .. } | State::Match => {
                false
            }
            State::Split { .. }
            | State::AnchorStart { .. }
            | State::AnchorEnd { .. } => true,
        }
    }

    /// If this state consumes `byte`, return the state it moves to.
    #[inline]
    pub fn matches_byte(&self, byte: u8) -> Option<StateID> {
        match *self {
            State::Char { byte: b, next } if b == byte => Some(next),
            State::CharSet { ref set, next } if set.contains(byte) => {
                Some(next)
            }
            _ => None,
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            State::Char { byte, next } => {
                write!(f, "{:?} => {:?}", DebugByte(byte), next.as_usize())
            }
            State::CharSet { ref set, next } => {
                write!(f, "{:?} => {:?}", set, next.as_usize())
            }
            State::Split { out1, out2 } => write!(
                f,
                "split({:?}, {:?})",
                out1.as_usize(),
                out2.as_usize()
            ),
            State::AnchorStart { next } => {
                write!(f, "StartText => {:?}", next.as_usize())
            }
            State::AnchorEnd { next } => {
                write!(f, "EndText => {:?}", next.as_usize())
            }
            State::Match => write!(f, "MATCH"),
        }
    }
}
