use crate::{
    nfa::thompson::{
        error::BuildError,
        nfa::{self, NFA},
    },
    util::{
        charset::CharacterSet,
        id::{IteratorIDExt, StateID},
    },
};

/// An intermediate NFA state used during construction.
///
/// During construction, the target of a transition is frequently not known
/// when its state is added. Such transitions are `None` until they are
/// patched. Once construction is finished, every transition must have been
/// patched and the builder converts these states to their final form.
#[derive(Clone, Debug, Eq, PartialEq)]
enum State {
    Char { byte: u8, next: Option<StateID> },
    CharSet { set: CharacterSet, next: Option<StateID> },
    Split { out1: Option<StateID>, out2: Option<StateID> },
    AnchorStart { next: Option<StateID> },
    AnchorEnd { next: Option<StateID> },
    Match,
}

/// Identifies which of a state's transitions a [`Hole`] refers to.
///
/// Every state with a single transition uses `Out1`. Only split states have
/// an `Out2`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Slot {
    Out1,
    Out2,
}

/// An unpatched transition of a state that has been added to a builder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Hole {
    pub(crate) from: StateID,
    pub(crate) slot: Slot,
}

impl Hole {
    pub(crate) fn out1(from: StateID) -> Hole {
        Hole { from, slot: Slot::Out1 }
    }

    pub(crate) fn out2(from: StateID) -> Hole {
        Hole { from, slot: Slot::Out2 }
    }
}

/// An arena of intermediate NFA states.
///
/// States are assigned an ID equivalent to their index once added. They
/// may still be mutated afterwards, but only to patch a transition that did
/// not have a known target when the state was added.
#[derive(Clone, Debug, Default)]
pub(crate) struct Builder {
    states: Vec<State>,
    /// The maximum number of states permitted, if any.
    size_limit: Option<usize>,
}

impl Builder {
    pub(crate) fn new() -> Builder {
        Builder::default()
    }

    pub(crate) fn set_size_limit(&mut self, limit: Option<usize>) {
        self.size_limit = limit;
    }

    pub(crate) fn add_char(&mut self, byte: u8) -> Result<StateID, BuildError> {
        self.add(State::Char { byte, next: None })
    }

    pub(crate) fn add_char_set(
        &mut self,
        set: CharacterSet,
    ) -> Result<StateID, BuildError> {
        self.add(State::CharSet { set, next: None })
    }

    /// Add a split state whose first transition points to `out1`. The second
    /// transition is left unpatched.
    pub(crate) fn add_split(
        &mut self,
        out1: Option<StateID>,
    ) -> Result<StateID, BuildError> {
        self.add(State::Split { out1, out2: None })
    }

    /// Add a split state with both of its transitions known.
    pub(crate) fn add_union(
        &mut self,
        out1: StateID,
        out2: StateID,
    ) -> Result<StateID, BuildError> {
        self.add(State::Split { out1: Some(out1), out2: Some(out2) })
    }

    pub(crate) fn add_anchor_start(&mut self) -> Result<StateID, BuildError> {
        self.add(State::AnchorStart { next: None })
    }

    pub(crate) fn add_anchor_end(&mut self) -> Result<StateID, BuildError> {
        self.add(State::AnchorEnd { next: None })
    }

    pub(crate) fn add_match(&mut self) -> Result<StateID, BuildError> {
        self.add(State::Match)
    }

    fn add(&mut self, state: State) -> Result<StateID, BuildError> {
        let given = self.states.len() + 1;
        if let Some(limit) = self.size_limit {
            if given > limit {
                return Err(BuildError::too_many_states(given, limit));
            }
        }
        let id = StateID::new(self.states.len()).map_err(|_| {
            BuildError::too_many_states(given, StateID::LIMIT)
        })?;
        self.states.push(state);
        Ok(id)
    }

    /// Point the transition identified by `hole` at `to`.
    ///
    /// This panics if the hole refers to a transition that its state does
    /// not have, or to one that has already been patched.
    pub(crate) fn patch(&mut self, hole: Hole, to: StateID) {
        let slot = match (&mut self.states[hole.from], hole.slot) {
            (&mut State::Char { ref mut next, .. }, Slot::Out1)
            | (&mut State::CharSet { ref mut next, .. }, Slot::Out1)
            | (&mut State::AnchorStart { ref mut next }, Slot::Out1)
            | (&mut State::AnchorEnd { ref mut next }, Slot::Out1)
            | (&mut State::Split { out1: ref mut next, .. }, Slot::Out1)
            | (&mut State::Split { out2: ref mut next, .. }, Slot::Out2) => {
                next
            }
            (state, slot) => {
                panic!("cannot patch {:?} of NFA state {:?}", slot, state)
            }
        };
        assert!(slot.is_none(), "{:?} was already patched", hole);
        *slot = Some(to);
    }

    /// Finish construction and return an NFA that starts at `start` and
    /// whose single match state is `match_id`.
    ///
    /// This returns an error if any transition was never patched.
    pub(crate) fn build(
        &self,
        start: StateID,
        match_id: StateID,
    ) -> Result<NFA, BuildError> {
        let mut states = Vec::with_capacity(self.states.len());
        for (sid, state) in self.states.iter().with_state_ids() {
            let must = |next: Option<StateID>| {
                next.ok_or_else(|| BuildError::dangling_transition(sid))
            };
            states.push(match *state {
                State::Char { byte, next } => {
                    nfa::State::Char { byte, next: must(next)? }
                }
                State::CharSet { set, next } => {
                    nfa::State::CharSet { set, next: must(next)? }
                }
                State::Split { out1, out2 } => nfa::State::Split {
                    out1: must(out1)?,
                    out2: must(out2)?,
                },
                State::AnchorStart { next } => {
                    nfa::State::AnchorStart { next: must(next)? }
                }
                State::AnchorEnd { next } => {
                    nfa::State::AnchorEnd { next: must(next)? }
                }
                State::Match => nfa::State::Match,
            });
        }
        let nfa = nfa::Inner::new(states, start, match_id);
        trace!(
            "NFA compilation via builder complete, \
             final NFA size: {} states, {} bytes on heap",
            nfa.len(),
            nfa.memory_usage(),
        );
        Ok(nfa)
    }
}
