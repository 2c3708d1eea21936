/*!
This module contains the routines that turn sets of NFA states into the sets
that back lazy DFA states.

The NFA simulation in `nfa::thompson::pikevm` always knows its position in the
haystack, so it can resolve both anchors on the spot. A lazy DFA state has to
be reusable at *any* position, so here the end-of-input anchor cannot be
resolved while a set is being built. Such states are instead carried inertly
in the set and resolved by [`is_match_at_eoi`], which is only meaningful once
the end of the input has actually been reached.
*/

use crate::{
    nfa::thompson::{State, NFA},
    util::{id::StateID, state_set::StateSet},
};

/// Compute the epsilon closure of `start` and add every listed state to
/// `set`.
///
/// `at_start` should be true only when the closure is computed at the very
/// beginning of the haystack, where a start anchor is satisfied. End anchors
/// are listed as members so that the set remembers them.
pub(crate) fn epsilon_closure(
    nfa: &NFA,
    start: StateID,
    at_start: bool,
    stack: &mut Vec<StateID>,
    set: &mut StateSet,
) {
    closure(nfa, start, at_start, false, stack, set)
}

/// Compute the set of states reached from `current` after consuming `byte`.
///
/// Only states that consume input propagate. In particular, a match state in
/// `current` is *not* carried over: only genuine successors of a step are
/// candidates for the next set. The resulting set is left in `next`, which
/// the caller is expected to have cleared.
pub(crate) fn next(
    nfa: &NFA,
    current: &[StateID],
    byte: u8,
    stack: &mut Vec<StateID>,
    next: &mut StateSet,
) {
    for &sid in current {
        let target = match *nfa.state(sid) {
            State::Char { byte: b, next } if b == byte => next,
            State::CharSet { ref set, next } if set.contains(byte) => next,
            _ => continue,
        };
        closure(nfa, target, false, false, stack, next);
    }
}

/// Returns true if and only if a match state is reachable from the given
/// set of states once the end of the haystack has been reached.
///
/// `scratch` is used to record the states visited while resolving end
/// anchors and is cleared before use.
pub(crate) fn is_match_at_eoi(
    nfa: &NFA,
    states: &[StateID],
    at_start: bool,
    stack: &mut Vec<StateID>,
    scratch: &mut StateSet,
) -> bool {
    scratch.clear();
    for &sid in states {
        match *nfa.state(sid) {
            State::Match => return true,
            State::AnchorEnd { next } => {
                closure(nfa, next, at_start, true, stack, scratch);
            }
            _ => {}
        }
    }
    scratch
        .as_slice()
        .iter()
        .any(|&sid| matches!(*nfa.state(sid), State::Match))
}

fn closure(
    nfa: &NFA,
    start: StateID,
    at_start: bool,
    at_eoi: bool,
    stack: &mut Vec<StateID>,
    set: &mut StateSet,
) {
    stack.push(start);
    while let Some(sid) = stack.pop() {
        if !set.visit(sid) {
            continue;
        }
        match *nfa.state(sid) {
            State::Split { out1, out2 } => {
                // Push out2 first so that out1 is explored first. Order
                // doesn't change which states end up in the set, but it
                // keeps the listing order predictable in debug output.
                stack.push(out2);
                stack.push(out1);
            }
            State::AnchorStart { next } => {
                if at_start {
                    stack.push(next);
                }
            }
            State::AnchorEnd { next } => {
                if at_eoi {
                    stack.push(next);
                } else {
                    set.push(sid);
                }
            }
            State::Char { .. } | State::CharSet { .. } | State::Match => {
                set.push(sid);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::compile;

    fn closure_of(pattern: &str, at_start: bool) -> (NFA, Vec<StateID>) {
        let nfa = compile(pattern).unwrap().nfa().clone();
        let mut stack = vec![];
        let mut set = StateSet::new(nfa.len());
        epsilon_closure(&nfa, nfa.start(), at_start, &mut stack, &mut set);
        let states = set.as_slice().to_vec();
        (nfa, states)
    }

    #[test]
    fn closure_skips_splits() {
        let (nfa, states) = closure_of("a*b", true);
        assert_eq!(2, states.len());
        for sid in states {
            assert!(!matches!(*nfa.state(sid), State::Split { .. }));
        }
    }

    #[test]
    fn start_anchor_depends_on_position() {
        let (_, states) = closure_of("^a", true);
        assert_eq!(1, states.len());
        let (_, states) = closure_of("^a", false);
        assert!(states.is_empty());
    }

    #[test]
    fn end_anchor_is_carried_then_resolved() {
        let (nfa, states) = closure_of("a*$", true);
        let mut stack = vec![];
        let mut scratch = StateSet::new(nfa.len());
        assert!(states
            .iter()
            .any(|&sid| matches!(*nfa.state(sid), State::AnchorEnd { .. })));
        assert!(is_match_at_eoi(&nfa, &states, true, &mut stack, &mut scratch));
    }

    #[test]
    fn step_does_not_carry_match() {
        let (nfa, states) = closure_of("a?", true);
        let mut stack = vec![];
        let mut set = StateSet::new(nfa.len());
        next(&nfa, &states, b'b', &mut stack, &mut set);
        assert!(set.is_empty());
        next(&nfa, &states, b'a', &mut stack, &mut set);
        assert_eq!(1, set.len());
    }
}
