use quickcheck::{quickcheck, TestResult};

use regex_hybrid::{
    compile,
    hybrid::dfa::DFA,
    meta::{MatchMode, Regex, Strategy},
    nfa::thompson::pikevm::PikeVM,
};

use crate::util::{SmallHaystack, SmallPattern};

fn regex(pattern: &str, mode: MatchMode) -> Regex {
    Regex::builder()
        .configure(Regex::config().match_mode(mode))
        .build(pattern)
        .expect("generated patterns always compile")
}

quickcheck! {
    // The choice of strategy never changes the outcome of a search.
    fn strategies_agree_full(p: SmallPattern, hs: Vec<SmallHaystack>) -> bool {
        let re = regex(&p.0, MatchMode::Full);
        hs.iter().all(|h| {
            re.is_match_using(Strategy::Nfa, &h.0)
                == re.is_match_using(Strategy::Dfa, &h.0)
        })
    }

    fn strategies_agree_substring(
        p: SmallPattern,
        hs: Vec<SmallHaystack>
    ) -> bool {
        let re = regex(&p.0, MatchMode::Substring);
        hs.iter().all(|h| {
            re.is_match_using(Strategy::Nfa, &h.0)
                == re.is_match_using(Strategy::Dfa, &h.0)
        })
    }

    // Compiling the same pattern twice gives automata that accept the same
    // haystacks.
    fn compile_is_deterministic(
        p: SmallPattern,
        hs: Vec<SmallHaystack>
    ) -> bool {
        let nfa1 = compile(&p.0).expect("compiles").nfa().clone();
        let nfa2 = compile(&p.0).expect("compiles").nfa().clone();
        if nfa1.len() != nfa2.len() {
            return false;
        }
        let (vm1, vm2) =
            (PikeVM::new_from_nfa(nfa1), PikeVM::new_from_nfa(nfa2));
        let (mut c1, mut c2) = (vm1.create_cache(), vm2.create_cache());
        hs.iter().all(|h| vm1.is_match(&mut c1, &h.0) == vm2.is_match(&mut c2, &h.0))
    }

    // Repeating searches never adds lazy DFA states.
    fn dfa_cache_is_idempotent(
        p: SmallPattern,
        hs: Vec<SmallHaystack>
    ) -> TestResult {
        let nfa = compile(&p.0).expect("compiles").nfa().clone();
        let dfa = DFA::new_from_nfa(nfa);
        let mut cache = dfa.create_cache();
        let mut first = vec![];
        for h in hs.iter() {
            match dfa.try_is_match(&mut cache, &h.0) {
                Ok(yes) => first.push(yes),
                Err(_) => return TestResult::discard(),
            }
        }
        let len = cache.state_len();
        for (h, &expected) in hs.iter().zip(first.iter()) {
            match dfa.try_is_match(&mut cache, &h.0) {
                Ok(yes) if yes == expected => {}
                _ => return TestResult::failed(),
            }
        }
        TestResult::from_bool(len == cache.state_len())
    }
}
