use regex_hybrid::{
    hybrid::dfa::{self, DFA},
    nfa::thompson::{self, pikevm::PikeVM},
};

use crate::{
    suite::{Mode, RegexTest, TestRunner},
    Result,
};

/// Tests the default configuration of the lazy DFA, with one cache per
/// pattern that is shared by all of its haystacks.
#[test]
fn default() -> Result<()> {
    TestRunner::new().test_all(|test| {
        let dfa = builder(test).build(test.pattern)?;
        let mut cache = dfa.create_cache();
        Ok(move |haystack: &[u8]| {
            dfa.try_is_match(&mut cache, haystack).expect("cache has room")
        })
    });
    Ok(())
}

/// Tests the lazy DFA with a fresh cache for every search.
#[test]
fn fresh_cache() -> Result<()> {
    TestRunner::new().test_all(|test| {
        let dfa = builder(test).build(test.pattern)?;
        Ok(move |haystack: &[u8]| {
            let mut cache = dfa.create_cache();
            dfa.try_is_match(&mut cache, haystack).expect("cache has room")
        })
    });
    Ok(())
}

/// Tests a lazy DFA whose cache is too small for most searches. Whenever it
/// gives up, the cache is reset and the search is handed to the PikeVM, so
/// the answers must not change.
#[test]
fn tiny_cache() -> Result<()> {
    TestRunner::new().test_all(|test| {
        let dfa = builder(test)
            .configure(DFA::config().state_limit(Some(4)))
            .build(test.pattern)?;
        let vm = PikeVM::new_from_nfa(dfa.nfa().clone());
        let mut cache = dfa.create_cache();
        let mut vm_cache = vm.create_cache();
        Ok(move |haystack: &[u8]| {
            match dfa.try_is_match(&mut cache, haystack) {
                Ok(yes) => yes,
                Err(err) => {
                    assert_eq!(4, err.state_limit());
                    cache.reset(&dfa);
                    vm.is_match(&mut vm_cache, haystack)
                }
            }
        })
    });
    Ok(())
}

fn builder(test: &RegexTest) -> dfa::Builder {
    let mut builder = DFA::builder();
    builder.thompson(
        thompson::Config::new().unanchored(test.mode == Mode::Substring),
    );
    builder
}
