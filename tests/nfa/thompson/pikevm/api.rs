use regex_hybrid::nfa::thompson::{self, pikevm::PikeVM, NFA};

use crate::Result;

// A cache created for one PikeVM can be reset and reused for another whose
// NFA has a different number of states.
#[test]
fn cache_reset_for_other_vm() -> Result<()> {
    let small = PikeVM::new("a")?;
    let big = PikeVM::new("(abc|xyz)+[0-9]{2,5}")?;
    let mut cache = small.create_cache();
    assert!(small.is_match(&mut cache, b"a"));

    cache.reset(&big);
    assert!(big.is_match(&mut cache, b"abcxyz12345"));
    assert!(!big.is_match(&mut cache, b"abcxyz1"));
    Ok(())
}

// Searching a haystack far larger than the NFA must not grow the cache,
// since the state sets are sized by the NFA alone.
#[test]
fn cache_size_is_independent_of_haystack() -> Result<()> {
    let vm = PikeVM::new("(a|b)*c")?;
    let mut cache = vm.create_cache();
    assert!(vm.is_match(&mut cache, b"abc"));
    let before = cache.memory_usage();

    let haystack = "ab".repeat(10_000) + "c";
    assert!(vm.is_match(&mut cache, haystack.as_bytes()));
    assert_eq!(before, cache.memory_usage());
    Ok(())
}

// A PikeVM only needs an NFA, which may be built with any configuration.
#[test]
fn from_configured_nfa() -> Result<()> {
    let nfa = NFA::compiler()
        .configure(thompson::Config::new().unanchored(true))
        .build(r"\d+")?;
    let vm = PikeVM::new_from_nfa(nfa);
    let mut cache = vm.create_cache();
    assert!(vm.is_match(&mut cache, b"order 66 executed"));
    assert!(!vm.is_match(&mut cache, b"no numbers here"));
    Ok(())
}

#[test]
fn invalid_utf8_haystacks() -> Result<()> {
    let vm = PikeVM::new("a[^b]c")?;
    let mut cache = vm.create_cache();
    assert!(vm.is_match(&mut cache, b"a\xFFc"));
    assert!(!vm.is_match(&mut cache, b"a\xFF\xFFc"));
    Ok(())
}

#[test]
fn pathological_nesting() -> Result<()> {
    // Every nested star adds more epsilon cycles. The simulation must visit
    // each state at most once per position regardless.
    let vm = PikeVM::new("((((a*)*)*)*)*b")?;
    let mut cache = vm.create_cache();
    let haystack = "a".repeat(1_000);
    assert!(!vm.is_match(&mut cache, haystack.as_bytes()));
    assert!(vm.is_match(&mut cache, (haystack + "b").as_bytes()));
    Ok(())
}
