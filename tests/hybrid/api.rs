use regex_hybrid::{hybrid::dfa::DFA, nfa::thompson};

use crate::Result;

// Searching haystacks whose transitions were all computed before must not
// add any states or allocate.
#[test]
fn seen_inputs_do_not_grow_cache() -> Result<()> {
    let dfa = DFA::new(r"[a-z]+(\d|_)[a-z]*")?;
    let mut cache = dfa.create_cache();
    let haystacks: &[&[u8]] = &[b"abc1def", b"x_", b"hello", b"q9"];
    for h in haystacks {
        dfa.try_is_match(&mut cache, h)?;
    }
    let (len, mem) = (cache.state_len(), cache.memory_usage());
    for _ in 0..100 {
        for h in haystacks {
            dfa.try_is_match(&mut cache, h)?;
        }
    }
    assert_eq!(len, cache.state_len());
    assert_eq!(mem, cache.memory_usage());
    Ok(())
}

// Walking the DFA by hand gives the same answers as 'try_is_match'.
#[test]
fn manual_walk() -> Result<()> {
    let dfa = DFA::new("(ab)+")?;
    let mut cache = dfa.create_cache();

    let mut sid = dfa.start_state(&mut cache)?;
    assert!(!sid.is_match());
    for (i, &b) in b"abab".iter().enumerate() {
        sid = dfa.next_state(&mut cache, sid, b)?;
        assert!(!sid.is_dead());
        assert_eq!(i % 2 == 1, sid.is_match());
    }
    sid = dfa.next_state(&mut cache, sid, b'b')?;
    assert!(sid.is_dead());
    // The dead state loops on every byte.
    assert!(dfa.next_state(&mut cache, sid, b'a')?.is_dead());
    Ok(())
}

// The cache grows with the number of distinct NFA state sets visited, not
// with the length of the haystack.
#[test]
fn states_are_bounded_by_subsets() -> Result<()> {
    let dfa = DFA::new("(a|b)*")?;
    let mut cache = dfa.create_cache();
    let haystack = "ab".repeat(50_000);
    assert!(dfa.try_is_match(&mut cache, haystack.as_bytes())?);
    // The dead state and the start state, which every byte leads back to.
    assert_eq!(2, cache.state_len());
    Ok(())
}

#[test]
fn state_limit_error() -> Result<()> {
    let dfa = DFA::builder()
        .configure(DFA::config().state_limit(Some(5)))
        .build("abcdefgh")?;
    let mut cache = dfa.create_cache();
    let err = dfa.try_is_match(&mut cache, b"abcdefgh").unwrap_err();
    assert_eq!(5, err.state_limit());
    assert!(err.to_string().contains('5'));

    // Searches that only need the states already computed still work.
    assert!(!dfa.try_is_match(&mut cache, b"ab")?);
    assert!(!dfa.try_is_match(&mut cache, b"x")?);

    cache.reset(&dfa);
    assert_eq!(1, cache.state_len());
    Ok(())
}

#[test]
fn no_state_limit() -> Result<()> {
    let dfa = DFA::builder()
        .configure(DFA::config().state_limit(None))
        .build("[ab]*a[ab]{10,10}")?;
    let mut cache = dfa.create_cache();
    // This pattern is the textbook example of exponential blowup: there is
    // a distinct state for each combination of the last 11 bytes.
    let mut x: u32 = 0x9E37_79B9;
    let haystack: Vec<u8> = (0..5_000)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            if x & 1 == 0 {
                b'a'
            } else {
                b'b'
            }
        })
        .collect();
    dfa.try_is_match(&mut cache, &haystack)?;
    assert!(cache.state_len() > 100);
    Ok(())
}

#[test]
fn non_ascii() -> Result<()> {
    let dfa = DFA::new("☃+[^a]")?;
    let mut cache = dfa.create_cache();
    assert!(dfa.try_is_match(&mut cache, "☃☃b".as_bytes())?);
    assert!(!dfa.try_is_match(&mut cache, "☃☃a".as_bytes())?);
    assert!(!dfa.try_is_match(&mut cache, "☃".as_bytes())?);
    Ok(())
}

#[test]
fn shared_between_threads() -> Result<()> {
    let dfa = DFA::builder()
        .thompson(thompson::Config::new().unanchored(true))
        .build("needle[0-9]")?;
    std::thread::scope(|scope| {
        for i in 0..4 {
            let dfa = &dfa;
            scope.spawn(move || {
                let mut cache = dfa.create_cache();
                let haystack = format!("hay needle{} hay", i);
                let yes = dfa.try_is_match(&mut cache, haystack.as_bytes());
                assert!(yes.unwrap());
                let no = dfa.try_is_match(&mut cache, b"hay needle");
                assert!(!no.unwrap());
            });
        }
    });
    Ok(())
}
