use bstr::ByteSlice;

use regex_hybrid::{
    meta::{
        ErrorKind, Heuristic, MatchMode, Regex, Strategy, StrategyChoice,
        Volume,
    },
    syntax,
};

use crate::Result;

const LOG: &str = "\
2024-01-03 12:00:01 INFO  started worker 1
2024-01-03 12:00:02 WARN  slow response from db-2 (1534ms)
2024-01-03 12:00:02 INFO  started worker 2
2024-01-03 12:00:05 ERROR connection reset by peer
2024-01-03 12:00:07 INFO  request took 87ms
2024-01-03 12:01:00 ERROR timeout after 30000ms
not a log line
";

fn substring(pattern: &str) -> Result<Regex> {
    let re = Regex::builder()
        .configure(Regex::config().match_mode(MatchMode::Substring))
        .build(pattern)?;
    Ok(re)
}

// Count the lines of the log above that match, using the given strategy.
fn count_lines(re: &Regex, strategy: Strategy) -> usize {
    LOG.as_bytes()
        .lines()
        .filter(|line| re.is_match_using(strategy, line))
        .count()
}

#[test]
fn line_by_line() -> Result<()> {
    let cases: &[(&str, usize)] = &[
        ("ERROR", 2),
        ("[0-9]+ms", 3),
        ("^2024-01-03 12:00:0[0-9] (WARN|ERROR)", 2),
        (r"worker \d$", 2),
        (r"\(\d+ms\)$", 1),
        ("^[a-z ]+$", 1),
        ("xyz|^$", 0),
    ];
    for &(pattern, expected) in cases {
        let re = substring(pattern)?;
        assert_eq!(
            expected,
            count_lines(&re, Strategy::Nfa),
            "NFA for {:?}",
            pattern,
        );
        assert_eq!(
            expected,
            count_lines(&re, Strategy::Dfa),
            "DFA for {:?}",
            pattern,
        );
        let planned = LOG.as_bytes().lines().filter(|l| re.is_match(l));
        assert_eq!(expected, planned.count(), "plan for {:?}", pattern);
    }
    Ok(())
}

#[test]
fn plan_follows_volume() -> Result<()> {
    let volume = Volume::new().estimated_lines(1000);
    let re = Regex::builder()
        .configure(Regex::config().volume(volume))
        .build("warn|error")?;
    assert!(!re.plan().is_literal());
    assert_eq!(Strategy::Nfa, re.plan().strategy());
    assert!(re.plan().explanation().starts_with("NFA: "));
    assert!(re.plan().explanation().contains("alternation"));

    let re = Regex::builder()
        .configure(Regex::config().volume(volume))
        .build("ab+c")?;
    assert_eq!(Strategy::Dfa, re.plan().strategy());
    assert!(re.plan().explanation().starts_with("DFA: "));
    // With nothing known about the input, a single line is assumed.
    let plan = re.plan_for(&Volume::new());
    assert_eq!(Strategy::Nfa, plan.strategy());
    assert!(plan.explanation().contains("single line"));
    Ok(())
}

#[test]
fn plan_from_file_size() -> Result<()> {
    let re = Regex::new("timeout 9+")?;
    // 60 bytes per line by default, so this is about 1000 lines.
    let plan = re.plan_for(&Volume::new().file_size(60_000));
    assert_eq!(Strategy::Dfa, plan.strategy());
    assert!(plan.explanation().contains("1000"), "{}", plan);

    let re = Regex::builder()
        .configure(
            Regex::config().heuristic(Heuristic::new().bytes_per_line(60_000)),
        )
        .build("timeout 9+")?;
    let plan = re.plan_for(&Volume::new().file_size(60_000));
    assert_eq!(Strategy::Nfa, plan.strategy());
    Ok(())
}

#[test]
fn plan_override() -> Result<()> {
    let volume = Volume::new().estimated_lines(1_000_000);
    let re = Regex::builder()
        .configure(
            Regex::config()
                .volume(volume)
                .strategy("nfa".parse::<StrategyChoice>()?),
        )
        .build("ab+c")?;
    assert_eq!(Strategy::Nfa, re.plan().strategy());
    assert_eq!("NFA: selected explicitly", re.plan().to_string());
    // An override applies no matter the volume.
    let plan = re.plan_for(&Volume::new());
    assert_eq!(Strategy::Nfa, plan.strategy());

    let err = "lazy".parse::<StrategyChoice>().unwrap_err();
    assert_eq!("lazy", err.given());
    Ok(())
}

#[test]
fn literal_fast_path() -> Result<()> {
    let re = substring("connection reset")?;
    assert!(re.plan().is_literal());
    assert_eq!(
        "fast path (literal string matching)",
        re.plan().to_string(),
    );
    assert_eq!(1, count_lines(&re, Strategy::Nfa));
    assert!(re.is_match(LOG));
    assert!(!re.is_match("connection"));
    // Literal searches never touch the lazy DFA.
    assert_eq!(1, re.dfa_cache_len());

    let re = Regex::new("connection reset")?;
    assert!(re.is_match("connection reset"));
    assert!(!re.is_match("connection reset by peer"));

    let re = Regex::builder()
        .configure(Regex::config().literal_fast_path(false))
        .build("connection reset")?;
    assert!(!re.plan().is_literal());
    assert!(re.is_match("connection reset"));
    Ok(())
}

#[test]
fn errors() -> Result<()> {
    let cases: &[(&str, syntax::ErrorKind)] = &[
        ("", syntax::ErrorKind::EmptyPattern),
        ("*a", syntax::ErrorKind::DanglingOperator),
        ("a{2}{3}", syntax::ErrorKind::DanglingOperator),
        ("a{x}", syntax::ErrorKind::MalformedQuantifier),
        ("a{3,2}", syntax::ErrorKind::MalformedQuantifier),
        ("a{2", syntax::ErrorKind::MalformedQuantifier),
        ("()", syntax::ErrorKind::EmptyGroup),
        ("a|", syntax::ErrorKind::EmptyAlternation),
        ("[abc", syntax::ErrorKind::UnclosedClass),
        ("abc\\", syntax::ErrorKind::TrailingEscape),
        ("(a", syntax::ErrorKind::UnbalancedGroup),
        ("a)", syntax::ErrorKind::UnbalancedGroup),
    ];
    for &(pattern, kind) in cases {
        let err = Regex::new(pattern).unwrap_err();
        assert_eq!(ErrorKind::Syntax(kind), err.kind(), "{:?}", pattern);
        assert!(err.syntax_error().is_some());
        assert!(err.state_limit().is_none());
        assert!(!err.is_internal());
    }

    let err = Regex::builder()
        .configure(Regex::config().nfa_size_limit(Some(10)))
        .build("a{20}")
        .unwrap_err();
    assert_eq!(ErrorKind::TooManyStates, err.kind());
    assert_eq!(Some(10), err.state_limit());
    assert!(err.syntax_error().is_none());

    // Huge bounds are refused before they are expanded.
    let err = Regex::builder()
        .configure(Regex::config().nfa_size_limit(Some(10)))
        .build("x(ab){2000000000}y")
        .unwrap_err();
    assert_eq!(ErrorKind::TooManyStates, err.kind());
    assert_eq!(Some(10), err.state_limit());
    Ok(())
}

#[test]
fn dfa_cache_is_reused() -> Result<()> {
    let re = Regex::builder()
        .configure(
            Regex::config()
                .match_mode(MatchMode::Substring)
                .strategy(StrategyChoice::Dfa),
        )
        .build(r"\d+ms")?;
    let clone = re.clone();
    assert_eq!(3, count_lines(&re, Strategy::Dfa));
    let len = re.dfa_cache_len();
    assert!(len > 1);
    for _ in 0..10 {
        assert_eq!(3, count_lines(&clone, Strategy::Dfa));
    }
    assert_eq!(len, clone.dfa_cache_len());
    Ok(())
}

#[test]
fn dfa_fallback_keeps_answers() -> Result<()> {
    let re = Regex::builder()
        .configure(
            Regex::config()
                .match_mode(MatchMode::Substring)
                .strategy(StrategyChoice::Dfa)
                .dfa_state_limit(Some(3)),
        )
        .build("[0-9]+ms")?;
    for _ in 0..3 {
        assert_eq!(3, count_lines(&re, Strategy::Dfa));
        assert!(re.dfa_cache_len() <= 3);
    }
    Ok(())
}

#[test]
fn pattern_accessors() -> Result<()> {
    let re = Regex::new("a{2}|b")?;
    assert_eq!("a{2}|b", re.pattern().as_str());
    let complexity = re.pattern().complexity();
    assert!(complexity.has_quantifiers());
    assert!(complexity.has_alternation());
    assert!(!complexity.has_wildcards());
    assert_eq!(5, complexity.token_count());
    assert_eq!(5, re.pattern().tokens().len());
    assert!(re.memory_usage() > 0);
    Ok(())
}
