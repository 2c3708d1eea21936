use regex_hybrid::meta::{self, MatchMode, Regex, StrategyChoice};

use crate::{
    suite::{Mode, RegexTest, TestRunner},
    Result,
};

/// Tests the default configuration, where the strategy is left to the
/// heuristic and literal patterns take the fast path.
#[test]
fn default() -> Result<()> {
    run(Regex::config())
}

#[test]
fn forced_dfa() -> Result<()> {
    run(Regex::config().strategy(StrategyChoice::Dfa))
}

#[test]
fn forced_nfa() -> Result<()> {
    run(Regex::config().strategy(StrategyChoice::Nfa))
}

/// Tests that every pattern, including plain literals, gives the same
/// answers when compiled to an automaton.
#[test]
fn no_literal_fast_path() -> Result<()> {
    run(Regex::config().literal_fast_path(false))?;
    run(Regex::config()
        .literal_fast_path(false)
        .strategy(StrategyChoice::Dfa))
}

/// Tests the lazy DFA with a cache so small that most searches fall back
/// to the NFA simulation partway through.
#[test]
fn tiny_dfa_cache() -> Result<()> {
    run(Regex::config()
        .strategy(StrategyChoice::Dfa)
        .literal_fast_path(false)
        .dfa_state_limit(Some(3)))
}

fn run(config: meta::Config) -> Result<()> {
    TestRunner::new().test_all(|test| {
        let re = builder(config, test).build(test.pattern)?;
        Ok(move |haystack: &[u8]| re.is_match(haystack))
    });
    Ok(())
}

fn builder(config: meta::Config, test: &RegexTest) -> meta::Builder {
    let mode = match test.mode {
        Mode::Full => MatchMode::Full,
        Mode::Substring => MatchMode::Substring,
    };
    let mut builder = Regex::builder();
    builder.configure(config.match_mode(mode));
    builder
}
