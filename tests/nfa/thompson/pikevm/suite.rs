use regex_hybrid::nfa::thompson::{self, pikevm::PikeVM};

use crate::{
    suite::{Mode, RegexTest, TestRunner},
    Result,
};

/// Tests the default configuration of the PikeVM.
#[test]
fn default() -> Result<()> {
    TestRunner::new().test_all(compiler(thompson::Config::new()));
    Ok(())
}

/// Tests the PikeVM with a generous NFA size limit, which no test in the
/// suite should come close to.
#[test]
fn size_limit() -> Result<()> {
    let config = thompson::Config::new().nfa_size_limit(Some(1 << 12));
    TestRunner::new().test_all(compiler(config));
    Ok(())
}

/// Tests that a single cache can be reused across many searches.
#[test]
fn shared_cache() -> Result<()> {
    TestRunner::new().test_all(|test| {
        let vm = build(thompson::Config::new(), test)?;
        let mut cache = vm.create_cache();
        Ok(move |haystack: &[u8]| vm.is_match(&mut cache, haystack))
    });
    Ok(())
}

fn compiler(
    config: thompson::Config,
) -> impl FnMut(&RegexTest) -> Result<Box<dyn FnMut(&[u8]) -> bool>> {
    move |test| {
        let vm = build(config.clone(), test)?;
        let is_match: Box<dyn FnMut(&[u8]) -> bool> =
            Box::new(move |haystack: &[u8]| {
                // A fresh cache for every search checks that nothing carries
                // over between searches.
                let mut cache = vm.create_cache();
                vm.is_match(&mut cache, haystack)
            });
        Ok(is_match)
    }
}

fn build(config: thompson::Config, test: &RegexTest) -> Result<PikeVM> {
    let config = config.unanchored(test.mode == Mode::Substring);
    let nfa =
        thompson::NFA::compiler().configure(config).build(test.pattern)?;
    Ok(PikeVM::new_from_nfa(nfa))
}
