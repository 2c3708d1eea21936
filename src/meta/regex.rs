use core::fmt;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    hybrid,
    meta::{
        error::BuildError,
        literal::Literal,
        pattern::Pattern,
        strategy::{Heuristic, Strategy, StrategyChoice, Volume},
    },
    nfa::thompson::{self, pikevm::PikeVM},
    util::pool::Pool,
};

/// The type of the closure used to create PikeVM caches for the pool.
type CachePoolFn =
    Box<dyn Fn() -> thompson::pikevm::Cache + Send + Sync + 'static>;

/// What counts as a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatchMode {
    /// The pattern must match the entire haystack.
    Full,
    /// The pattern must match some substring of the haystack. This behaves
    /// as if the pattern were surrounded by `.*` on both sides, except that
    /// the implicit prefix and suffix also match `\n`. Anchors keep their
    /// meaning: `^` only matches at the start of the haystack and `$` only
    /// at its end.
    Substring,
}

impl Default for MatchMode {
    fn default() -> MatchMode {
        MatchMode::Full
    }
}

/// A compiled regex that picks a matching strategy for its searches.
///
/// A `Regex` compiles its pattern once into a Thompson NFA, and can search
/// it either with an NFA simulation or with a lazy DFA. Which one it uses
/// for [`Regex::is_match`] is fixed at build time, either explicitly through
/// [`Config::strategy`] or by asking a [`Heuristic`] about the expected
/// input [`Volume`]. The decision, along with a description of why it was
/// made, is available through [`Regex::plan`].
///
/// Patterns without any metacharacters skip both engines and are matched
/// with a plain substring search or equality test, unless this is disabled
/// with [`Config::literal_fast_path`].
///
/// A `Regex` is cheap to clone and can be shared between threads. The lazy
/// DFA cache is shared by all clones and protected by a lock, while the
/// NFA simulation scratch space comes from a pool.
///
/// # Example
///
/// ```
/// use regex_hybrid::meta::{MatchMode, Regex, Strategy, Volume};
///
/// let re = Regex::builder()
///     .configure(
///         Regex::config()
///             .match_mode(MatchMode::Substring)
///             .volume(Volume::new().estimated_lines(10_000)),
///     )
///     .build(r"[0-9]+ms")?;
/// assert_eq!(Strategy::Dfa, re.plan().strategy());
/// assert!(re.is_match("request took 153ms"));
/// assert!(!re.is_match("request took a while"));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Regex {
    imp: Arc<RegexI>,
}

#[derive(Debug)]
struct RegexI {
    pattern: Pattern,
    config: Config,
    plan: Plan,
    literal: Option<Literal>,
    pikevm: PikeVM,
    pikevm_pool: Pool<thompson::pikevm::Cache, CachePoolFn>,
    dfa: hybrid::dfa::DFA,
    dfa_cache: Mutex<hybrid::dfa::Cache>,
}

impl Regex {
    /// Compile the given pattern using the default configuration.
    pub fn new(pattern: &str) -> Result<Regex, BuildError> {
        Regex::builder().build(pattern)
    }

    /// Return a default configuration for a `Regex`.
    pub fn config() -> Config {
        Config::new()
    }

    /// Return a builder for configuring the construction of a `Regex`.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Returns true if and only if this regex matches the given haystack.
    ///
    /// The search is carried out as described by [`Regex::plan`].
    pub fn is_match<H: ?Sized + AsRef<[u8]>>(&self, haystack: &H) -> bool {
        let haystack = haystack.as_ref();
        if let Some(ref lit) = self.imp.literal {
            return lit.is_match(haystack);
        }
        self.search(self.imp.plan.strategy(), haystack)
    }

    /// Search with the given strategy, regardless of the plan. This never
    /// uses the literal fast path.
    ///
    /// Both strategies always agree on whether a haystack matches.
    pub fn is_match_using<H: ?Sized + AsRef<[u8]>>(
        &self,
        strategy: Strategy,
        haystack: &H,
    ) -> bool {
        self.search(strategy, haystack.as_ref())
    }

    /// Search by simulating the NFA.
    pub fn nfa_match<H: ?Sized + AsRef<[u8]>>(&self, haystack: &H) -> bool {
        let mut cache = self.imp.pikevm_pool.get();
        self.imp.pikevm.is_match(&mut cache, haystack.as_ref())
    }

    /// Search with the lazy DFA.
    ///
    /// States computed by this search stay in the cache shared by all
    /// clones of this regex, so later searches over similar haystacks
    /// compute fewer states. If the cache fills up, it is cleared and
    /// this search is finished by the NFA simulation instead.
    pub fn dfa_match<H: ?Sized + AsRef<[u8]>>(&self, haystack: &H) -> bool {
        let haystack = haystack.as_ref();
        let mut cache = self.lock_dfa_cache();
        match self.imp.dfa.try_is_match(&mut cache, haystack) {
            Ok(yes) => yes,
            Err(_err) => {
                debug!(
                    "lazy DFA gave up ({}), clearing its cache and \
                     falling back to the PikeVM",
                    _err,
                );
                cache.reset(&self.imp.dfa);
                drop(cache);
                self.nfa_match(haystack)
            }
        }
    }

    /// Returns how this regex searches in [`Regex::is_match`].
    pub fn plan(&self) -> &Plan {
        &self.imp.plan
    }

    /// Returns how this regex would search input of the given volume.
    ///
    /// This applies the same configuration that built the plan returned by
    /// [`Regex::plan`], and only swaps in a different volume.
    pub fn plan_for(&self, volume: &Volume) -> Plan {
        Plan::new(
            &self.imp.config,
            &self.imp.pattern,
            self.imp.literal.is_some(),
            volume,
        )
    }

    /// Returns the compiled pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.imp.pattern
    }

    /// Returns the configuration this regex was built with.
    pub fn get_config(&self) -> &Config {
        &self.imp.config
    }

    /// Returns the number of states in the shared lazy DFA cache, including
    /// the dead state.
    pub fn dfa_cache_len(&self) -> usize {
        self.lock_dfa_cache().state_len()
    }

    /// Returns the heap memory usage, in bytes, of this regex, including the
    /// lazy DFA cache. The pooled NFA simulation caches are not included.
    pub fn memory_usage(&self) -> usize {
        self.imp.pattern.nfa().memory_usage()
            + self.lock_dfa_cache().memory_usage()
            + self.imp.literal.as_ref().map_or(0, |lit| lit.memory_usage())
    }

    fn search(&self, strategy: Strategy, haystack: &[u8]) -> bool {
        match strategy {
            Strategy::Nfa => self.nfa_match(haystack),
            Strategy::Dfa => self.dfa_match(haystack),
        }
    }

    fn lock_dfa_cache(&self) -> MutexGuard<'_, hybrid::dfa::Cache> {
        // A panic while holding the lock may leave a state half added, so a
        // poisoned cache is cleared before it is used again.
        self.imp.dfa_cache.lock().unwrap_or_else(|err| {
            let mut cache = err.into_inner();
            cache.reset(&self.imp.dfa);
            cache
        })
    }
}

/// How a [`Regex`] searches.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    literal: bool,
    strategy: Strategy,
    explanation: String,
}

impl Plan {
    fn new(
        config: &Config,
        pattern: &Pattern,
        literal: bool,
        volume: &Volume,
    ) -> Plan {
        let complexity = pattern.complexity();
        let heuristic = config.get_heuristic();
        let (strategy, explanation) = match config.get_strategy() {
            StrategyChoice::Auto => (
                heuristic.choose(complexity, volume),
                heuristic.explain(complexity, volume),
            ),
            StrategyChoice::Dfa => {
                (Strategy::Dfa, "DFA: selected explicitly".to_string())
            }
            StrategyChoice::Nfa => {
                (Strategy::Nfa, "NFA: selected explicitly".to_string())
            }
        };
        Plan { literal, strategy, explanation }
    }

    /// Returns true when searches skip both engines because the pattern is
    /// a plain literal.
    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// Returns the engine used for searches that are not handled by the
    /// literal fast path.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns a description of why [`Plan::strategy`] was chosen.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literal {
            write!(f, "fast path (literal string matching)")
        } else {
            write!(f, "{}", self.explanation)
        }
    }
}

/// An object describing the configuration of a [`Regex`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    // As with other configuration types in this crate, we put all our knobs
    // in options so that we can distinguish between "default" and "not set."
    // See the 'overwrite' method.
    strategy: Option<StrategyChoice>,
    match_mode: Option<MatchMode>,
    heuristic: Option<Heuristic>,
    volume: Option<Volume>,
    nfa_size_limit: Option<Option<usize>>,
    dfa_state_limit: Option<Option<usize>>,
    literal_fast_path: Option<bool>,
}

impl Config {
    /// Create a new configuration object for a `Regex`.
    pub fn new() -> Config {
        Config::default()
    }

    /// Force a strategy, or leave the choice to the heuristic.
    ///
    /// The default is [`StrategyChoice::Auto`].
    pub fn strategy(self, choice: StrategyChoice) -> Config {
        Config { strategy: Some(choice), ..self }
    }

    /// Set whether the pattern must match entire haystacks or only some
    /// substring of them.
    ///
    /// The default is [`MatchMode::Full`].
    pub fn match_mode(self, mode: MatchMode) -> Config {
        Config { match_mode: Some(mode), ..self }
    }

    /// Set the heuristic consulted when the strategy is
    /// [`StrategyChoice::Auto`].
    pub fn heuristic(self, heuristic: Heuristic) -> Config {
        Config { heuristic: Some(heuristic), ..self }
    }

    /// Describe the amount of input that is going to be searched.
    ///
    /// By default nothing is known about the input, which leads the
    /// heuristic to pick the NFA simulation.
    pub fn volume(self, volume: Volume) -> Config {
        Config { volume: Some(volume), ..self }
    }

    /// Set the maximum number of NFA states. See
    /// [`thompson::Config::nfa_size_limit`].
    ///
    /// The default is no limit.
    pub fn nfa_size_limit(self, limit: Option<usize>) -> Config {
        Config { nfa_size_limit: Some(limit), ..self }
    }

    /// Set the maximum number of states in the lazy DFA cache. See
    /// [`hybrid::dfa::Config::state_limit`].
    pub fn dfa_state_limit(self, limit: Option<usize>) -> Config {
        Config { dfa_state_limit: Some(limit), ..self }
    }

    /// Set whether patterns without metacharacters are matched by plain
    /// string comparison instead of an automaton.
    ///
    /// This is enabled by default.
    pub fn literal_fast_path(self, yes: bool) -> Config {
        Config { literal_fast_path: Some(yes), ..self }
    }

    pub fn get_strategy(&self) -> StrategyChoice {
        self.strategy.unwrap_or_default()
    }

    pub fn get_match_mode(&self) -> MatchMode {
        self.match_mode.unwrap_or_default()
    }

    pub fn get_heuristic(&self) -> Heuristic {
        self.heuristic.unwrap_or_default()
    }

    pub fn get_volume(&self) -> Volume {
        self.volume.unwrap_or_default()
    }

    pub fn get_nfa_size_limit(&self) -> Option<usize> {
        self.nfa_size_limit.unwrap_or(None)
    }

    pub fn get_dfa_state_limit(&self) -> Option<usize> {
        self.dfa_state_limit
            .unwrap_or_else(|| hybrid::dfa::Config::new().get_state_limit())
    }

    pub fn get_literal_fast_path(&self) -> bool {
        self.literal_fast_path.unwrap_or(true)
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    pub(crate) fn overwrite(&self, o: Config) -> Config {
        Config {
            strategy: o.strategy.or(self.strategy),
            match_mode: o.match_mode.or(self.match_mode),
            heuristic: o.heuristic.or(self.heuristic),
            volume: o.volume.or(self.volume),
            nfa_size_limit: o.nfa_size_limit.or(self.nfa_size_limit),
            dfa_state_limit: o.dfa_state_limit.or(self.dfa_state_limit),
            literal_fast_path: o.literal_fast_path.or(self.literal_fast_path),
        }
    }
}

/// A builder for configuring and constructing a [`Regex`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Compile the given pattern into a `Regex`.
    pub fn build(&self, pattern: &str) -> Result<Regex, BuildError> {
        let config = self.config;
        let mode = config.get_match_mode();
        debug!("building regex for {:?} ({:?})", pattern, mode);

        let mut compiler = thompson::Compiler::new();
        compiler.configure(
            thompson::Config::new()
                .nfa_size_limit(config.get_nfa_size_limit())
                .unanchored(mode == MatchMode::Substring),
        );
        let pattern = Pattern::build(pattern, &compiler)?;
        let literal = if config.get_literal_fast_path() {
            Literal::new(pattern.as_str(), mode)
        } else {
            None
        };
        let plan = Plan::new(
            &config,
            &pattern,
            literal.is_some(),
            &config.get_volume(),
        );
        debug!("search plan: {}", plan);

        let pikevm = PikeVM::new_from_nfa(pattern.nfa().clone());
        let pool_vm = pikevm.clone();
        let create: CachePoolFn = Box::new(move || pool_vm.create_cache());
        let dfa = hybrid::dfa::DFA::builder()
            .configure(
                hybrid::dfa::Config::new()
                    .state_limit(config.get_dfa_state_limit()),
            )
            .build_from_nfa(pattern.nfa().clone());
        let dfa_cache = Mutex::new(dfa.create_cache());
        let imp = RegexI {
            pattern,
            config,
            plan,
            literal,
            pikevm,
            pikevm_pool: Pool::new(create),
            dfa,
            dfa_cache,
        };
        Ok(Regex { imp: Arc::new(imp) })
    }

    /// Apply the given configuration options to this builder.
    pub fn configure(&mut self, config: Config) -> &mut Builder {
        self.config = self.config.overwrite(config);
        self
    }
}
