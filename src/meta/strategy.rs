use core::{fmt, str::FromStr};

use crate::meta::complexity::Complexity;

/// The default number of lines above which a simple pattern is always
/// searched with a lazy DFA.
const DEFAULT_MIN_LINES: u64 = 50;

/// The default number of tokens above which a pattern is considered too
/// expensive to determinize.
const DEFAULT_MAX_TOKENS: usize = 10;

/// The default average line length used to estimate a line count from a
/// file size.
const DEFAULT_BYTES_PER_LINE: u64 = 60;

/// The matching engine used to search a haystack.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strategy {
    /// Simulate the NFA directly with a
    /// [`PikeVM`](crate::nfa::thompson::pikevm::PikeVM). This has no
    /// upfront cost, but every byte of every haystack visits every active
    /// NFA state.
    Nfa,
    /// Search with a [lazy DFA](crate::hybrid::dfa::DFA). Each state costs
    /// a subset construction the first time it is reached, after which each
    /// byte is a single table lookup.
    Dfa,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Strategy::Nfa => write!(f, "NFA"),
            Strategy::Dfa => write!(f, "DFA"),
        }
    }
}

/// A caller's preference for which [`Strategy`] to use.
///
/// This parses from the strings `auto`, `dfa` and `nfa`, ignoring ASCII
/// case.
///
/// # Example
///
/// ```
/// use regex_hybrid::meta::StrategyChoice;
///
/// assert_eq!(StrategyChoice::Dfa, "DFA".parse::<StrategyChoice>()?);
/// assert_eq!(StrategyChoice::Auto, "auto".parse::<StrategyChoice>()?);
/// assert!("backtrack".parse::<StrategyChoice>().is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StrategyChoice {
    /// Let the [`Heuristic`] decide.
    Auto,
    /// Always use a lazy DFA.
    Dfa,
    /// Always use the NFA simulation.
    Nfa,
}

impl Default for StrategyChoice {
    fn default() -> StrategyChoice {
        StrategyChoice::Auto
    }
}

impl FromStr for StrategyChoice {
    type Err = ParseStrategyChoiceError;

    fn from_str(s: &str) -> Result<StrategyChoice, ParseStrategyChoiceError> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(StrategyChoice::Auto)
        } else if s.eq_ignore_ascii_case("dfa") {
            Ok(StrategyChoice::Dfa)
        } else if s.eq_ignore_ascii_case("nfa") {
            Ok(StrategyChoice::Nfa)
        } else {
            Err(ParseStrategyChoiceError { given: s.to_string() })
        }
    }
}

impl fmt::Display for StrategyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StrategyChoice::Auto => write!(f, "auto"),
            StrategyChoice::Dfa => write!(f, "dfa"),
            StrategyChoice::Nfa => write!(f, "nfa"),
        }
    }
}

/// An error that occurs when parsing an unrecognized [`StrategyChoice`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseStrategyChoiceError {
    given: String,
}

impl ParseStrategyChoiceError {
    /// Returns the string that failed to parse.
    pub fn given(&self) -> &str {
        &self.given
    }
}

impl std::error::Error for ParseStrategyChoiceError {}

impl fmt::Display for ParseStrategyChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized strategy {:?}, expected one of auto, dfa or nfa",
            self.given,
        )
    }
}

/// What is known about the amount of input that will be searched.
///
/// Both measurements are optional. When only a file size is known, the
/// [`Heuristic`] derives a line count from it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Volume {
    file_size: Option<u64>,
    estimated_lines: Option<u64>,
}

impl Volume {
    /// Return a volume about which nothing is known.
    pub fn new() -> Volume {
        Volume::default()
    }

    /// Set the size, in bytes, of the input.
    pub fn file_size(self, bytes: u64) -> Volume {
        Volume { file_size: Some(bytes), ..self }
    }

    /// Set the estimated number of lines in the input. This takes
    /// precedence over an estimate derived from the file size.
    pub fn estimated_lines(self, lines: u64) -> Volume {
        Volume { estimated_lines: Some(lines), ..self }
    }

    pub fn get_file_size(&self) -> Option<u64> {
        self.file_size
    }

    pub fn get_estimated_lines(&self) -> Option<u64> {
        self.estimated_lines
    }
}

/// The rule that decided a strategy. `choose` and `explain` both go through
/// this so that they can never disagree.
#[derive(Clone, Copy, Debug)]
enum Reason {
    SingleLine,
    ManyLinesSimplePattern { lines: u64 },
    Alternation,
    TooManyTokens { count: usize },
    Default,
}

impl Reason {
    fn strategy(&self) -> Strategy {
        match *self {
            Reason::SingleLine
            | Reason::Alternation
            | Reason::TooManyTokens { .. } => Strategy::Nfa,
            Reason::ManyLinesSimplePattern { .. } | Reason::Default => {
                Strategy::Dfa
            }
        }
    }
}

/// Decides between an NFA simulation and a lazy DFA.
///
/// Building lazy DFA states costs time up front, which only pays off when
/// the states are reused over many lines of input. The heuristic weighs the
/// amount of input against the [`Complexity`] of the pattern, applying the
/// first rule that fits:
///
/// 1. If there is no line estimate, or at most one line, use the NFA.
/// 2. If there are more than [`min_lines`](Heuristic::min_lines) lines and
/// the pattern has no complex features, use the DFA.
/// 3. If the pattern has an alternation, or more than
/// [`max_tokens`](Heuristic::max_tokens) tokens, use the NFA.
/// 4. Otherwise, use the DFA.
///
/// # Example
///
/// ```
/// use regex_hybrid::{
///     meta::{Complexity, Heuristic, Strategy, Volume},
///     syntax,
/// };
///
/// let heuristic = Heuristic::new();
/// let simple = Complexity::analyze(&syntax::tokenize("error")?);
/// let alternation = Complexity::analyze(&syntax::tokenize("warn|error")?);
/// let volume = Volume::new().estimated_lines(1000);
///
/// assert_eq!(Strategy::Dfa, heuristic.choose(&simple, &volume));
/// assert_eq!(Strategy::Nfa, heuristic.choose(&alternation, &volume));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Heuristic {
    min_lines: Option<u64>,
    max_tokens: Option<usize>,
    bytes_per_line: Option<u64>,
}

impl Heuristic {
    /// Return a heuristic with the default thresholds.
    pub fn new() -> Heuristic {
        Heuristic::default()
    }

    /// Set the number of lines that a simple pattern must exceed to always
    /// be searched with a DFA.
    ///
    /// The default is 50.
    pub fn min_lines(self, lines: u64) -> Heuristic {
        Heuristic { min_lines: Some(lines), ..self }
    }

    /// Set the number of tokens above which a pattern is considered too
    /// expensive to determinize.
    ///
    /// The default is 10.
    pub fn max_tokens(self, tokens: usize) -> Heuristic {
        Heuristic { max_tokens: Some(tokens), ..self }
    }

    /// Set the average line length, in bytes, used to estimate a line count
    /// from a file size. A value of zero is treated as one.
    ///
    /// The default is 60.
    pub fn bytes_per_line(self, bytes: u64) -> Heuristic {
        Heuristic { bytes_per_line: Some(bytes), ..self }
    }

    pub fn get_min_lines(&self) -> u64 {
        self.min_lines.unwrap_or(DEFAULT_MIN_LINES)
    }

    pub fn get_max_tokens(&self) -> usize {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn get_bytes_per_line(&self) -> u64 {
        self.bytes_per_line.unwrap_or(DEFAULT_BYTES_PER_LINE).max(1)
    }

    /// Estimate the number of lines in a file of the given size.
    pub fn estimate_lines(&self, file_size: u64) -> u64 {
        file_size / self.get_bytes_per_line()
    }

    /// Pick the strategy for searching input of the given volume with a
    /// pattern of the given complexity.
    pub fn choose(
        &self,
        complexity: &Complexity,
        volume: &Volume,
    ) -> Strategy {
        self.reason(complexity, volume).strategy()
    }

    /// Describe why [`Heuristic::choose`] picks the strategy it does.
    ///
    /// The description starts with the name of the chosen strategy.
    pub fn explain(
        &self,
        complexity: &Complexity,
        volume: &Volume,
    ) -> String {
        let reason = self.reason(complexity, volume);
        let why = match reason {
            Reason::SingleLine => {
                "single line input, avoiding DFA construction cost".to_string()
            }
            Reason::ManyLinesSimplePattern { lines } => format!(
                "about {} lines with a simple pattern, \
                 amortizing DFA construction cost",
                lines,
            ),
            Reason::Alternation => {
                "pattern contains alternation, DFA construction too expensive"
                    .to_string()
            }
            Reason::TooManyTokens { count } => format!(
                "complex pattern with {} tokens, \
                 avoiding expensive DFA construction",
                count,
            ),
            Reason::Default => {
                "pattern is small enough that DFA states are cheap to build"
                    .to_string()
            }
        };
        format!("{}: {}", reason.strategy(), why)
    }

    /// Return the line estimate for the given volume, if there is one.
    fn lines(&self, volume: &Volume) -> Option<u64> {
        volume
            .get_estimated_lines()
            .or_else(|| volume.get_file_size().map(|n| self.estimate_lines(n)))
    }

    fn reason(&self, complexity: &Complexity, volume: &Volume) -> Reason {
        let lines = match self.lines(volume) {
            Some(lines) if lines > 1 => lines,
            _ => return Reason::SingleLine,
        };
        if lines > self.get_min_lines()
            && !complexity.has_complex_features()
        {
            return Reason::ManyLinesSimplePattern { lines };
        }
        if complexity.has_alternation() {
            return Reason::Alternation;
        }
        if complexity.token_count() > self.get_max_tokens() {
            return Reason::TooManyTokens { count: complexity.token_count() };
        }
        Reason::Default
    }
}
