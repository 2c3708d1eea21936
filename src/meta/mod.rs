/*!
Provides a regex matcher that composes the other engines in this crate.

The main type of this module is [`Regex`]. It compiles a pattern once, then
decides whether to search it with the
[`PikeVM`](crate::nfa::thompson::pikevm::PikeVM) or with a
[lazy DFA](crate::hybrid::dfa::DFA). Both engines always agree on whether a
haystack matches. They only differ in cost: the PikeVM has no setup cost but
is slow per byte, while the lazy DFA pays for each state once and is fast
afterwards. The choice is made by a [`Heuristic`] from the [`Complexity`] of
the pattern and the expected [`Volume`] of input, unless a
[`StrategyChoice`] forces one.

# Example

```
use regex_hybrid::meta::{Regex, Strategy, StrategyChoice};

let re = Regex::builder()
    .configure(Regex::config().strategy(StrategyChoice::Dfa))
    .build(r"\d{4}-\d{2}-\d{2}")?;
assert_eq!(Strategy::Dfa, re.plan().strategy());
assert!(re.is_match("2024-01-31"));
assert!(!re.is_match("2024-1-31"));

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    complexity::Complexity,
    error::{BuildError, ErrorKind},
    literal::is_simple_literal,
    pattern::{compile, Pattern},
    regex::{Builder, Config, MatchMode, Plan, Regex},
    strategy::{
        Heuristic, ParseStrategyChoiceError, Strategy, StrategyChoice, Volume,
    },
};

mod complexity;
mod error;
mod literal;
mod pattern;
mod regex;
mod strategy;
