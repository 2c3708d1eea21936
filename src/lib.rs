/*!
A small regex engine that compiles patterns into Thompson NFAs and searches
them either by simulating the NFA or with a lazily built DFA.

# Overview

Compiling a pattern runs through a short pipeline, with one module per step:

* [`syntax`] tokenizes the pattern, rewrites bounded repetitions such as
`{2,4}` into plain operators and converts the result into postfix order.
* [`nfa::thompson`] turns postfix symbols into an NFA by Thompson's
construction.

Two engines can then search the NFA:

* [`nfa::thompson::pikevm::PikeVM`] simulates the NFA by tracking the set of
active states, one haystack byte at a time.
* [`hybrid::dfa::DFA`] determinizes the NFA on demand and caches each
state it computes, so that repeated searches run at DFA speed.

Finally, [`meta::Regex`] ties everything together. It compiles a pattern,
picks an engine based on the pattern's complexity and the expected amount of
input, and takes a shortcut for patterns that are plain literals.

# Example

```
use regex_hybrid::Regex;

let re = Regex::new("a{2,4}")?;
assert!(re.is_match("aaa"));
assert!(!re.is_match("aaaaa"));

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Syntax

The supported syntax is deliberately small:

* Literal characters, including non-ASCII ones, which match their UTF-8
encoding.
* `.` matches any byte except `\n`.
* `[abc]`, `[a-z]` and `[^0-9]` classes over ASCII. A negated class also
matches every non-ASCII byte.
* `\d`, `\w`, `\s` and their negations `\D`, `\W`, `\S`. Any other escaped
character matches itself.
* `*`, `+`, `?` and the bounded repetitions `{n,m}` and `{n,}`. A bare
`{n}` is the same as `{n,}`, so `a{3}` matches `aaa` and `aaaa`.
* Alternation with `|` and grouping with `()`.
* `^` and `$`, which match only at the start and end of the haystack.

There are no backreferences, lookaround, capture groups or Unicode-aware
classes.

# Match semantics

By default, a pattern must match an entire haystack. Set
[`meta::MatchMode::Substring`] to search for a match anywhere in it.

# Crate features

* **logging** - Emits events about compilation, strategy selection and lazy
DFA state creation through the [`log`](https://docs.rs/log) crate.
*/

#[cfg(not(any(
    target_pointer_width = "16",
    target_pointer_width = "32",
    target_pointer_width = "64"
)))]
compile_error!("regex-hybrid currently not supported on non-{16,32,64}");

pub use crate::meta::{
    compile, BuildError, Complexity, Heuristic, MatchMode, Pattern, Regex,
    Strategy, StrategyChoice, Volume,
};

#[macro_use]
mod macros;

pub mod hybrid;
pub mod meta;
pub mod nfa;
pub mod syntax;
pub mod util;
