/*!
A module for building and searching with lazy deterministic finite automata
(DFAs).

Like other modules in this crate, lazy DFAs support a rich regex syntax, but
they are built at search time rather than up front. A lazy DFA is created
cheaply from a Thompson NFA, and each state is determinized from the NFA only
when a search first needs it. Once computed, a transition is a single table
lookup, so repeated searches over similar haystacks run at DFA speed.

The states and transitions computed so far live in a [`dfa::Cache`]. A cache
only ever grows, up to a configurable limit on the number of states. A search
that would exceed that limit returns a [`CacheError`], at which point the
caller may [reset](dfa::Cache::reset) the cache or fall back to the
[`PikeVM`](crate::nfa::thompson::pikevm::PikeVM).

# Example

```
use regex_hybrid::hybrid::dfa::DFA;

let dfa = DFA::new(r"[a-z]+\d{2}")?;
let mut cache = dfa.create_cache();
assert!(dfa.try_is_match(&mut cache, b"abc42")?);
assert!(!dfa.try_is_match(&mut cache, b"abc4")?);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    error::{BuildError, CacheError},
    id::LazyStateID,
};

pub mod dfa;
mod error;
mod id;
mod state;
