/*!
Provides non-deterministic finite automata (NFA) and regex engines that use
them.

There is only one kind of NFA in this crate, the [Thompson
NFA](thompson::NFA), along with one regex engine that searches it directly,
the [`PikeVM`](thompson::pikevm::PikeVM).
*/

pub mod thompson;
