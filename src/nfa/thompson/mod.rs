/*!
Defines a Thompson NFA and provides the [`PikeVM`](pikevm::PikeVM) regex
engine.

A Thompson NFA is built by a [`Compiler`] from the postfix form of a
pattern. Besides direct simulation, it is the input from which
[lazy DFAs](crate::hybrid) are determinized.
*/

mod builder;
mod compiler;
mod dot;
mod error;
mod nfa;
pub mod pikevm;

pub use self::{
    compiler::{Compiler, Config},
    dot::Dot,
    error::BuildError,
    nfa::{State, NFA},
};
