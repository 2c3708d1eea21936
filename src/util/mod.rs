/*!
A collection of modules that provide APIs that are useful across many regex
engines.

Most of this module is crate internal. The public pieces are the identifier
types used to address NFA states, the byte set used by character class
states and a helper for printing bytes in debug output.
*/

pub mod charset;
pub mod escape;
pub mod id;

pub(crate) mod determinize;
pub(crate) mod pool;
pub(crate) mod state_set;
