use core::fmt;

use crate::{
    nfa::thompson::{State, NFA},
    util::{escape::DebugByte, id::IteratorIDExt},
};

impl NFA {
    /// Return a value that renders this NFA in the Graphviz DOT language
    /// via its `Display` impl.
    ///
    /// Each NFA state becomes a node named after its ID. The match state is
    /// drawn with a double circle and epsilon transitions are labeled `ε`.
    /// The first transition of a split state is drawn solid and the second
    /// dashed.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_hybrid::nfa::thompson::NFA;
    ///
    /// let nfa = NFA::new("a|b")?;
    /// let dot = nfa.dot().to_string();
    /// assert!(dot.starts_with("digraph nfa {"));
    /// assert!(dot.contains("2 -> 0 [label=\"ε\"];"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn dot(&self) -> Dot<'_> {
        Dot { nfa: self }
    }
}

/// A Graphviz rendering of an [`NFA`], created by [`NFA::dot`].
#[derive(Clone, Copy, Debug)]
pub struct Dot<'a> {
    nfa: &'a NFA,
}

impl<'a> fmt::Display for Dot<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph nfa {{")?;
        writeln!(f, "  rankdir=LR;")?;
        writeln!(f, "  node [shape=circle];")?;
        writeln!(f, "  start [shape=point];")?;
        writeln!(f, "  start -> {};", self.nfa.start().as_usize())?;
        for (sid, state) in self.nfa.states().iter().with_state_ids() {
            let id = sid.as_usize();
            match *state {
                State::Char { byte, next } => {
                    let label = format!("{:?}", DebugByte(byte));
                    edge(f, id, next.as_usize(), &label, false)?;
                }
                State::CharSet { ref set, next } => {
                    let label = format!("{:?}", set);
                    edge(f, id, next.as_usize(), &label, false)?;
                }
                State::Split { out1, out2 } => {
                    edge(f, id, out1.as_usize(), "ε", false)?;
                    edge(f, id, out2.as_usize(), "ε", true)?;
                }
                State::AnchorStart { next } => {
                    edge(f, id, next.as_usize(), "^", false)?;
                }
                State::AnchorEnd { next } => {
                    edge(f, id, next.as_usize(), "$", false)?;
                }
                State::Match => {
                    writeln!(f, "  {} [shape=doublecircle];", id)?;
                }
            }
        }
        writeln!(f, "}}")
    }
}

fn edge(
    f: &mut fmt::Formatter<'_>,
    from: usize,
    to: usize,
    label: &str,
    dashed: bool,
) -> fmt::Result {
    write!(f, "  {} -> {} [label=\"", from, to)?;
    for ch in label.chars() {
        if ch == '"' || ch == '\\' {
            write!(f, "\\")?;
        }
        write!(f, "{}", ch)?;
    }
    write!(f, "\"")?;
    if dashed {
        write!(f, ", style=dashed")?;
    }
    writeln!(f, "];")
}
