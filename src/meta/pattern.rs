use crate::{
    meta::{complexity::Complexity, error::BuildError},
    nfa::thompson,
    syntax::{self, Token},
};

/// A compiled pattern: its NFA, the tokens it was compiled from and a
/// summary of its complexity.
///
/// A `Pattern` is immutable. Both matching strategies search the same NFA,
/// so one pattern can back an NFA simulation and a lazy DFA at once.
///
/// # Example
///
/// ```
/// use regex_hybrid::compile;
///
/// let pattern = compile("a{2,4}")?;
/// assert_eq!("a{2,4}", pattern.as_str());
/// assert!(pattern.complexity().has_quantifiers());
/// // 'a', '{2,4}' and the end marker.
/// assert_eq!(3, pattern.tokens().len());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Pattern {
    pattern: String,
    nfa: thompson::NFA,
    tokens: Vec<Token>,
    complexity: Complexity,
}

impl Pattern {
    /// Compile the given pattern with the given NFA compiler.
    pub(crate) fn build(
        pattern: &str,
        compiler: &thompson::Compiler,
    ) -> Result<Pattern, BuildError> {
        let tokens = syntax::tokenize(pattern).map_err(BuildError::syntax)?;
        let symbols = compiler.translate(&tokens).map_err(BuildError::nfa)?;
        let nfa =
            compiler.build_from_postfix(&symbols).map_err(BuildError::nfa)?;
        let complexity = Complexity::analyze(&tokens);
        debug!(
            "compiled {:?} from {} tokens into {} NFA states",
            pattern,
            tokens.len(),
            nfa.len(),
        );
        Ok(Pattern { pattern: pattern.to_string(), nfa, tokens, complexity })
    }

    /// Returns the pattern string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns the compiled NFA.
    pub fn nfa(&self) -> &thompson::NFA {
        &self.nfa
    }

    /// Returns the tokens of the pattern, before bounded quantifiers were
    /// expanded. The last token is always the end marker.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn complexity(&self) -> &Complexity {
        &self.complexity
    }
}

/// Compile a pattern using the default configuration.
///
/// The resulting NFA matches whole haystacks only. To match substrings, or
/// to choose a strategy and search in one go, use a
/// [`Regex`](crate::meta::Regex) instead.
///
/// # Example
///
/// ```
/// use regex_hybrid::{compile, meta::ErrorKind, syntax};
///
/// let err = compile("a(b").unwrap_err();
/// assert_eq!(
///     ErrorKind::Syntax(syntax::ErrorKind::UnbalancedGroup),
///     err.kind(),
/// );
/// ```
pub fn compile(pattern: &str) -> Result<Pattern, BuildError> {
    Pattern::build(pattern, &thompson::Compiler::new())
}
