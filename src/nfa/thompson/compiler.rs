use crate::{
    nfa::thompson::{
        builder::{Builder, Hole},
        error::BuildError,
        nfa::NFA,
    },
    syntax::{self, Symbol, Token},
    util::{charset::CharacterSet, id::StateID},
};

/// The configuration used for compiling a Thompson NFA from a pattern.
///
/// The default configuration guarantees that if the pattern is valid, then
/// an NFA will be built with no state limit and with full-string semantics.
#[derive(Clone, Debug, Default)]
pub struct Config {
    nfa_size_limit: Option<Option<usize>>,
    unanchored: Option<bool>,
}

impl Config {
    /// Return a new default Thompson NFA compiler configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Sets an approximate size limit on the total number of states used by
    /// the NFA being compiled.
    ///
    /// Bounded repetitions are compiled by copying the repeated expression,
    /// so a pattern like `[a-z]{1000}` produces at least a thousand states.
    /// This permits putting a bound on how big such patterns can get. The
    /// limit is also checked while bounded repetitions are expanded, so
    /// that a pattern like `a{2000000000}` fails without first copying its
    /// atom two billion times.
    ///
    /// When this is exceeded, compilation fails with an error reporting the
    /// limit.
    ///
    /// This is disabled by default.
    pub fn nfa_size_limit(mut self, limit: Option<usize>) -> Config {
        self.nfa_size_limit = Some(limit);
        self
    }

    /// When enabled, the compiled NFA accepts any haystack that contains a
    /// match of the pattern somewhere, instead of only haystacks that match
    /// the pattern in their entirety.
    ///
    /// This is accomplished by surrounding the pattern with an implicit
    /// `(?s:.)*` on both sides. Anchors keep their meaning: `^` still only
    /// matches at the start of the haystack and `$` only at its end.
    ///
    /// This is disabled by default.
    pub fn unanchored(mut self, yes: bool) -> Config {
        self.unanchored = Some(yes);
        self
    }

    /// Returns the configured NFA size limit, if one exists.
    pub fn get_nfa_size_limit(&self) -> Option<usize> {
        self.nfa_size_limit.unwrap_or(None)
    }

    /// Returns whether the NFA is configured to match substrings.
    pub fn get_unanchored(&self) -> bool {
        self.unanchored.unwrap_or(false)
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    pub(crate) fn overwrite(&self, o: Config) -> Config {
        Config {
            nfa_size_limit: o.nfa_size_limit.or(self.nfa_size_limit),
            unanchored: o.unanchored.or(self.unanchored),
        }
    }
}

/// A builder of Thompson NFAs, from either a pattern string or its postfix
/// symbols.
///
/// Construction follows Thompson's algorithm: each postfix symbol produces a
/// fragment (an entry state plus a list of transitions that have yet to be
/// pointed anywhere) and each operator combines the fragments on top of a
/// stack. When all symbols are consumed, exactly one fragment must remain,
/// and its open transitions are pointed at a single match state.
///
/// # Example
///
/// ```
/// use regex_hybrid::nfa::thompson::{Compiler, Config};
///
/// let nfa = Compiler::new()
///     .configure(Config::new().nfa_size_limit(Some(3)))
///     .build("abc");
/// // Three states for the literals, plus one for the match state.
/// assert_eq!(Some(3), nfa.unwrap_err().state_limit());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    config: Config,
}

/// A partially built piece of an NFA.
#[derive(Debug)]
struct Fragment {
    start: StateID,
    holes: Vec<Hole>,
}

impl Fragment {
    fn single(start: StateID) -> Fragment {
        Fragment { start, holes: vec![Hole::out1(start)] }
    }
}

impl Compiler {
    /// Create a new NFA compiler with the default configuration.
    pub fn new() -> Compiler {
        Compiler::default()
    }

    /// Apply the given NFA configuration options to this compiler.
    pub fn configure(&mut self, config: Config) -> &mut Compiler {
        self.config = self.config.overwrite(config);
        self
    }

    /// Parse the given pattern and compile it into an NFA.
    pub fn build(&self, pattern: &str) -> Result<NFA, BuildError> {
        let tokens = syntax::tokenize(pattern).map_err(BuildError::syntax)?;
        let symbols = self.translate(&tokens)?;
        self.build_from_postfix(&symbols)
    }

    /// Convert the given tokens to postfix symbols, giving up as soon as
    /// expanding bounded quantifiers is certain to exceed the configured
    /// size limit.
    pub(crate) fn translate(
        &self,
        tokens: &[Token],
    ) -> Result<Vec<Symbol>, BuildError> {
        let limit = self.config.get_nfa_size_limit();
        syntax::translate_with_limit(tokens, limit).map_err(|err| {
            match (err.kind(), limit) {
                (syntax::ErrorKind::ExpansionTooLarge, Some(limit)) => {
                    BuildError::too_many_states(limit.saturating_add(1), limit)
                }
                _ => BuildError::syntax(err),
            }
        })
    }

    /// Compile the given postfix symbols into an NFA.
    ///
    /// Symbols produced by [`syntax::to_postfix`] always compile. Any other
    /// sequence that does not reduce to exactly one fragment results in an
    /// internal error.
    pub fn build_from_postfix(
        &self,
        symbols: &[Symbol],
    ) -> Result<NFA, BuildError> {
        let mut builder = Builder::new();
        builder.set_size_limit(self.config.get_nfa_size_limit());
        let mut stack: Vec<Fragment> = vec![];
        for sym in symbols {
            let frag = match *sym {
                Symbol::Literal(ch) => c_literal(&mut builder, ch)?,
                Symbol::Class(ref text) => {
                    let set = parse_class(text);
                    Fragment::single(builder.add_char_set(set)?)
                }
                Symbol::Wildcard => {
                    let mut set = CharacterSet::empty();
                    set.add(b'\n');
                    set.set_negated(true);
                    Fragment::single(builder.add_char_set(set)?)
                }
                Symbol::AnchorStart => {
                    Fragment::single(builder.add_anchor_start()?)
                }
                Symbol::AnchorEnd => {
                    Fragment::single(builder.add_anchor_end()?)
                }
                Symbol::Star => {
                    let frag = pop(&mut stack)?;
                    let split = builder.add_split(Some(frag.start))?;
                    patch_all(&mut builder, &frag.holes, split);
                    Fragment { start: split, holes: vec![Hole::out2(split)] }
                }
                Symbol::Plus => {
                    let frag = pop(&mut stack)?;
                    let split = builder.add_split(Some(frag.start))?;
                    patch_all(&mut builder, &frag.holes, split);
                    Fragment {
                        start: frag.start,
                        holes: vec![Hole::out2(split)],
                    }
                }
                Symbol::Question => {
                    let mut frag = pop(&mut stack)?;
                    let split = builder.add_split(Some(frag.start))?;
                    frag.holes.push(Hole::out2(split));
                    Fragment { start: split, holes: frag.holes }
                }
                Symbol::Concat => {
                    let right = pop(&mut stack)?;
                    let left = pop(&mut stack)?;
                    patch_all(&mut builder, &left.holes, right.start);
                    Fragment { start: left.start, holes: right.holes }
                }
                Symbol::Alternate => {
                    let right = pop(&mut stack)?;
                    let mut left = pop(&mut stack)?;
                    let split = builder.add_union(left.start, right.start)?;
                    left.holes.extend(right.holes);
                    Fragment { start: split, holes: left.holes }
                }
            };
            stack.push(frag);
        }
        if stack.len() != 1 {
            return Err(BuildError::malformed_postfix(stack.len()));
        }
        let mut body = pop(&mut stack)?;
        if self.config.get_unanchored() {
            body = c_unanchored(&mut builder, body)?;
        }
        let match_id = builder.add_match()?;
        patch_all(&mut builder, &body.holes, match_id);
        builder.build(body.start, match_id)
    }
}

/// Surround the given fragment with a loop over any byte on both sides.
fn c_unanchored(
    builder: &mut Builder,
    body: Fragment,
) -> Result<Fragment, BuildError> {
    let prefix_any = builder.add_char_set(CharacterSet::any())?;
    let prefix = builder.add_split(Some(prefix_any))?;
    builder.patch(Hole::out1(prefix_any), prefix);
    builder.patch(Hole::out2(prefix), body.start);

    let suffix_any = builder.add_char_set(CharacterSet::any())?;
    let suffix = builder.add_split(Some(suffix_any))?;
    builder.patch(Hole::out1(suffix_any), suffix);
    patch_all(builder, &body.holes, suffix);
    Ok(Fragment { start: prefix, holes: vec![Hole::out2(suffix)] })
}

/// Compile a literal character as a chain of states, one for each byte of
/// its UTF-8 encoding.
fn c_literal(
    builder: &mut Builder,
    ch: char,
) -> Result<Fragment, BuildError> {
    let mut buf = [0; 4];
    let mut ids = Vec::with_capacity(4);
    for byte in ch.encode_utf8(&mut buf).bytes() {
        ids.push(builder.add_char(byte)?);
    }
    for pair in ids.windows(2) {
        builder.patch(Hole::out1(pair[0]), pair[1]);
    }
    let last = ids[ids.len() - 1];
    Ok(Fragment { start: ids[0], holes: vec![Hole::out1(last)] })
}

fn pop(stack: &mut Vec<Fragment>) -> Result<Fragment, BuildError> {
    let len = stack.len();
    stack.pop().ok_or_else(|| BuildError::malformed_postfix(len))
}

fn patch_all(builder: &mut Builder, holes: &[Hole], to: StateID) {
    for &hole in holes {
        builder.patch(hole, to);
    }
}

/// Parse the text of a bracketed class, e.g., `[^a-z_]`, into a set.
///
/// A leading `^` negates the class. `x-y` adds the inclusive range from `x`
/// to `y` when `x < y`. Otherwise, each character is added on its own, which
/// includes a `-` that is not part of a valid range. Characters outside of
/// ASCII cannot be represented and are ignored.
fn parse_class(text: &str) -> CharacterSet {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);
    let mut set = CharacterSet::empty();
    let mut chars: Vec<char> = inner.chars().collect();
    if chars.first() == Some(&'^') {
        set.set_negated(true);
        chars.remove(0);
    }
    let mut i = 0;
    while i < chars.len() {
        let start = chars[i];
        if i + 2 < chars.len() && chars[i + 1] == '-' && start < chars[i + 2]
        {
            let end = chars[i + 2];
            if start.is_ascii() {
                let end = if end.is_ascii() { end as u8 } else { 0x7F };
                set.add_range(start as u8, end);
            }
            i += 3;
        } else {
            if start.is_ascii() {
                set.add(start as u8);
            }
            i += 1;
        }
    }
    set
}
