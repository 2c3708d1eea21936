use crate::syntax::{
    error::{Error, ErrorKind},
    token::{Token, TokenKind},
};

/// Rewrite every bounded quantifier in the given tokens into an equivalent
/// sequence of plain tokens.
///
/// For a quantifier with bounds `(min, max)` applied to an atom `x` (either a
/// single token or an entire parenthesized group), `x` is repeated `min`
/// times. If there is no maximum, one more `x` followed by `*` is appended.
/// Otherwise, `max - min` further copies of `x` are appended, each followed
/// by `?`. For example, `a{2,4}` becomes `aaa?a?` and `(ab){1,}` becomes
/// `(ab)(ab)*`.
///
/// Since this is a purely textual rewrite, large bounds produce a
/// proportionally large token sequence. Use [`expand_with_limit`] to stop
/// early when the result is bound to exceed an NFA size limit.
///
/// # Errors
///
/// This returns an error when a quantifier has no atom preceding it, or when
/// its bounds cannot be parsed. See [`parse_bounds`] for the latter.
pub fn expand(tokens: &[Token]) -> Result<Vec<Token>, Error> {
    expand_with_limit(tokens, None)
}

/// Like [`expand`], but fails with [`ErrorKind::ExpansionTooLarge`] before
/// any copying once the expanded tokens are certain to compile into more
/// than `limit` NFA states.
///
/// The check uses a lower bound on the number of states: one per byte of a
/// literal, one per class, wildcard, anchor, repetition operator and
/// alternation, plus the match state. A pattern that passes this check may
/// still exceed the limit once compiled. The bound is checked after every
/// quantifier, so an inner repetition that exceeds the limit fails even if
/// an enclosing `{0,0}` would later remove it.
pub fn expand_with_limit(
    tokens: &[Token],
    limit: Option<usize>,
) -> Result<Vec<Token>, Error> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    // The minimum number of NFA states needed for the tokens in `out`.
    let mut states = 0usize;
    // Whether the most recently handled token was a repetition of some kind.
    // A quantifier immediately after a repetition has nothing well defined to
    // apply to.
    let mut after_repetition = false;
    for token in tokens {
        if token.kind() != TokenKind::Quantifier {
            after_repetition = token.kind() == TokenKind::Operator;
            states = states.saturating_add(min_states(token));
            out.push(token.clone());
            continue;
        }
        if after_repetition {
            return Err(Error::new(ErrorKind::DanglingOperator));
        }
        let (min, max) = parse_bounds(token.text())?;
        let start = atom_start(&out)?;
        let atom = out.split_off(start);
        let atom_states = atom.iter().map(min_states).sum::<usize>();
        states -= atom_states;
        // Each optional or starred copy also needs a split state.
        let extra = max.map_or(1, |max| max - min);
        let added = atom_states
            .saturating_mul(min.saturating_add(extra))
            .saturating_add(extra);
        states = states.saturating_add(added);
        if let Some(limit) = limit {
            // One more for the match state.
            if states.saturating_add(1) > limit {
                return Err(Error::new(ErrorKind::ExpansionTooLarge));
            }
        }
        trace!(
            "expanding {:?} applied to {} token(s)",
            token.text(),
            atom.len(),
        );
        for _ in 0..min {
            out.extend(atom.iter().cloned());
        }
        match max {
            None => {
                out.extend(atom.iter().cloned());
                out.push(Token::operator('*'));
            }
            Some(max) => {
                for _ in min..max {
                    out.extend(atom.iter().cloned());
                    out.push(Token::operator('?'));
                }
            }
        }
        after_repetition = true;
    }
    Ok(out)
}

/// Parse the bounds of a quantifier token, e.g., `{2,4}`.
///
/// The maximum is `None` when the quantifier has no upper bound. The
/// following forms are accepted:
///
/// * `{n}` matches at least `n` times, the same as `{n,}`.
/// * `{n,}` matches at least `n` times.
/// * `{n,m}` matches at least `n` and at most `m` times.
///
/// Anything else, including a minimum that exceeds the maximum or a number
/// that overflows, results in a `MalformedQuantifier` error.
pub fn parse_bounds(text: &str) -> Result<(usize, Option<usize>), Error> {
    let malformed = || Error::new(ErrorKind::MalformedQuantifier);
    let inner = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(malformed)?;
    let parse = |s: &str| s.parse::<usize>().map_err(|_| malformed());
    let (min, max) = match inner.find(',') {
        None => (parse(inner)?, None),
        Some(i) => {
            let min = parse(&inner[..i])?;
            let rest = &inner[i + 1..];
            if rest.is_empty() {
                (min, None)
            } else {
                (min, Some(parse(rest)?))
            }
        }
    };
    if let Some(max) = max {
        if min > max {
            return Err(malformed());
        }
    }
    Ok((min, max))
}

/// Returns the fewest NFA states that compiling the given token can add.
fn min_states(token: &Token) -> usize {
    match token.kind() {
        TokenKind::Literal => token.text().len(),
        TokenKind::CharClass
        | TokenKind::Wildcard
        | TokenKind::AnchorStart
        | TokenKind::AnchorEnd
        | TokenKind::Operator
        | TokenKind::Alternation => 1,
        TokenKind::GroupOpen
        | TokenKind::GroupClose
        | TokenKind::Quantifier
        | TokenKind::End => 0,
    }
}

/// Returns the index of the first token of the atom that ends `tokens`.
///
/// The atom is either the last token on its own, or, when the last token is
/// a `)`, everything from its matching `(` onwards.
fn atom_start(tokens: &[Token]) -> Result<usize, Error> {
    let last = match tokens.last() {
        None => return Err(Error::new(ErrorKind::DanglingOperator)),
        Some(last) => last,
    };
    if last.is_atom() {
        return Ok(tokens.len() - 1);
    }
    if last.kind() != TokenKind::GroupClose {
        return Err(Error::new(ErrorKind::DanglingOperator));
    }
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().rev() {
        match token.kind() {
            TokenKind::GroupClose => depth += 1,
            TokenKind::GroupOpen => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(Error::new(ErrorKind::UnbalancedGroup))
}
