use std::sync::Arc;

use crate::syntax::{
    error::{Error, ErrorKind},
    token::{Token, TokenKind},
};

/// A single symbol of a pattern in postfix order.
///
/// Operands (literals, classes, the wildcard and anchors) appear before the
/// operators that apply to them. Concatenation, which is implicit in a
/// pattern, is made explicit.
///
/// Control symbols are separate variants, so a pattern that contains, say, a
/// literal `|` can never be confused with an alternation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Symbol {
    /// Match a single character.
    Literal(char),
    /// Match a single byte from a class. The text is the bracketed class as
    /// written in the pattern, e.g., `[^a-z]`.
    Class(Arc<str>),
    /// Match any byte except `\n`.
    Wildcard,
    /// Match the empty string at the start of the haystack.
    AnchorStart,
    /// Match the empty string at the end of the haystack.
    AnchorEnd,
    /// Zero or more of the preceding operand.
    Star,
    /// One or more of the preceding operand.
    Plus,
    /// Zero or one of the preceding operand.
    Question,
    /// Concatenation of the two preceding operands.
    Concat,
    /// Alternation between the two preceding operands.
    Alternate,
}

/// Convert an infix sequence of tokens into postfix symbols.
///
/// The given tokens must not contain any bounded quantifiers. Use
/// [`expand`](crate::syntax::expand) to rewrite them first.
///
/// This is a counter based variant of the shunting yard algorithm. For each
/// level of parenthesization, it tracks the number of operands that have yet
/// to be joined by a concatenation (`natom`) and the number of alternations
/// seen so far (`nalt`). Opening a group saves both counters on a stack and
/// closing it restores them, with the group itself counting as one more
/// operand.
///
/// Conversion stops at the first [`TokenKind::End`] token. A sequence without
/// one is treated as if it ended with one.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Symbol>, Error> {
    let mut out = Vec::with_capacity(2 * tokens.len());
    let mut natom = 0usize;
    let mut nalt = 0usize;
    let mut groups: Vec<(usize, usize)> = vec![];
    for token in tokens {
        match token.kind() {
            TokenKind::Literal
            | TokenKind::CharClass
            | TokenKind::Wildcard
            | TokenKind::AnchorStart
            | TokenKind::AnchorEnd => {
                if natom > 1 {
                    natom -= 1;
                    out.push(Symbol::Concat);
                }
                out.push(operand(token));
                natom += 1;
            }
            TokenKind::Operator => {
                if natom == 0 {
                    return Err(Error::new(ErrorKind::DanglingOperator));
                }
                out.push(match token.text() {
                    "*" => Symbol::Star,
                    "+" => Symbol::Plus,
                    "?" => Symbol::Question,
                    op => unreachable!("unknown repetition operator {:?}", op),
                });
            }
            TokenKind::Quantifier => {
                if natom == 0 {
                    return Err(Error::new(ErrorKind::DanglingOperator));
                }
                return Err(Error::new(ErrorKind::UnexpandedQuantifier));
            }
            TokenKind::GroupOpen => {
                if natom > 1 {
                    natom -= 1;
                    out.push(Symbol::Concat);
                }
                groups.push((nalt, natom));
                nalt = 0;
                natom = 0;
            }
            TokenKind::GroupClose => {
                let (saved_nalt, saved_natom) = match groups.pop() {
                    None => {
                        return Err(Error::new(ErrorKind::UnbalancedGroup))
                    }
                    Some(saved) => saved,
                };
                if natom == 0 {
                    return Err(Error::new(if nalt > 0 {
                        ErrorKind::EmptyAlternation
                    } else {
                        ErrorKind::EmptyGroup
                    }));
                }
                flush(&mut out, natom, nalt);
                nalt = saved_nalt;
                natom = saved_natom + 1;
            }
            TokenKind::Alternation => {
                if natom == 0 {
                    return Err(Error::new(ErrorKind::EmptyAlternation));
                }
                flush(&mut out, natom, 0);
                nalt += 1;
                natom = 0;
            }
            TokenKind::End => break,
        }
    }
    if !groups.is_empty() {
        return Err(Error::new(ErrorKind::UnbalancedGroup));
    }
    if natom == 0 {
        return Err(Error::new(if nalt > 0 {
            ErrorKind::EmptyAlternation
        } else {
            ErrorKind::EmptyPattern
        }));
    }
    flush(&mut out, natom, nalt);
    Ok(out)
}

/// Join `natom` pending operands with concatenations, and then the result
/// with the `nalt` operands before it with alternations.
fn flush(out: &mut Vec<Symbol>, natom: usize, nalt: usize) {
    for _ in 1..natom {
        out.push(Symbol::Concat);
    }
    for _ in 0..nalt {
        out.push(Symbol::Alternate);
    }
}

fn operand(token: &Token) -> Symbol {
    match token.kind() {
        TokenKind::Literal => match token.as_literal() {
            Some(ch) => Symbol::Literal(ch),
            None => unreachable!("literal token without a character"),
        },
        TokenKind::CharClass => Symbol::Class(token.shared_text().clone()),
        TokenKind::Wildcard => Symbol::Wildcard,
        TokenKind::AnchorStart => Symbol::AnchorStart,
        TokenKind::AnchorEnd => Symbol::AnchorEnd,
        kind => unreachable!("{:?} is not an operand", kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{expand::expand, tokenizer::tokenize};

    // Renders postfix symbols compactly. Concatenation is rendered as '&'
    // since '.' is taken by the wildcard.
    fn render(symbols: &[Symbol]) -> String {
        let mut s = String::new();
        for sym in symbols {
            match *sym {
                Symbol::Literal(ch) => s.push(ch),
                Symbol::Class(ref text) => s.push_str(text),
                Symbol::Wildcard => s.push('.'),
                Symbol::AnchorStart => s.push('^'),
                Symbol::AnchorEnd => s.push('$'),
                Symbol::Star => s.push('*'),
                Symbol::Plus => s.push('+'),
                Symbol::Question => s.push('?'),
                Symbol::Concat => s.push('&'),
                Symbol::Alternate => s.push('|'),
            }
        }
        s
    }

    fn postfix(pattern: &str) -> String {
        let tokens = expand(&tokenize(pattern).unwrap()).unwrap();
        render(&to_postfix(&tokens).unwrap())
    }

    fn postfix_err(pattern: &str) -> ErrorKind {
        let tokens = expand(&tokenize(pattern).unwrap()).unwrap();
        to_postfix(&tokens).unwrap_err().kind()
    }

    #[test]
    fn concatenation() {
        assert_eq!("a", postfix("a"));
        assert_eq!("ab&", postfix("ab"));
        assert_eq!("ab&c&", postfix("abc"));
        assert_eq!("a.&b&", postfix("a.b"));
        assert_eq!("^a&$&", postfix("^a$"));
    }

    #[test]
    fn operators() {
        assert_eq!("a*b&", postfix("a*b"));
        assert_eq!("ab+&c?&", postfix("ab+c?"));
        assert_eq!("ab&*", postfix("(ab)*"));
        assert_eq!("aa&a?&", postfix("a{2,3}"));
    }

    #[test]
    fn alternation() {
        assert_eq!("ab|", postfix("a|b"));
        assert_eq!("ab&cd&|", postfix("ab|cd"));
        assert_eq!("abc||", postfix("a|b|c"));
        assert_eq!("ca&t&do&g&|s&", postfix("(cat|dog)s"));
        assert_eq!("xab|&y&", postfix("x(a|b)y"));
    }

    #[test]
    fn literal_metacharacters_are_literals() {
        let tokens = tokenize(r"a\|\*").unwrap();
        let symbols = to_postfix(&tokens).unwrap();
        assert_eq!(
            vec![
                Symbol::Literal('a'),
                Symbol::Literal('|'),
                Symbol::Concat,
                Symbol::Literal('*'),
                Symbol::Concat,
            ],
            symbols,
        );
    }

    #[test]
    fn errors() {
        assert_eq!(ErrorKind::EmptyPattern, postfix_err(""));
        assert_eq!(ErrorKind::DanglingOperator, postfix_err("*a"));
        assert_eq!(ErrorKind::DanglingOperator, postfix_err("a|+"));
        assert_eq!(ErrorKind::DanglingOperator, postfix_err("(*)"));
        assert_eq!(ErrorKind::EmptyGroup, postfix_err("a()"));
        assert_eq!(ErrorKind::EmptyAlternation, postfix_err("|a"));
        assert_eq!(ErrorKind::EmptyAlternation, postfix_err("a|"));
        assert_eq!(ErrorKind::EmptyAlternation, postfix_err("(a|)"));
        assert_eq!(ErrorKind::EmptyAlternation, postfix_err("a||b"));
        assert_eq!(ErrorKind::UnbalancedGroup, postfix_err("a)"));
        assert_eq!(ErrorKind::UnbalancedGroup, postfix_err("(a"));
        assert_eq!(ErrorKind::EmptyGroup, postfix_err("(a{0,0})"));
    }

    #[test]
    fn unexpanded_quantifier() {
        let tokens = tokenize("a{2}").unwrap();
        let err = to_postfix(&tokens).unwrap_err();
        assert_eq!(ErrorKind::UnexpandedQuantifier, err.kind());
    }
}
