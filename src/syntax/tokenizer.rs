use crate::syntax::{
    error::{Error, ErrorKind},
    token::{Token, TokenKind},
};

/// Split the given pattern into a sequence of tokens.
///
/// The sequence returned always ends with a single [`TokenKind::End`]
/// token. Character classes and bounded quantifiers are captured as opaque
/// spans that run up to the first closing `]` or `}` respectively. There is
/// no support for nesting either one.
///
/// The shorthand escapes `\d`, `\D`, `\w`, `\W`, `\s` and `\S` are rewritten
/// to the bracketed class they stand for. Any other escaped character is a
/// literal.
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::with_capacity(pattern.len() + 1);
    let mut at = 0;
    while let Some(ch) = pattern[at..].chars().next() {
        let start = at;
        at += ch.len_utf8();
        let token = match ch {
            '\\' => {
                let escaped = match pattern[at..].chars().next() {
                    None => {
                        return Err(Error::at(ErrorKind::TrailingEscape, start))
                    }
                    Some(escaped) => escaped,
                };
                at += escaped.len_utf8();
                match shorthand_class(escaped) {
                    Some(class) => Token::new(TokenKind::CharClass, class),
                    None => Token::literal(escaped),
                }
            }
            '[' => {
                let end = match pattern[at..].find(']') {
                    None => {
                        return Err(Error::at(ErrorKind::UnclosedClass, start))
                    }
                    Some(i) => at + i,
                };
                at = end + 1;
                Token::new(TokenKind::CharClass, &pattern[start..at])
            }
            '{' => {
                let end = match pattern[at..].find('}') {
                    None => {
                        return Err(Error::at(
                            ErrorKind::MalformedQuantifier,
                            start,
                        ))
                    }
                    Some(i) => at + i,
                };
                let bounds = &pattern[at..end];
                if let Some(i) =
                    bounds.find(|c: char| !c.is_ascii_digit() && c != ',')
                {
                    return Err(Error::at(
                        ErrorKind::MalformedQuantifier,
                        at + i,
                    ));
                }
                at = end + 1;
                Token::new(TokenKind::Quantifier, &pattern[start..at])
            }
            '*' | '+' | '?' => Token::operator(ch),
            '(' => Token::simple(TokenKind::GroupOpen),
            ')' => Token::simple(TokenKind::GroupClose),
            '|' => Token::simple(TokenKind::Alternation),
            '^' => Token::simple(TokenKind::AnchorStart),
            '$' => Token::simple(TokenKind::AnchorEnd),
            '.' => Token::simple(TokenKind::Wildcard),
            _ => Token::literal(ch),
        };
        tokens.push(token);
    }
    tokens.push(Token::end());
    trace!("tokenized {:?} into {} tokens", pattern, tokens.len());
    Ok(tokens)
}

/// Returns the bracketed class text for a shorthand escape, if `ch` names
/// one.
fn shorthand_class(ch: char) -> Option<&'static str> {
    let class = match ch {
        'd' => "[0-9]",
        'D' => "[^0-9]",
        'w' => "[A-Za-z0-9_]",
        'W' => "[^A-Za-z0-9_]",
        's' => "[ \t\r\n\x0C]",
        'S' => "[^ \t\r\n\x0C]",
        _ => return None,
    };
    Some(class)
}
