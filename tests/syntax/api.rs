use regex_hybrid::syntax::{
    self, parse_bounds, ErrorKind, Symbol, Token, TokenKind,
};

use crate::Result;

#[test]
fn translate_expands_only_when_needed() -> Result<()> {
    let tokens = syntax::tokenize("(ab)*")?;
    assert_eq!(syntax::to_postfix(&tokens)?, syntax::translate(&tokens)?);

    let tokens = syntax::tokenize("a{2,2}")?;
    assert_eq!(
        ErrorKind::UnexpandedQuantifier,
        syntax::to_postfix(&tokens).unwrap_err().kind(),
    );
    assert_eq!(
        vec![Symbol::Literal('a'), Symbol::Literal('a'), Symbol::Concat],
        syntax::translate(&tokens)?,
    );
    Ok(())
}

#[test]
fn shorthand_classes() -> Result<()> {
    let tokens = syntax::tokenize(r"\d\W\s")?;
    let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
    assert_eq!(vec!["[0-9]", "[^A-Za-z0-9_]", "[ \t\r\n\x0C]", ""], texts);
    assert!(tokens[..3].iter().all(|t| t.kind() == TokenKind::CharClass));
    Ok(())
}

#[test]
fn escaped_metacharacters() -> Result<()> {
    let tokens = syntax::tokenize(r"\|\(\\")?;
    let literals: Vec<Option<char>> =
        tokens.iter().map(|t| t.as_literal()).collect();
    assert_eq!(vec![Some('|'), Some('('), Some('\\'), None], literals);
    // A literal '|' is an operand, never an alternation.
    assert_eq!(
        vec![
            Symbol::Literal('|'),
            Symbol::Literal('('),
            Symbol::Concat,
            Symbol::Literal('\\'),
            Symbol::Concat,
        ],
        syntax::translate(&tokens)?,
    );
    Ok(())
}

// Token sequences can be built by hand, and need not end with an end
// marker.
#[test]
fn hand_built_tokens() -> Result<()> {
    let tokens = vec![
        Token::simple(TokenKind::GroupOpen),
        Token::literal('x'),
        Token::simple(TokenKind::Alternation),
        Token::class("[yz]"),
        Token::simple(TokenKind::GroupClose),
        Token::quantifier("{1,}"),
    ];
    let symbols = syntax::translate(&tokens)?;
    let class = Symbol::Class("[yz]".into());
    assert_eq!(
        vec![
            Symbol::Literal('x'),
            class.clone(),
            Symbol::Alternate,
            Symbol::Literal('x'),
            class,
            Symbol::Alternate,
            Symbol::Star,
            Symbol::Concat,
        ],
        symbols,
    );
    Ok(())
}

// Hand-built tokens are checked the same way as tokenized ones, and are
// reported as errors rather than panics.
#[test]
fn hand_built_tokens_are_checked() -> Result<()> {
    let tokens = vec![Token::literal('a'), Token::quantifier("{x}")];
    assert_eq!(
        ErrorKind::MalformedQuantifier,
        syntax::translate(&tokens).unwrap_err().kind(),
    );

    let tokens = vec![Token::operator('+'), Token::literal('a')];
    assert_eq!(
        ErrorKind::DanglingOperator,
        syntax::translate(&tokens).unwrap_err().kind(),
    );

    // Without brackets, the class text is read as its contents.
    let tokens = vec![Token::class("ab"), Token::end()];
    assert_eq!(vec![Symbol::Class("ab".into())], syntax::translate(&tokens)?);
    Ok(())
}

#[test]
fn tokenizer_error_offsets() {
    let cases: &[(&str, ErrorKind, usize)] = &[
        ("ab\\", ErrorKind::TrailingEscape, 2),
        ("a[bc", ErrorKind::UnclosedClass, 1),
        ("xy{2", ErrorKind::MalformedQuantifier, 2),
        ("a{1;2}", ErrorKind::MalformedQuantifier, 3),
        ("☃{x}", ErrorKind::MalformedQuantifier, 4),
    ];
    for &(pattern, kind, offset) in cases {
        let err = syntax::tokenize(pattern).unwrap_err();
        assert_eq!(kind, err.kind(), "{:?}", pattern);
        assert_eq!(Some(offset), err.offset(), "{:?}", pattern);
        assert!(err.to_string().ends_with(&format!("offset {}", offset)));
    }
}

#[test]
fn structural_errors_have_no_offset() -> Result<()> {
    let tokens = syntax::tokenize("(a|)")?;
    let err = syntax::translate(&tokens).unwrap_err();
    assert_eq!(ErrorKind::EmptyAlternation, err.kind());
    assert_eq!(None, err.offset());
    assert_eq!("empty alternation branch", err.to_string());
    Ok(())
}

#[test]
fn bounds() -> Result<()> {
    assert_eq!((0, Some(0)), parse_bounds("{0,0}")?);
    // A bare count is a lower bound.
    assert_eq!((0, None), parse_bounds("{0}")?);
    assert_eq!((7, None), parse_bounds("{7}")?);
    assert_eq!((1, None), parse_bounds("{1,}")?);
    assert_eq!((10, Some(20)), parse_bounds("{10,20}")?);
    assert_eq!(
        ErrorKind::MalformedQuantifier,
        parse_bounds("2,3").unwrap_err().kind(),
    );
    Ok(())
}
