/*!
Turns pattern strings into postfix symbols ready for Thompson construction.

Compilation of a pattern starts here and proceeds in three steps:

1. [`tokenize`] splits a pattern into [`Token`]s, rewriting shorthand classes
such as `\d` into their bracketed spelling.
2. [`expand`] rewrites bounded quantifiers such as `{2,4}` into plain
concatenations of optional and starred copies of the atom they apply to.
3. [`to_postfix`] linearizes the tokens into postfix order with explicit
concatenation and alternation [`Symbol`]s.

The supported syntax is small: literals, `.`, `^`, `$`, `*`, `+`, `?`,
`{n,m}`, `{n,}`, `|`, grouping with `()`, bracketed ASCII classes with ranges
and negation, and the shorthand classes `\d`, `\w`, `\s` and their
negations. Any other escaped character is a literal. A bare `{n}` means at
least `n` repetitions, like `{n,}`.

# Example

```
use regex_hybrid::syntax::{self, Symbol};

let tokens = syntax::tokenize("ab?")?;
let symbols = syntax::to_postfix(&syntax::expand(&tokens)?)?;
assert_eq!(symbols, vec![
    Symbol::Literal('a'),
    Symbol::Literal('b'),
    Symbol::Question,
    Symbol::Concat,
]);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    error::{Error, ErrorKind},
    expand::{expand, expand_with_limit, parse_bounds},
    postfix::{to_postfix, Symbol},
    token::{Token, TokenKind},
    tokenizer::tokenize,
};

/// Rewrite a token sequence to postfix symbols, expanding bounded
/// quantifiers first if there are any.
pub fn translate(tokens: &[Token]) -> Result<Vec<Symbol>, Error> {
    translate_with_limit(tokens, None)
}

/// Like [`translate`], but expands bounded quantifiers with
/// [`expand_with_limit`].
pub fn translate_with_limit(
    tokens: &[Token],
    limit: Option<usize>,
) -> Result<Vec<Symbol>, Error> {
    if !tokens.iter().any(|t| t.kind() == TokenKind::Quantifier) {
        return to_postfix(tokens);
    }
    let expanded = expand_with_limit(tokens, limit)?;
    debug!(
        "expanded bounded quantifiers from {} to {} tokens",
        tokens.len(),
        expanded.len(),
    );
    to_postfix(&expanded)
}

mod error;
mod expand;
mod postfix;
mod token;
mod tokenizer;
