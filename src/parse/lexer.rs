use std::ops::Range;

use winnow::{
    ascii::{digit0, digit1, multispace1},
    combinator::{alt, dispatch, empty, fail, opt, preceded, terminated},
    stream::Located,
    token::{any, take_while},
    PResult, Parser,
};

use super::{Dice, Operator};

pub(crate) type Stream<'i> = Located<&'i str>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Dice(Dice),
    Number(f64),
    /// Function name together with its opening paren, the name is empty for plain parens.
    Open(String),
    Close,
    Operator(Operator),
    Whitespace,
    /// A single character that doesn't start any other token.
    Text,
}

/// Splits the input into tokens, every byte of the input ends up in exactly one token.
pub(crate) fn tokenize(input: &str) -> Vec<Token> {
    let mut stream = Located::new(input);
    let mut tokens = Vec::new();
    // Only stops at the end of the input since `any` accepts every character.
    // Anything after the last token is rendered from the source anyway.
    while let Ok(next) = token.parse_next(&mut stream) {
        tokens.push(next);
    }
    tokens
}

fn token(stream: &mut Stream<'_>) -> PResult<Token> {
    alt((
        dice.map(TokenKind::Dice),
        number.map(TokenKind::Number),
        open.map(TokenKind::Open),
        ')'.value(TokenKind::Close),
        operator.map(TokenKind::Operator),
        multispace1.value(TokenKind::Whitespace),
        any.value(TokenKind::Text),
    ))
    .with_span()
    .map(|(kind, span)| Token { kind, span })
    .parse_next(stream)
}

fn dice(stream: &mut Stream<'_>) -> PResult<Dice> {
    (digit0, 'd', digit1)
        .verify_map(|(quantity, _, sides): (&str, char, &str)| {
            // A missing or zero quantity still rolls one die
            let quantity: u32 = if quantity.is_empty() {
                1
            } else {
                quantity.parse().ok()?
            };
            let sides: u32 = sides.parse().ok()?;

            (sides > 0).then(|| Dice::new(quantity.max(1), sides))
        })
        .parse_next(stream)
}

fn number(stream: &mut Stream<'_>) -> PResult<f64> {
    (digit1, opt(preceded('.', digit1)))
        .try_map(|(int, frac): (&str, Option<&str>)| match frac {
            Some(frac) => format!("{int}.{frac}").parse::<f64>(),
            None => int.parse::<f64>(),
        })
        .parse_next(stream)
}

fn open(stream: &mut Stream<'_>) -> PResult<String> {
    terminated(take_while(0.., 'a'..='z'), '(')
        .map(|name: &str| name.to_string())
        .parse_next(stream)
}

fn operator(stream: &mut Stream<'_>) -> PResult<Operator> {
    dispatch!(any;
        '+' => empty.value(Operator::Add),
        '-' => empty.value(Operator::Sub),
        '*' => empty.value(Operator::Mul),
        '/' => empty.value(Operator::Div),
        '%' => empty.value(Operator::Rem),
        _ => fail
    )
    .parse_next(stream)
}
