use super::{tokenize, Expression, Function, Notation, Operator, Segment, Token, TokenKind};

/// How many calls or parens can be nested inside each other. Deeper calls are
/// left as plain text.
pub const MAX_NESTING: usize = 64;

struct TokenStream<'t> {
    tokens: &'t [Token],
    position: usize,
    depth: usize,
}

impl<'t> TokenStream<'t> {
    fn peek(&self) -> Option<&'t TokenKind> {
        self.tokens.get(self.position).map(|token| &token.kind)
    }

    fn advance(&mut self) -> Option<&'t TokenKind> {
        let kind = self.peek()?;
        self.position += 1;
        Some(kind)
    }

    fn skip_whitespace(&mut self) {
        while let Some(TokenKind::Whitespace) = self.peek() {
            self.position += 1;
        }
    }

    /// End of the last consumed token in the input.
    fn offset(&self) -> usize {
        self.position
            .checked_sub(1)
            .map(|last| self.tokens[last].span.end)
            .unwrap_or(0)
    }
}

/// Reads every expression it can find in the notation, whatever can't be
/// parsed is left as plain text between the segments.
pub fn parse_notation(notation: &str) -> Notation {
    let tokens = tokenize(notation);
    let mut stream = TokenStream {
        tokens: &tokens,
        position: 0,
        depth: 0,
    };
    let mut segments = Vec::new();

    while stream.position < tokens.len() {
        let start = stream.position;

        match parse_expr(&mut stream) {
            Some(expression) => segments.push(Segment {
                span: tokens[start].span.start..stream.offset(),
                expression,
            }),
            None => stream.position = start + 1,
        }
    }

    Notation {
        source: notation.to_string(),
        segments,
    }
}

fn parse_expr(stream: &mut TokenStream<'_>) -> Option<Expression> {
    parse_chain(stream, parse_term, low_precedence_operator)
}

fn parse_term(stream: &mut TokenStream<'_>) -> Option<Expression> {
    parse_chain(stream, parse_factor, high_precedence_operator)
}

/// Collects `operand (operator operand)*` into a single flat [Expression::Infix].
fn parse_chain(
    stream: &mut TokenStream<'_>,
    operand: fn(&mut TokenStream<'_>) -> Option<Expression>,
    operator: fn(&mut TokenStream<'_>) -> Option<Operator>,
) -> Option<Expression> {
    let first = operand(stream)?;
    let mut rest = Vec::new();

    loop {
        let checkpoint = stream.position;
        stream.skip_whitespace();

        let next = operator(stream).and_then(|op| {
            stream.skip_whitespace();
            operand(stream).map(|rhs| (op, rhs))
        });

        match next {
            Some(next) => rest.push(next),
            None => {
                stream.position = checkpoint;
                break;
            }
        }
    }

    if rest.is_empty() {
        Some(first)
    } else {
        Some(Expression::Infix(Box::new(first), rest))
    }
}

fn parse_factor(stream: &mut TokenStream<'_>) -> Option<Expression> {
    let checkpoint = stream.position;

    let factor = match stream.advance()? {
        TokenKind::Dice(dice) => Some(Expression::Dice(*dice)),
        TokenKind::Number(value) => Some(Expression::Value(*value)),
        TokenKind::Open(name) => parse_call(stream, name),
        _ => None,
    };

    if factor.is_none() {
        stream.position = checkpoint;
    }
    factor
}

fn parse_call(stream: &mut TokenStream<'_>, name: &str) -> Option<Expression> {
    if stream.depth >= MAX_NESTING {
        return None;
    }

    stream.depth += 1;
    let arg = parse_call_argument(stream);
    stream.depth -= 1;

    Some(Expression::Call(Function::from_name(name), Box::new(arg?)))
}

fn parse_call_argument(stream: &mut TokenStream<'_>) -> Option<Expression> {
    stream.skip_whitespace();
    let arg = parse_expr(stream)?;
    stream.skip_whitespace();

    match stream.advance()? {
        TokenKind::Close => Some(arg),
        _ => None,
    }
}

fn low_precedence_operator(stream: &mut TokenStream<'_>) -> Option<Operator> {
    match stream.peek()? {
        TokenKind::Operator(op @ (Operator::Add | Operator::Sub)) => {
            stream.position += 1;
            Some(*op)
        }
        _ => None,
    }
}

fn high_precedence_operator(stream: &mut TokenStream<'_>) -> Option<Operator> {
    match stream.peek()? {
        TokenKind::Operator(op @ (Operator::Mul | Operator::Div | Operator::Rem)) => {
            stream.position += 1;
            Some(*op)
        }
        _ => None,
    }
}
