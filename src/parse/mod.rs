mod expression;
mod lexer;

use std::ops::Range;

pub use expression::{parse_notation, MAX_NESTING};
pub(crate) use lexer::{tokenize, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dice {
    pub(crate) quantity: u32,
    pub(crate) sides: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer or decimal literal.
    Value(f64),
    /// `{quantity}d{sides}` or `d{sides}`
    Dice(Dice),
    /// `{first} {op} {operand} {op} {operand}...`\
    /// Operators of the same precedence, applied left to right.
    Infix(Box<Expression>, Vec<(Operator, Expression)>),
    /// `{name}({expression})`, grouping parens are a call with no name.
    Call(Function, Box<Expression>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Function {
    /// `avg(NdM)`\
    /// Replaces the dice result with its expected value.
    Avg,
    /// `int(x)`\
    /// Rounds towards negative infinity.
    Int,
    /// `round(x)`\
    /// Rounds half up.
    Round,
    /// `sqrt(x)`
    Sqrt,
    /// `adv(1d20)`\
    /// Rolls a second d20 and keeps the highest.
    Advantage,
    /// `dis(1d20)`\
    /// Rolls a second d20 and keeps the lowest.
    Disadvantage,
    /// `(x)`
    Group,
    /// Any other name, shown in the trace but doesn't change the value.
    Other(String),
}

/// A parsed notation.
///
/// Every piece of the input that could be read as an expression becomes a
/// [Segment], everything in between is kept as it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Notation {
    pub(crate) source: String,
    pub(crate) segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub(crate) span: Range<usize>,
    pub(crate) expression: Expression,
}

impl Dice {
    pub fn new(quantity: u32, sides: u32) -> Self {
        Self { quantity, sides }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
    pub fn sides(&self) -> u32 {
        self.sides
    }
    /// Only a single d20 gets critical styling and can be rolled with advantage.
    pub fn is_d20(&self) -> bool {
        self.quantity == 1 && self.sides == 20
    }
}

impl Function {
    pub fn from_name(name: &str) -> Self {
        match name {
            "avg" => Function::Avg,
            "int" => Function::Int,
            "round" => Function::Round,
            "sqrt" => Function::Sqrt,
            "adv" => Function::Advantage,
            "dis" => Function::Disadvantage,
            "" => Function::Group,
            other => Function::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Function::Avg => "avg",
            Function::Int => "int",
            Function::Round => "round",
            Function::Sqrt => "sqrt",
            Function::Advantage => "adv",
            Function::Disadvantage => "dis",
            Function::Group => "",
            Function::Other(name) => name,
        }
    }
}

impl Notation {
    pub fn source(&self) -> &str {
        &self.source
    }
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl Segment {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Value(val) => write!(f, "{val}"),
            Expression::Dice(dice) => write!(f, "{dice}"),
            Expression::Infix(first, rest) => {
                write!(f, "{first}")?;
                for (op, operand) in rest {
                    write!(f, " {op} {operand}")?;
                }
                Ok(())
            }
            Expression::Call(func, arg) => write!(f, "{}({arg})", func.name()),
        }
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.quantity, self.sides)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
        };
        write!(f, "{str}")
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Writes the notation back with every expression normalised and the text
/// around them untouched.
impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut last = 0;
        for segment in &self.segments {
            write!(f, "{}{}", &self.source[last..segment.span.start], segment.expression)?;
            last = segment.span.end;
        }
        write!(f, "{}", &self.source[last..])
    }
}
