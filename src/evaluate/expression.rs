use rand::Rng;

use super::{
    dice_roll::DicePool,
    roll::{format_number, Term},
};
use crate::{
    parse::{Expression, Function, Operator},
    Error,
};

impl Expression {
    /// Rolls every dice in the expression, left to right, and reduces it to a single [Term].
    pub fn roll(&self, rng: &mut impl Rng) -> Result<Term, Error> {
        let term = match self {
            Expression::Value(value) => Term::scalar(*value, format_number(*value)),
            Expression::Dice(dice) => Term::Dice(dice.roll_all(rng)?),
            Expression::Infix(first, rest) => return roll_chain(first, rest, rng),
            Expression::Call(func, arg) => func.apply(arg.roll(rng)?, rng),
        };
        finite(term)
    }
}

/// Folds a chain of operators left to right. Every partial result has to be a
/// valid number, so `1 / 0 + 2` fails on `1 / 0`.
fn roll_chain(
    first: &Expression,
    rest: &[(Operator, Expression)],
    rng: &mut impl Rng,
) -> Result<Term, Error> {
    let first = first.roll(rng)?;
    if rest.is_empty() {
        return Ok(first);
    }

    let mut value = first.value();
    let mut trace = first.trace();
    for (op, operand) in rest {
        let rhs = operand.roll(rng)?;
        value = op.evaluate(value, rhs.value());
        trace.push_str(&format!(" {op} {}", rhs.trace()));

        if !value.is_finite() {
            return Err(Error::InvalidNumber { expression: trace });
        }
    }
    Ok(Term::scalar(value, trace))
}

fn finite(term: Term) -> Result<Term, Error> {
    if !term.value().is_finite() {
        return Err(Error::InvalidNumber {
            expression: term.trace(),
        });
    }
    Ok(term)
}

impl Operator {
    pub fn evaluate(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
            // Keeps the sign of the dividend
            Operator::Rem => lhs % rhs,
        }
    }
}

impl Function {
    fn apply(&self, arg: Term, rng: &mut impl Rng) -> Term {
        let value = match (self, &arg) {
            (Function::Avg, Term::Dice(pool)) => pool.dice.average(),
            (Function::Int, _) => arg.value().floor(),
            (Function::Round, _) => (arg.value() + 0.5).floor(),
            (Function::Sqrt, _) => arg.value().sqrt(),
            (Function::Advantage | Function::Disadvantage, Term::Dice(pool))
                if pool.dice.is_d20() =>
            {
                return self.reroll_d20(pool, rng);
            }
            _ => arg.value(),
        };

        Term::scalar(value, format!("{self}({})", arg.trace()))
    }

    /// Rolls a second d20, keeping the highest for advantage and the lowest
    /// for disadvantage. The discarded roll is struck through.
    fn reroll_d20(&self, pool: &DicePool, rng: &mut impl Rng) -> Term {
        let dice = pool.dice;
        // A d20 pool always holds exactly one roll
        let (first, first_face) = (pool.rolls[0], &pool.faces[0]);

        let second = dice.roll_die(rng);
        let second_face = dice.format_face(second);

        let keep_second = match self {
            Function::Advantage => second > first,
            _ => second < first,
        };

        let (value, faces) = if keep_second {
            (second, [format!("<s>{first_face}</s>"), second_face])
        } else {
            (first, [first_face.clone(), format!("<s>{second_face}</s>")])
        };

        Term::scalar(value as f64, format!("{self}({})", dice.format_pool(&faces)))
    }
}
