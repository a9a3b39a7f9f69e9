//! Evaluate tabletop dice expressions.
//!
//! ```rust
//! # use rpg_dice_expr::{evaluate_det_with, evaluate_int, evaluate_str_with, parse};
//! # use rand::rngs::StdRng;
//! # use rand::SeedableRng;
//! #
//! # fn main() -> Result<(), rpg_dice_expr::Error> {
//! // Roll with advantage and add a modifier.
//! let total = evaluate_int("adv(1d20)+3")?;
//! assert!((4..=23).contains(&total));
//!
//! // Use a custom Rng that implements the rand::Rng trait
//! let mut rng = StdRng::seed_from_u64(1);
//! assert_eq!(evaluate_str_with("Damage: 2d6+1d4 fire", &mut rng)?, "Damage: 13 fire");
//!
//! // Every roll and function application is kept in the trace
//! let mut rng = StdRng::seed_from_u64(1);
//! assert_eq!(
//!     evaluate_det_with("round(avg(4d8)/2)", &mut rng)?,
//!     "<span class=\"str\">round(avg(4d8 (<b>8</b>, 6, 4, 2)) / 2)</span> = <b>9</b>"
//! );
//!
//! // Parse without rolling
//! let notation = parse("2d6 + 3");
//! assert_eq!(notation.segments().len(), 1);
//! # Ok(())
//! # }
//! ```

mod error;
mod evaluate;
mod parse;
#[cfg(test)]
mod test_rng;

pub use error::Error;
pub use evaluate::{
    dice_roll::{DicePool, MAX_QUANTITY},
    roll::{RolledNotation, RolledSegment, Term},
};
pub use parse::{Dice, Expression, Function, Notation, Operator, Segment, MAX_NESTING};

/// Parses the notation without rolling the dice. This never fails, text that
/// isn't part of an expression is kept between the segments.
pub fn parse(notation: &str) -> Notation {
    parse::parse_notation(notation)
}

/// Rolls the notation and returns its value with the decimals truncated.
pub fn evaluate_int(notation: &str) -> Result<i64, Error> {
    evaluate_int_with(notation, &mut rand::thread_rng())
}

/// Same as `evaluate_int()` but allows you to choose the rng you prefer to use.
pub fn evaluate_int_with(notation: &str, rng: &mut impl rand::Rng) -> Result<i64, Error> {
    resolve(notation, rng)?.to_int()
}

/// Rolls the notation and returns its value.
pub fn evaluate_float(notation: &str) -> Result<f64, Error> {
    evaluate_float_with(notation, &mut rand::thread_rng())
}

/// Same as `evaluate_float()` but allows you to choose the rng you prefer to use.
pub fn evaluate_float_with(notation: &str, rng: &mut impl rand::Rng) -> Result<f64, Error> {
    resolve(notation, rng)?.to_float()
}

/// Rolls the notation and replaces every expression in it with its value.
pub fn evaluate_str(notation: &str) -> Result<String, Error> {
    evaluate_str_with(notation, &mut rand::thread_rng())
}

/// Same as `evaluate_str()` but allows you to choose the rng you prefer to use.
pub fn evaluate_str_with(notation: &str, rng: &mut impl rand::Rng) -> Result<String, Error> {
    Ok(resolve(notation, rng)?.to_string())
}

/// Rolls the notation and replaces every expression in it with an HTML
/// fragment showing the rolls and the value.
pub fn evaluate_det(notation: &str) -> Result<String, Error> {
    evaluate_det_with(notation, &mut rand::thread_rng())
}

/// Same as `evaluate_det()` but allows you to choose the rng you prefer to use.
pub fn evaluate_det_with(notation: &str, rng: &mut impl rand::Rng) -> Result<String, Error> {
    Ok(resolve(notation, rng)?.deterministic())
}

fn resolve(notation: &str, rng: &mut impl rand::Rng) -> Result<RolledNotation, Error> {
    let rolled = parse(notation).roll(rng)?;
    tracing::debug!(notation, ?rolled, "resolved dice notation");
    Ok(rolled)
}
