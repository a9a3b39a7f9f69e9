#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The notation did not reduce to a single expression, the text is what was left.
    #[error("Notation could not be resolved to a single value: {notation:?}")]
    Unresolved { notation: String },

    /// Division or remainder by zero, square root of a negative number, an
    /// integer that doesn't fit in an `i64`...
    #[error("Expression `{expression}` does not produce a valid number")]
    InvalidNumber { expression: String },

    #[error("Cannot roll {quantity} dice at once, the maximum is {max}")]
    TooManyDice { quantity: u32, max: u32 },
}
