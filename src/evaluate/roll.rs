use std::ops::Range;

use rand::Rng;

use super::dice_roll::DicePool;
use crate::{parse::Notation, Error};

/// The value of an evaluated expression together with the trace of how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A dice term that hasn't been combined with anything yet.
    Dice(DicePool),
    Scalar { value: f64, trace: String },
}

impl Term {
    pub fn scalar(value: f64, trace: impl Into<String>) -> Self {
        Term::Scalar {
            value,
            trace: trace.into(),
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Term::Dice(pool) => pool.value(),
            Term::Scalar { value, .. } => *value,
        }
    }

    pub fn trace(&self) -> String {
        match self {
            Term::Dice(pool) => pool.trace(),
            Term::Scalar { trace, .. } => trace.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RolledSegment {
    pub(crate) span: Range<usize>,
    pub(crate) term: Term,
}

/// A notation with every expression rolled and evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct RolledNotation {
    pub(crate) source: String,
    pub(crate) segments: Vec<RolledSegment>,
}

impl Notation {
    /// Rolls and evaluates every expression of the notation with the rng specified.
    pub fn roll(&self, rng: &mut impl Rng) -> Result<RolledNotation, Error> {
        let segments = self
            .segments
            .iter()
            .map(|segment| {
                Ok(RolledSegment {
                    span: segment.span.clone(),
                    term: segment.expression.roll(rng)?,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(RolledNotation {
            source: self.source.clone(),
            segments,
        })
    }
}

impl RolledSegment {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
    pub fn term(&self) -> &Term {
        &self.term
    }
}

impl RolledNotation {
    pub fn segments(&self) -> &[RolledSegment] {
        &self.segments
    }

    /// The value of the notation, only available when the whole input was a
    /// single expression.
    pub fn value(&self) -> Result<f64, Error> {
        self.single_term().map(Term::value)
    }

    /// Same as `value()` with the decimals truncated. Values that don't fit
    /// in an `i64` are invalid.
    pub fn to_int(&self) -> Result<i64, Error> {
        let term = self.single_term()?;
        let value = term.value().trunc();

        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if !(i64::MIN as f64..i64::MAX as f64).contains(&value) {
            return Err(Error::InvalidNumber {
                expression: term.trace(),
            });
        }
        Ok(value as i64)
    }

    pub fn to_float(&self) -> Result<f64, Error> {
        self.value()
    }

    /// Replaces every expression with an HTML fragment showing its rolls and
    /// its value rounded to 2 decimals.
    pub fn deterministic(&self) -> String {
        self.render(|term| {
            let value = term.value();
            let value = if value.fract() == 0.0 {
                value
            } else {
                (value * 100.0 + 0.5).floor() / 100.0
            };
            format!(
                "<span class=\"str\">{}</span> = <b>{}</b>",
                term.trace(),
                format_number(value)
            )
        })
    }

    fn single_term(&self) -> Result<&Term, Error> {
        match self.segments.as_slice() {
            [segment]
                if self.source[..segment.span.start].trim().is_empty()
                    && self.source[segment.span.end..].trim().is_empty() =>
            {
                Ok(&segment.term)
            }
            _ => Err(Error::Unresolved {
                notation: self.to_string(),
            }),
        }
    }

    fn render(&self, mut replace: impl FnMut(&Term) -> String) -> String {
        let mut output = String::with_capacity(self.source.len());
        let mut last = 0;
        for segment in &self.segments {
            output.push_str(&self.source[last..segment.span.start]);
            output.push_str(&replace(&segment.term));
            last = segment.span.end;
        }
        output.push_str(&self.source[last..]);
        output
    }
}

/// Integral values are written without a decimal point and there's no negative zero.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Every expression replaced by its value, the rest of the text is untouched.
impl std::fmt::Display for RolledNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(|term| format_number(term.value())))
    }
}
