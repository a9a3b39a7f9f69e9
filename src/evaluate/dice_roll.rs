use rand::Rng;

use crate::{parse::Dice, Error};

/// Upper bound on how many dice a single term can roll.
pub const MAX_QUANTITY: u32 = 10_000;

/// The outcome of rolling every die of a [Dice] term once.
#[derive(Debug, Clone, PartialEq)]
pub struct DicePool {
    pub(crate) dice: Dice,
    pub(crate) rolls: Vec<u32>,
    pub(crate) faces: Vec<String>,
}

impl Dice {
    /// Roll the full quantity of the dice with the rng specified.
    pub fn roll_all(&self, rng: &mut impl Rng) -> Result<DicePool, Error> {
        if self.quantity > MAX_QUANTITY {
            return Err(Error::TooManyDice {
                quantity: self.quantity,
                max: MAX_QUANTITY,
            });
        }

        let mut rolls = Vec::with_capacity(self.quantity as usize);
        let mut faces = Vec::with_capacity(self.quantity as usize);
        for _ in 0..self.quantity {
            let value = self.roll_die(rng);
            faces.push(self.format_face(value));
            rolls.push(value);
        }

        Ok(DicePool {
            dice: *self,
            rolls,
            faces,
        })
    }

    /// Uniform value between 1 and the number of sides.
    pub fn roll_die(&self, rng: &mut impl Rng) -> u32 {
        let random_value: f64 = rng.gen();
        ((random_value * self.sides as f64) as u32).min(self.sides.saturating_sub(1)) + 1
    }

    /// Expected value of the sum, doesn't roll anything.
    pub fn average(&self) -> f64 {
        self.quantity as f64 * (self.sides as f64 + 1.0) / 2.0
    }

    /// HTML for a single die: misses and crits on a d20, bold for the lowest
    /// and highest face of any other die.
    pub fn format_face(&self, value: u32) -> String {
        match value {
            1 if self.is_d20() => format!("<b class=\"miss\">{value}</b>"),
            20 if self.is_d20() => format!("<b class=\"crit\">{value}</b>"),
            v if v == 1 || v == self.sides => format!("<b>{value}</b>"),
            _ => value.to_string(),
        }
    }

    pub fn format_pool<S: AsRef<str>>(&self, faces: &[S]) -> String {
        let faces = faces.iter().map(AsRef::as_ref).collect::<Vec<_>>();
        format!("{self} ({})", faces.join(", "))
    }
}

impl DicePool {
    pub fn dice(&self) -> Dice {
        self.dice
    }
    pub fn rolls(&self) -> &[u32] {
        &self.rolls
    }
    pub fn faces(&self) -> &[String] {
        &self.faces
    }

    pub fn value(&self) -> f64 {
        self.rolls.iter().map(|&roll| roll as f64).sum()
    }

    pub fn trace(&self) -> String {
        self.dice.format_pool(self.faces.as_slice())
    }
}
