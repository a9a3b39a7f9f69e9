pub mod dice_roll;
pub mod expression;
pub mod roll;
