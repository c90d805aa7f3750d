//! Legs: one option contract inside a strategy.

use serde::{Deserialize, Serialize};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at the given spot.
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

/// Whether a leg is bought or sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// +1 for long, -1 for short.
    pub fn sign(&self) -> f64 {
        match self {
            Side::Long => 1.0,
            Side::Short => -1.0,
        }
    }
}

/// A single option contract in a strategy, with its position direction and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub option_type: OptionType,
    pub side: Side,
    pub strike: f64,
    pub quantity: u32,
}

impl Leg {
    pub fn new(option_type: OptionType, side: Side, strike: f64, quantity: u32) -> Self {
        Self {
            option_type,
            side,
            strike,
            quantity,
        }
    }

    pub fn long_call(strike: f64) -> Self {
        Self::new(OptionType::Call, Side::Long, strike, 1)
    }

    pub fn short_call(strike: f64) -> Self {
        Self::new(OptionType::Call, Side::Short, strike, 1)
    }

    pub fn long_put(strike: f64) -> Self {
        Self::new(OptionType::Put, Side::Long, strike, 1)
    }

    pub fn short_put(strike: f64) -> Self {
        Self::new(OptionType::Put, Side::Short, strike, 1)
    }

    /// Same leg with a different contract count.
    pub fn times(self, quantity: u32) -> Self {
        Self { quantity, ..self }
    }

    /// Signed multiplier applied to this leg's unit value: `side * quantity`.
    pub fn weight(&self) -> f64 {
        self.side.sign() * f64::from(self.quantity)
    }
}
