//! Market inputs: the immutable snapshot consumed by one analysis run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::leg::OptionType;

/// Day-count basis used to turn days to expiration into a year fraction.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Rejections raised before any pricing happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("spot price must be positive and finite, got {0}")]
    InvalidSpot(f64),
    #[error("implied volatility must be positive and finite, got {0}")]
    InvalidVolatility(f64),
    #[error("days to expiration must be positive, got {0}")]
    InvalidDays(i64),
    #[error("risk-free rate must be finite, got {0}")]
    InvalidRate(f64),
    #[error("strike must be positive and finite, got {0}")]
    InvalidStrike(f64),
    #[error("{option_type:?} premium at strike {strike} must be non-negative and finite, got {premium}")]
    InvalidPremium {
        strike: f64,
        option_type: OptionType,
        premium: f64,
    },
    #[error("strikes must be ascending: {next} follows {previous}")]
    UnsortedStrikes { previous: f64, next: f64 },
    #[error("duplicate strike {0}")]
    DuplicateStrike(f64),
    #[error("strike ladder is empty")]
    EmptyLadder,
    #[error("strike {0} is not in the ladder")]
    StrikeNotFound(f64),
    #[error("cannot remove the last remaining strike")]
    LastStrike,
}

/// Spot, volatility and horizon for a single analysis run.
///
/// `implied_vol` is an annualized fraction (0.35 = 35%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketInputs {
    pub spot_price: f64,
    pub implied_vol: f64,
    pub days_to_expiration: u32,
}

impl MarketInputs {
    /// Build a validated snapshot.
    pub fn new(spot_price: f64, implied_vol: f64, days_to_expiration: u32) -> Result<Self, InputError> {
        let inputs = Self {
            spot_price,
            implied_vol,
            days_to_expiration,
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Check every field. Inputs built with a struct literal are re-checked by the facade.
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.spot_price.is_finite() && self.spot_price > 0.0) {
            return Err(InputError::InvalidSpot(self.spot_price));
        }
        if !(self.implied_vol.is_finite() && self.implied_vol > 0.0) {
            return Err(InputError::InvalidVolatility(self.implied_vol));
        }
        if self.days_to_expiration == 0 {
            return Err(InputError::InvalidDays(0));
        }
        Ok(())
    }

    /// Time to expiration in years (`days / 365`).
    pub fn time_to_expiry(&self) -> f64 {
        f64::from(self.days_to_expiration) / DAYS_PER_YEAR
    }
}
