//! Scenario projection: the deterministic up/down shocks and leg revaluation.
//!
//! The shock is one lognormal standard deviation over the full horizon:
//! `move = vol·√T`, `up = S·e^move`, `down = S·e^-move`. Legs are then
//! revalued at the shocked spots with HALF the time to expiry remaining,
//! i.e. a mark taken mid-way to expiration rather than at expiration.

use serde::{Deserialize, Serialize};

use crate::domain::{Leg, MarketInputs};
use crate::pricing::{price, PricingError};

/// Fraction of the original horizon still remaining when legs are revalued.
pub const REVALUATION_FRACTION: f64 = 0.5;

/// The two shocked stock prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioShock {
    pub stock_up: f64,
    pub stock_down: f64,
}

/// Symmetric-in-log-space one-sigma shock for the given inputs.
pub fn project(inputs: &MarketInputs) -> ScenarioShock {
    let shift = inputs.implied_vol * inputs.time_to_expiry().sqrt();
    ScenarioShock {
        stock_up: inputs.spot_price * shift.exp(),
        stock_down: inputs.spot_price * (-shift).exp(),
    }
}

/// Revalues leg sets at the shocked prices for one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioProjector {
    shock: ScenarioShock,
    horizon: f64,
    rate: f64,
    vol: f64,
}

impl ScenarioProjector {
    pub fn new(inputs: &MarketInputs, rate: f64) -> Self {
        Self {
            shock: project(inputs),
            horizon: inputs.time_to_expiry() * REVALUATION_FRACTION,
            rate,
            vol: inputs.implied_vol,
        }
    }

    pub fn shock(&self) -> ScenarioShock {
        self.shock
    }

    /// Time to expiry (years) used for revaluation.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Net value of `legs` at `spot`: long legs add, short legs subtract.
    pub fn value_at(&self, legs: &[Leg], spot: f64) -> Result<f64, PricingError> {
        legs.iter().try_fold(0.0, |acc, leg| {
            let unit = price(leg.option_type, spot, leg.strike, self.horizon, self.rate, self.vol)?;
            Ok(acc + leg.weight() * unit)
        })
    }

    /// Net leg value at `(stock_up, stock_down)`.
    pub fn revalue(&self, legs: &[Leg]) -> Result<(f64, f64), PricingError> {
        Ok((
            self.value_at(legs, self.shock.stock_up)?,
            self.value_at(legs, self.shock.stock_down)?,
        ))
    }
}
