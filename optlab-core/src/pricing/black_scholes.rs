//! Black-Scholes European pricing.
//!
//! Calls are valued in closed form. Puts are never valued independently:
//! `put = call - spot + strike·e^(-rT)`, so the pair always satisfies
//! put-call parity to floating-point rounding regardless of the normal CDF's
//! approximation error.

use thiserror::Error;

use super::normal::norm_cdf;
use crate::domain::OptionType;

/// Continuously compounded annual rate assumed when none is configured.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.05;

/// Arguments the pricer refuses rather than turning into NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("strike must be positive, got {0}")]
    NonPositiveStrike(f64),
    #[error("volatility must be positive, got {0}")]
    NonPositiveVolatility(f64),
    #[error("spot must be positive, got {0}")]
    NonPositiveSpot(f64),
    #[error("pricing inputs must be finite (spot={spot}, strike={strike}, time={time}, rate={rate}, vol={vol})")]
    NonFiniteInput {
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        vol: f64,
    },
}

fn check(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> Result<(), PricingError> {
    if ![spot, strike, time, rate, vol].iter().all(|v| v.is_finite()) {
        return Err(PricingError::NonFiniteInput {
            spot,
            strike,
            time,
            rate,
            vol,
        });
    }
    if strike <= 0.0 {
        return Err(PricingError::NonPositiveStrike(strike));
    }
    if vol <= 0.0 {
        return Err(PricingError::NonPositiveVolatility(vol));
    }
    if spot <= 0.0 {
        return Err(PricingError::NonPositiveSpot(spot));
    }
    Ok(())
}

/// The two normalized distance terms `(d1, d2)`. Requires `time > 0`.
pub fn d1_d2(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> (f64, f64) {
    let vol_sqrt_t = vol * time.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

fn unchecked_call(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    if time <= 0.0 {
        return OptionType::Call.intrinsic(spot, strike);
    }
    let (d1, d2) = d1_d2(spot, strike, time, rate, vol);
    spot * norm_cdf(d1) - strike * (-rate * time).exp() * norm_cdf(d2)
}

/// European call value. At `time <= 0` returns intrinsic value exactly.
pub fn call_price(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> Result<f64, PricingError> {
    check(spot, strike, time, rate, vol)?;
    Ok(unchecked_call(spot, strike, time, rate, vol))
}

/// European put value via put-call parity. At `time <= 0` returns intrinsic value exactly.
pub fn put_price(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> Result<f64, PricingError> {
    check(spot, strike, time, rate, vol)?;
    if time <= 0.0 {
        return Ok(OptionType::Put.intrinsic(spot, strike));
    }
    let call = unchecked_call(spot, strike, time, rate, vol);
    Ok(call - spot + strike * (-rate * time).exp())
}

/// Price either side of the contract.
pub fn price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
) -> Result<f64, PricingError> {
    match option_type {
        OptionType::Call => call_price(spot, strike, time, rate, vol),
        OptionType::Put => put_price(spot, strike, time, rate, vol),
    }
}
