//! Closed-form European option valuation.
//!
//! - `normal`: cumulative standard normal approximation
//! - `black_scholes`: call pricing and put-via-parity

pub mod black_scholes;
pub mod normal;

pub use black_scholes::{call_price, d1_d2, price, put_price, PricingError, DEFAULT_RISK_FREE_RATE};
pub use normal::{norm_cdf, NORM_CDF_MAX_ERROR};
