//! Payoff metrics derived from a candidate's scenario outcome.
//!
//! Division by a zero basis never faults: percentages and ratios fall back to
//! `0` whenever their denominator is zero (or the analytic loss bound clamps
//! to zero).

use serde::{Deserialize, Serialize};

use crate::domain::{Bound, ScenarioOutcome};

/// The metric block stored on every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub max_gain: Bound,
    pub max_loss: f64,
    pub percent_gain: f64,
    pub percent_loss: f64,
    pub reward_risk_ratio: f64,
}

/// Which shock a directional family reports as its "gain".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainScenario {
    Up,
    Down,
}

impl GainScenario {
    /// `(gain_profit, loss_profit)` picked from the outcome.
    fn split(self, outcome: &ScenarioOutcome) -> (f64, f64) {
        match self {
            GainScenario::Up => (outcome.profit_up, outcome.profit_down),
            GainScenario::Down => (outcome.profit_down, outcome.profit_up),
        }
    }
}

/// `100·value/|basis|`, or `0` for a zero basis.
pub fn percent_of(value: f64, basis: f64) -> f64 {
    if basis == 0.0 {
        0.0
    } else {
        100.0 * value / basis.abs()
    }
}

/// `numerator/denominator`, or `0` when the denominator is zero or the quotient is not finite.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let r = numerator / denominator;
    if r.is_finite() {
        r
    } else {
        0.0
    }
}

/// Analytic reward/risk: `max_gain / max_loss` for a positive loss bound, else `0`.
fn analytic_ratio(max_gain: f64, max_loss: f64) -> f64 {
    if max_loss > 0.0 {
        ratio_or_zero(max_gain, max_loss)
    } else {
        0.0
    }
}

/// Single long call or put: loss capped at the premium, gain unbounded.
///
/// Gain is always the up shock and loss the down shock, also for puts.
/// The ratio is scenario-derived: `|percent_gain / percent_loss|`.
pub fn long_option(outcome: &ScenarioOutcome, premium: f64) -> Metrics {
    let percent_gain = percent_of(outcome.profit_up, premium);
    let percent_loss = percent_of(outcome.profit_down, premium);
    Metrics {
        max_gain: Bound::Unbounded,
        max_loss: premium.max(0.0),
        percent_gain,
        percent_loss,
        reward_risk_ratio: ratio_or_zero(percent_gain, percent_loss).abs(),
    }
}

/// Defined-risk debit structure (vertical spread or butterfly).
///
/// `width` is the distance between the long strike and the short strike
/// (the wing width for a butterfly): `max_gain = width - debit`,
/// `max_loss = debit`.
pub fn debit_structure(outcome: &ScenarioOutcome, debit: f64, width: f64, gain: GainScenario) -> Metrics {
    let (gain_profit, loss_profit) = gain.split(outcome);
    let max_gain = width - debit;
    let max_loss = debit.max(0.0);
    Metrics {
        max_gain: Bound::Finite(max_gain),
        max_loss,
        percent_gain: percent_of(gain_profit, debit),
        percent_loss: percent_of(loss_profit, debit),
        reward_risk_ratio: analytic_ratio(max_gain, max_loss),
    }
}

/// Iron condor: a credit received against the narrower wing at risk.
///
/// Returns are quoted on capital at risk: `percent_gain = 100·credit/max_loss`
/// (keeping the whole credit is the best case) and `percent_loss` is the
/// worse of the two scenario profits over `max_loss`.
pub fn iron_condor(outcome: &ScenarioOutcome, credit: f64, narrower_width: f64) -> Metrics {
    let max_loss = (narrower_width - credit).max(0.0);
    let worst = outcome.profit_up.min(outcome.profit_down);
    let (percent_gain, percent_loss) = if max_loss > 0.0 {
        (100.0 * credit / max_loss, 100.0 * worst / max_loss)
    } else {
        (0.0, 0.0)
    };
    Metrics {
        max_gain: Bound::Finite(credit),
        max_loss,
        percent_gain,
        percent_loss,
        reward_risk_ratio: analytic_ratio(credit, max_loss),
    }
}

/// Long straddle or strangle: direction-agnostic, so best and worst are
/// taken across both shocks. Ratio is the best scenario profit per unit cost.
pub fn long_volatility(outcome: &ScenarioOutcome, cost: f64) -> Metrics {
    let best = outcome.profit_up.max(outcome.profit_down);
    let worst = outcome.profit_up.min(outcome.profit_down);
    Metrics {
        max_gain: Bound::Unbounded,
        max_loss: cost.max(0.0),
        percent_gain: percent_of(best, cost),
        percent_loss: percent_of(worst, cost),
        reward_risk_ratio: ratio_or_zero(best, cost),
    }
}
