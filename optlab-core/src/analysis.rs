//! Analysis facade: validate, enumerate, rank, truncate.
//!
//! `analyze` is a pure function of its arguments. It holds no state between
//! calls and never mutates the ladder or market snapshot it is given.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Candidate, InputError, MarketInputs, StrategyFamily, StrikeLadder};
use crate::format::FormattedAnalysis;
use crate::pricing::{PricingError, DEFAULT_RISK_FREE_RATE};
use crate::ranking::{rank_by_ratio, rank_by_reward, truncate, ResultCaps};
use crate::scenario::ScenarioProjector;
use crate::strategy::StrategyBuilder;

/// Errors returned by [`analyze`]. No partial result accompanies an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("{family} needs at least {required} strikes, ladder has {available}")]
    InsufficientStrikes {
        family: StrategyFamily,
        required: usize,
        available: usize,
    },

    #[error("pricing failed: {0}")]
    Pricing(#[from] PricingError),
}

impl AnalysisError {
    /// True for the ladder-too-short condition, which callers report as an
    /// empty result rather than a failure.
    pub fn is_insufficient_strikes(&self) -> bool {
        matches!(self, AnalysisError::InsufficientStrikes { .. })
    }
}

/// Knobs that are not part of the market snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Annualized, continuously compounded.
    pub risk_free_rate: f64,
    /// Skip the per-family truncation caps.
    pub full_enumeration: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            full_enumeration: false,
        }
    }
}

impl AnalysisOptions {
    pub fn full() -> Self {
        Self {
            full_enumeration: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !self.risk_free_rate.is_finite() {
            return Err(InputError::InvalidRate(self.risk_free_rate));
        }
        Ok(())
    }

    /// Caps applied to `family` under these options.
    pub fn caps_for(&self, family: StrategyFamily) -> ResultCaps {
        if self.full_enumeration {
            ResultCaps::UNBOUNDED
        } else {
            ResultCaps::for_family(family)
        }
    }
}

/// The three candidate views for one family.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Enumeration order.
    pub all: Vec<Candidate>,
    /// Sorted by percent gain, descending.
    pub by_reward: Vec<Candidate>,
    /// Sorted by reward/risk ratio, descending.
    pub by_ratio: Vec<Candidate>,
}

impl AnalysisResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Display rows for every view.
    pub fn formatted(&self) -> FormattedAnalysis {
        FormattedAnalysis::from_result(self)
    }
}

/// Evaluate every candidate of `family` over `ladder`.
///
/// All validation happens before the first price is computed. Ranked views
/// are sorted over the full candidate set and only then truncated.
pub fn analyze(
    inputs: &MarketInputs,
    ladder: &StrikeLadder,
    family: StrategyFamily,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError> {
    inputs.validate()?;
    options.validate()?;
    if ladder.is_empty() {
        return Err(InputError::EmptyLadder.into());
    }

    let projector = ScenarioProjector::new(inputs, options.risk_free_rate);
    let candidates = StrategyBuilder::new(ladder, projector).build(family)?;

    let caps = options.caps_for(family);
    let by_reward = truncate(rank_by_reward(&candidates), caps.ranked);
    let by_ratio = truncate(rank_by_ratio(&candidates), caps.ranked);
    let total = candidates.len();
    let all = truncate(candidates, caps.all);

    debug!(
        family = %family,
        total,
        kept = all.len(),
        truncated = total > all.len(),
        "analysis complete"
    );

    Ok(AnalysisResult {
        all,
        by_reward,
        by_ratio,
    })
}
