//! Ranker: stable descending sorts and per-family truncation caps.
//!
//! Keys are compared at display precision, so two candidates that render the
//! same percentage (or ratio) keep their enumeration order.

use std::cmp::Ordering;

use crate::domain::{Candidate, StrategyFamily};

/// Rounds `value` to `decimals` places. Negative values that round to zero
/// come back as `0.0`, not `-0.0`, so they tie with small positives.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale + 0.0
}

/// Ranking key for the reward view: percent gain at one decimal.
pub fn reward_key(candidate: &Candidate) -> f64 {
    round_to(candidate.percent_gain, 1)
}

/// Ranking key for the ratio view: reward/risk at two decimals.
pub fn ratio_key(candidate: &Candidate) -> f64 {
    round_to(candidate.reward_risk_ratio, 2)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Stable sort by `key`, highest first.
pub fn rank_by<F>(candidates: &[Candidate], key: F) -> Vec<Candidate>
where
    F: Fn(&Candidate) -> f64,
{
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|a, b| descending(key(a), key(b)));
    ranked
}

/// Candidates sorted by percent gain, highest first.
pub fn rank_by_reward(candidates: &[Candidate]) -> Vec<Candidate> {
    rank_by(candidates, reward_key)
}

/// Candidates sorted by reward/risk ratio, highest first.
pub fn rank_by_ratio(candidates: &[Candidate]) -> Vec<Candidate> {
    rank_by(candidates, ratio_key)
}

/// Output limits for one family. `None` keeps every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCaps {
    /// Leading candidates kept in enumeration order for the `all` view.
    pub all: Option<usize>,
    /// Leading candidates kept in each ranked view.
    pub ranked: Option<usize>,
}

impl ResultCaps {
    pub const UNBOUNDED: ResultCaps = ResultCaps { all: None, ranked: None };

    pub fn for_family(family: StrategyFamily) -> Self {
        match family {
            StrategyFamily::IronCondor
            | StrategyFamily::CallButterfly
            | StrategyFamily::PutButterfly => ResultCaps { all: Some(20), ranked: Some(5) },
            StrategyFamily::Strangle => ResultCaps { all: Some(15), ranked: Some(5) },
            StrategyFamily::SingleCall
            | StrategyFamily::SinglePut
            | StrategyFamily::BullCallSpread
            | StrategyFamily::BearPutSpread
            | StrategyFamily::Straddle => ResultCaps::UNBOUNDED,
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.all.is_some() || self.ranked.is_some()
    }
}

pub(crate) fn truncate(mut candidates: Vec<Candidate>, cap: Option<usize>) -> Vec<Candidate> {
    if let Some(n) = cap {
        candidates.truncate(n);
    }
    candidates
}
