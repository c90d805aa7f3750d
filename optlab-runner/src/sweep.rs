//! Family sweep: every strategy family evaluated in parallel over one snapshot.
//!
//! Market inputs and options are validated once up front. After that each
//! family either completes or is recorded as skipped with its error message;
//! one short ladder never aborts the whole sweep.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use optlab_core::{
    analyze, AnalysisError, AnalysisOptions, AnalysisResult, Candidate, MarketInputs, StrategyFamily,
    StrikeLadder,
};

use crate::leaderboard::{FamilyLeaderboard, RankingMetric};

/// Result of one family within a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyOutcome {
    pub family: StrategyFamily,
    pub result: AnalysisResult,
    /// Set when the family could not be evaluated; `result` is then empty.
    pub error: Option<String>,
}

impl FamilyOutcome {
    pub fn is_skipped(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcomes for every family, in `StrategyFamily::ALL` order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepReport {
    pub outcomes: Vec<FamilyOutcome>,
}

impl SweepReport {
    pub fn get(&self, family: StrategyFamily) -> Option<&FamilyOutcome> {
        self.outcomes.iter().find(|o| o.family == family)
    }

    pub fn completed(&self) -> impl Iterator<Item = &FamilyOutcome> {
        self.outcomes.iter().filter(|o| !o.is_skipped())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FamilyOutcome> {
        self.outcomes.iter().filter(|o| o.is_skipped())
    }

    /// Every candidate in the `all` view of each completed family.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.outcomes.iter().flat_map(|o| o.result.all.iter())
    }

    /// Candidates from all three views of each family. Capped families keep
    /// their best-ranked candidates in `by_reward`/`by_ratio` even when
    /// those fall outside the truncated `all` view; repeats are expected.
    pub fn ranked_pool(&self) -> impl Iterator<Item = &Candidate> {
        self.outcomes.iter().flat_map(|o| {
            o.result
                .all
                .iter()
                .chain(o.result.by_reward.iter())
                .chain(o.result.by_ratio.iter())
        })
    }

    /// Cross-family leaderboard of the top `max_size` candidates by `metric`.
    pub fn leaderboard(&self, metric: RankingMetric, max_size: usize) -> FamilyLeaderboard {
        let mut board = FamilyLeaderboard::new(max_size, metric);
        for candidate in self.ranked_pool() {
            board.insert(candidate.clone());
        }
        board
    }
}

fn evaluate(
    inputs: &MarketInputs,
    ladder: &StrikeLadder,
    family: StrategyFamily,
    options: &AnalysisOptions,
) -> FamilyOutcome {
    match analyze(inputs, ladder, family, options) {
        Ok(result) => FamilyOutcome {
            family,
            result,
            error: None,
        },
        Err(err) => {
            warn!(family = %family, error = %err, "family skipped");
            FamilyOutcome {
                family,
                result: AnalysisResult::empty(),
                error: Some(err.to_string()),
            }
        }
    }
}

/// Run every family over the same snapshot.
///
/// Invalid market inputs or options fail the whole sweep before any family
/// runs; per-family failures are reported in the outcome instead.
pub fn sweep_families(
    inputs: &MarketInputs,
    ladder: &StrikeLadder,
    options: &AnalysisOptions,
) -> Result<SweepReport, AnalysisError> {
    inputs.validate()?;
    options.validate()?;

    info!(strikes = ladder.len(), families = StrategyFamily::ALL.len(), "starting family sweep");

    let outcomes: Vec<FamilyOutcome> = StrategyFamily::ALL
        .par_iter()
        .map(|&family| evaluate(inputs, ladder, family, options))
        .collect();

    let report = SweepReport { outcomes };
    info!(
        completed = report.completed().count(),
        skipped = report.skipped().count(),
        candidates = report.candidates().count(),
        "family sweep finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use optlab_core::{InputError, StrikeQuote};

    fn ladder(n: usize) -> StrikeLadder {
        let quotes = (0..n)
            .map(|i| {
                let strike = 20.0 + 2.5 * i as f64;
                StrikeQuote::new(strike, (27.0 - strike).max(0.2), (strike - 24.0).max(0.2))
            })
            .collect();
        StrikeLadder::from_quotes(quotes).unwrap()
    }

    fn inputs() -> MarketInputs {
        MarketInputs::new(25.5, 0.35, 30).unwrap()
    }

    #[test]
    fn outcomes_follow_family_order() {
        let report = sweep_families(&inputs(), &ladder(5), &AnalysisOptions::default()).unwrap();
        let families: Vec<_> = report.outcomes.iter().map(|o| o.family).collect();
        assert_eq!(families, StrategyFamily::ALL.to_vec());
        assert_eq!(report.skipped().count(), 0);
    }

    #[test]
    fn short_ladder_skips_only_wide_families() {
        let report = sweep_families(&inputs(), &ladder(2), &AnalysisOptions::default()).unwrap();
        let skipped: Vec<_> = report.skipped().map(|o| o.family).collect();
        assert_eq!(
            skipped,
            vec![
                StrategyFamily::CallButterfly,
                StrategyFamily::PutButterfly,
                StrategyFamily::IronCondor
            ]
        );
        let condor = report.get(StrategyFamily::IronCondor).unwrap();
        assert!(condor.result.is_empty());
        assert!(condor.error.as_deref().unwrap().contains("needs at least 4 strikes"));
        assert_eq!(report.get(StrategyFamily::SingleCall).unwrap().result.all.len(), 2);
    }

    #[test]
    fn invalid_inputs_fail_whole_sweep() {
        let bad = MarketInputs {
            spot_price: 25.5,
            implied_vol: 0.0,
            days_to_expiration: 30,
        };
        let err = sweep_families(&bad, &ladder(5), &AnalysisOptions::default()).unwrap_err();
        assert_eq!(err, AnalysisError::Input(InputError::InvalidVolatility(0.0)));
    }

    #[test]
    fn leaderboard_keeps_best_capped_candidates() {
        // Ten strikes give 210 condors and 45 strangles, far past the caps.
        let quotes = (0..10)
            .map(|i| {
                let strike = 10.0 + i as f64;
                let put = if i == 0 { 4.0 } else { (strike - 14.0).max(0.1) };
                StrikeQuote::new(strike, (15.0 - strike).max(0.1), put)
            })
            .collect();
        let ladder = StrikeLadder::from_quotes(quotes).unwrap();
        let inputs = MarketInputs::new(14.5, 0.4, 30).unwrap();
        let report = sweep_families(&inputs, &ladder, &AnalysisOptions::default()).unwrap();

        let by_gain = report.leaderboard(RankingMetric::PercentGain, 10_000);
        let by_ratio = report.leaderboard(RankingMetric::RewardRiskRatio, 10_000);
        let on_board = |board: &FamilyLeaderboard, c: &Candidate| {
            board
                .entries()
                .iter()
                .any(|e| e.candidate.family == c.family && e.candidate.description == c.description)
        };
        for outcome in report.completed() {
            if let Some(best) = outcome.result.by_reward.first() {
                assert!(on_board(&by_gain, best), "{} missing from gain board", best.description);
            }
            if let Some(best) = outcome.result.by_ratio.first() {
                assert!(on_board(&by_ratio, best), "{} missing from ratio board", best.description);
            }
        }
    }

    #[test]
    fn parallel_sweep_matches_sequential_analysis() {
        let ladder = ladder(6);
        let options = AnalysisOptions::default();
        let report = sweep_families(&inputs(), &ladder, &options).unwrap();
        for outcome in &report.outcomes {
            let direct = analyze(&inputs(), &ladder, outcome.family, &options).unwrap();
            assert_eq!(outcome.result, direct);
        }
    }
}
