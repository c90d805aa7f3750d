//! OptLab Core: pricing, scenario projection and strategy ranking for listed options.
//!
//! This crate is the pure engine behind the analyzer:
//! - Domain types (market snapshot, strike ladder, legs, strategy families, candidates)
//! - Black-Scholes pricer with put-via-parity and intrinsic value at expiry
//! - Deterministic one-sigma up/down scenario projection
//! - Per-family strategy enumeration over explicit index-tuple generators
//! - Stable ranking with per-family truncation caps
//! - Fixed-precision display rows
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod analysis;
pub mod domain;
pub mod format;
pub mod pricing;
pub mod ranking;
pub mod scenario;
pub mod strategy;

pub use analysis::{analyze, AnalysisError, AnalysisOptions, AnalysisResult};
pub use domain::{
    Bound, Candidate, EntryKind, InputError, Leg, MarketInputs, OptionType, ScenarioOutcome, Side,
    StrategyFamily, StrikeLadder, StrikeQuote,
};
pub use format::{FormattedAnalysis, FormattedCandidate};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything handed across a thread boundary by the
    /// runner's parallel sweep is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<MarketInputs>();
        require_sync::<MarketInputs>();
        require_send::<StrikeLadder>();
        require_sync::<StrikeLadder>();
        require_send::<StrategyFamily>();
        require_sync::<StrategyFamily>();
        require_send::<Candidate>();
        require_sync::<Candidate>();
        require_send::<AnalysisOptions>();
        require_sync::<AnalysisOptions>();
        require_send::<AnalysisResult>();
        require_sync::<AnalysisResult>();
        require_send::<AnalysisError>();
        require_sync::<AnalysisError>();
        require_send::<scenario::ScenarioProjector>();
        require_sync::<scenario::ScenarioProjector>();
    }

    /// The facade is a plain function over borrowed snapshots; it cannot
    /// mutate the ladder or inputs it is handed.
    #[test]
    fn facade_takes_shared_references() {
        fn _check(
            inputs: &MarketInputs,
            ladder: &StrikeLadder,
            options: &AnalysisOptions,
        ) -> Result<AnalysisResult, AnalysisError> {
            analyze(inputs, ladder, StrategyFamily::SingleCall, options)
        }
    }
}
