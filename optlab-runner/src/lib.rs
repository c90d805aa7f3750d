//! OptLab Runner: analysis orchestration, family sweeps, leaderboards, export.
//!
//! This crate builds on `optlab-core` to provide:
//! - TOML configuration with calendar-date expirations
//! - Deterministic analysis fingerprints
//! - Single-family runs and parallel all-family sweeps
//! - Cross-family leaderboard
//! - JSON / CSV / Markdown artifacts

pub mod config;
pub mod export;
pub mod fingerprint;
pub mod leaderboard;
pub mod runner;
pub mod sweep;

pub use config::{AnalysisConfig, ConfigError, ResolvedConfig};
pub use fingerprint::{AnalysisFingerprint, AnalysisId};
pub use leaderboard::{FamilyLeaderboard, InsertResult, LeaderboardEntry, RankingMetric};
pub use runner::{run_analysis, run_sweep, AnalysisReport, RunError, SCHEMA_VERSION};
pub use sweep::{sweep_families, FamilyOutcome, SweepReport};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn report_types_are_send_sync() {
        assert_send::<AnalysisReport>();
        assert_sync::<AnalysisReport>();
        assert_send::<SweepReport>();
        assert_sync::<SweepReport>();
        assert_send::<FamilyOutcome>();
        assert_sync::<FamilyOutcome>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<AnalysisConfig>();
        assert_sync::<AnalysisConfig>();
        assert_send::<ResolvedConfig>();
        assert_sync::<ResolvedConfig>();
    }

    #[test]
    fn leaderboard_is_send_sync() {
        assert_send::<FamilyLeaderboard>();
        assert_sync::<FamilyLeaderboard>();
        assert_send::<LeaderboardEntry>();
        assert_sync::<LeaderboardEntry>();
    }
}
