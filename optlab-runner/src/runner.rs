//! Analysis runner: wires configuration, the core facade and fingerprinting.
//!
//! Two entry points:
//! - `run_analysis()`: one family from a loaded config. Used by `optlab analyze`.
//! - `run_sweep()`: every family from a loaded config. Used by `optlab sweep`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use optlab_core::{analyze, AnalysisError, AnalysisOptions, AnalysisResult, MarketInputs, StrategyFamily};

use crate::config::{ConfigError, ResolvedConfig};
use crate::fingerprint::AnalysisId;
use crate::sweep::{sweep_families, SweepReport};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub schema_version: u32,
    pub analysis_id: AnalysisId,
    pub symbol: Option<String>,
    pub family: StrategyFamily,
    pub inputs: MarketInputs,
    pub options: AnalysisOptions,
    pub strike_count: usize,
    pub result: AnalysisResult,
}

/// Analyze one family. `family` overrides the one in the config.
pub fn run_analysis(config: &ResolvedConfig, family: Option<StrategyFamily>) -> Result<AnalysisReport, RunError> {
    let family = match family {
        Some(f) => f,
        None => config.require_family()?,
    };
    let analysis_id = config.analysis_id(family);
    info!(
        id = analysis_id.short(),
        family = %family,
        strikes = config.ladder.len(),
        "running analysis"
    );

    let result = analyze(&config.inputs, &config.ladder, family, &config.options)?;

    info!(
        id = analysis_id.short(),
        candidates = result.all.len(),
        "analysis finished"
    );
    Ok(AnalysisReport {
        schema_version: SCHEMA_VERSION,
        analysis_id,
        symbol: config.symbol.clone(),
        family,
        inputs: config.inputs,
        options: config.options,
        strike_count: config.ladder.len(),
        result,
    })
}

/// Analyze every family over the configured snapshot.
pub fn run_sweep(config: &ResolvedConfig) -> Result<SweepReport, RunError> {
    Ok(sweep_families(&config.inputs, &config.ladder, &config.options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use optlab_core::{StrikeLadder, StrikeQuote};

    fn resolved(family: Option<StrategyFamily>) -> ResolvedConfig {
        ResolvedConfig {
            symbol: Some("XYZ".into()),
            inputs: MarketInputs::new(25.5, 0.35, 30).unwrap(),
            ladder: StrikeLadder::from_quotes(vec![
                StrikeQuote::new(22.5, 3.50, 0.30),
                StrikeQuote::new(25.0, 1.80, 1.50),
                StrikeQuote::new(27.5, 0.60, 3.40),
            ])
            .unwrap(),
            family,
            options: AnalysisOptions::default(),
        }
    }

    #[test]
    fn report_carries_identity() {
        let report = run_analysis(&resolved(Some(StrategyFamily::Straddle)), None).unwrap();
        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.family, StrategyFamily::Straddle);
        assert_eq!(report.strike_count, 3);
        assert_eq!(report.result.all.len(), 3);
        assert_eq!(report.analysis_id, resolved(None).analysis_id(StrategyFamily::Straddle));
    }

    #[test]
    fn explicit_family_overrides_config() {
        let report = run_analysis(&resolved(Some(StrategyFamily::Straddle)), Some(StrategyFamily::SingleCall)).unwrap();
        assert_eq!(report.family, StrategyFamily::SingleCall);
    }

    #[test]
    fn missing_family_is_config_error() {
        let err = run_analysis(&resolved(None), None).unwrap_err();
        assert!(matches!(err, RunError::Config(ConfigError::MissingFamily)));
    }

    #[test]
    fn insufficient_strikes_surface_as_analysis_error() {
        let err = run_analysis(&resolved(None), Some(StrategyFamily::IronCondor)).unwrap_err();
        assert!(matches!(
            err,
            RunError::Analysis(AnalysisError::InsufficientStrikes { required: 4, available: 3, .. })
        ));
    }

    #[test]
    fn sweep_covers_every_family() {
        let report = run_sweep(&resolved(None)).unwrap();
        assert_eq!(report.outcomes.len(), StrategyFamily::ALL.len());
        assert_eq!(report.skipped().count(), 1);
    }
}
