//! TOML analysis configuration.
//!
//! ```toml
//! [market]
//! symbol = "XYZ"
//! spot = 25.50
//! implied_vol = 0.35
//! days_to_expiration = 30     # or expiry = "2026-11-14" (+ as_of)
//!
//! [analysis]
//! family = "single_call"
//! risk_free_rate = 0.05
//! full_enumeration = false
//!
//! [[strikes]]
//! strike = 20.0
//! call = 5.80
//! put = 0.10
//! ```

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use optlab_core::domain::{FamilyParseError, InputError};
use optlab_core::{AnalysisOptions, MarketInputs, StrategyFamily, StrikeLadder, StrikeQuote};

use crate::fingerprint::{AnalysisFingerprint, AnalysisId};

/// Errors from loading or resolving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid market data: {0}")]
    Invalid(#[from] InputError),
    #[error("{0}")]
    Family(#[from] FamilyParseError),
    #[error("expiration: {0}")]
    Horizon(String),
    #[error("no strategy family configured; set [analysis].family or pass one explicitly")]
    MissingFamily,
}

/// `[market]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSection {
    #[serde(default)]
    pub symbol: Option<String>,
    pub spot: f64,
    pub implied_vol: f64,
    #[serde(default)]
    pub days_to_expiration: Option<u32>,
    #[serde(default)]
    pub expiry: Option<NaiveDate>,
    /// Valuation date for `expiry`; today when absent.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl MarketSection {
    /// Calendar days to expiration, from `days_to_expiration` or `expiry - as_of`.
    pub fn days(&self, today: NaiveDate) -> Result<u32, ConfigError> {
        match (self.days_to_expiration, self.expiry) {
            (Some(days), None) => Ok(days),
            (None, Some(expiry)) => {
                let as_of = self.as_of.unwrap_or(today);
                let days = (expiry - as_of).num_days();
                if days <= 0 {
                    return Err(InputError::InvalidDays(days).into());
                }
                u32::try_from(days).map_err(|_| ConfigError::Horizon(format!("{days} days is out of range")))
            }
            (Some(_), Some(_)) => Err(ConfigError::Horizon(
                "set either days_to_expiration or expiry, not both".into(),
            )),
            (None, None) => Err(ConfigError::Horizon(
                "one of days_to_expiration or expiry is required".into(),
            )),
        }
    }
}

/// `[analysis]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSection {
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default = "default_rate")]
    pub risk_free_rate: f64,
    #[serde(default)]
    pub full_enumeration: bool,
}

fn default_rate() -> f64 {
    AnalysisOptions::default().risk_free_rate
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            family: None,
            risk_free_rate: default_rate(),
            full_enumeration: false,
        }
    }
}

/// One `[[strikes]]` row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeRow {
    pub strike: f64,
    pub call: f64,
    pub put: f64,
}

/// The whole configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub market: MarketSection,
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub strikes: Vec<StrikeRow>,
}

/// A configuration turned into validated engine inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub symbol: Option<String>,
    pub inputs: MarketInputs,
    pub ladder: StrikeLadder,
    pub family: Option<StrategyFamily>,
    pub options: AnalysisOptions,
}

impl ResolvedConfig {
    /// Family from the config, or `ConfigError::MissingFamily`.
    pub fn require_family(&self) -> Result<StrategyFamily, ConfigError> {
        self.family.ok_or(ConfigError::MissingFamily)
    }

    /// Fingerprint of the effective inputs for `family`.
    pub fn analysis_id(&self, family: StrategyFamily) -> AnalysisId {
        AnalysisFingerprint {
            inputs: self.inputs,
            ladder: &self.ladder,
            family,
            options: self.options,
        }
        .id()
    }
}

impl AnalysisConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Resolve against the local calendar date.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        self.resolve_at(Local::now().date_naive())
    }

    /// Validate every section, using `today` when `as_of` is absent.
    ///
    /// The ladder is sorted and de-duplicated here (first quote for a strike
    /// wins), so rows may appear in any order in the file.
    pub fn resolve_at(&self, today: NaiveDate) -> Result<ResolvedConfig, ConfigError> {
        let days = self.market.days(today)?;
        let inputs = MarketInputs::new(self.market.spot, self.market.implied_vol, days)?;

        let quotes: Vec<StrikeQuote> = self
            .strikes
            .iter()
            .map(|row| StrikeQuote::new(row.strike, row.call, row.put))
            .collect();
        let rows = quotes.len();
        let ladder = StrikeLadder::from_unsorted(quotes)?;
        if ladder.len() < rows {
            warn!(rows, kept = ladder.len(), "duplicate strikes dropped from config");
        }

        let family = self
            .analysis
            .family
            .as_deref()
            .map(str::parse::<StrategyFamily>)
            .transpose()?;

        let options = AnalysisOptions {
            risk_free_rate: self.analysis.risk_free_rate,
            full_enumeration: self.analysis.full_enumeration,
        };
        options.validate()?;

        Ok(ResolvedConfig {
            symbol: self.market.symbol.clone(),
            inputs,
            ladder,
            family,
            options,
        })
    }
}
