//! Analysis fingerprinting: deterministic identification of an analysis run.
//!
//! The ID is a BLAKE3 hash of the canonical JSON of the effective inputs
//! (resolved horizon in days, not the calendar dates it came from), so two
//! configs describing the same analysis share an ID.

use std::fmt;

use serde::{Deserialize, Serialize};

use optlab_core::{AnalysisOptions, MarketInputs, StrategyFamily, StrikeLadder};

/// Deterministic analysis ID (hex BLAKE3 digest).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(pub String);

impl AnalysisId {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// First 12 hex digits, for log lines and file names. Falls back to the
    /// whole ID when 12 bytes is not a char boundary.
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything that determines an analysis result.
#[derive(Debug, Serialize)]
pub struct AnalysisFingerprint<'a> {
    pub inputs: MarketInputs,
    pub ladder: &'a StrikeLadder,
    pub family: StrategyFamily,
    pub options: AnalysisOptions,
}

impl AnalysisFingerprint<'_> {
    /// Struct fields serialize in declaration order, so the JSON is canonical.
    pub fn canonical_json(&self) -> String {
        // Plain structs of numbers, strings and enums cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn id(&self) -> AnalysisId {
        AnalysisId::from_bytes(self.canonical_json().as_bytes())
    }
}
