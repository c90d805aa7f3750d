//! Strategy families: the selector that picks an enumeration rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The nine strategy families the builder knows how to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyFamily {
    SingleCall,
    SinglePut,
    BullCallSpread,
    BearPutSpread,
    CallButterfly,
    PutButterfly,
    IronCondor,
    Straddle,
    Strangle,
}

/// Unknown family name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy family '{0}' (expected one of: {names})", names = StrategyFamily::names().join(", "))]
pub struct FamilyParseError(pub String);

impl StrategyFamily {
    /// Every family, in canonical order.
    pub const ALL: [StrategyFamily; 9] = [
        Self::SingleCall,
        Self::SinglePut,
        Self::BullCallSpread,
        Self::BearPutSpread,
        Self::CallButterfly,
        Self::PutButterfly,
        Self::IronCondor,
        Self::Straddle,
        Self::Strangle,
    ];

    /// Number of option legs in one candidate. The facade requires at least
    /// this many ladder rows before enumerating the family.
    pub fn leg_count(&self) -> usize {
        match self {
            Self::SingleCall | Self::SinglePut => 1,
            Self::BullCallSpread | Self::BearPutSpread | Self::Straddle | Self::Strangle => 2,
            Self::CallButterfly | Self::PutButterfly => 3,
            Self::IronCondor => 4,
        }
    }

    /// Snake-case identifier used in configs and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::SingleCall => "single_call",
            Self::SinglePut => "single_put",
            Self::BullCallSpread => "bull_call_spread",
            Self::BearPutSpread => "bear_put_spread",
            Self::CallButterfly => "call_butterfly",
            Self::PutButterfly => "put_butterfly",
            Self::IronCondor => "iron_condor",
            Self::Straddle => "straddle",
            Self::Strangle => "strangle",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleCall => "Long Call",
            Self::SinglePut => "Long Put",
            Self::BullCallSpread => "Bull Call Spread",
            Self::BearPutSpread => "Bear Put Spread",
            Self::CallButterfly => "Long Call Butterfly",
            Self::PutButterfly => "Long Put Butterfly",
            Self::IronCondor => "Iron Condor",
            Self::Straddle => "Long Straddle",
            Self::Strangle => "Long Strangle",
        }
    }

    /// Whether the family's payoff is unbounded as spot grows.
    pub fn has_unbounded_gain(&self) -> bool {
        matches!(
            self,
            Self::SingleCall | Self::SinglePut | Self::Straddle | Self::Strangle
        )
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.key()).collect()
    }
}

impl fmt::Display for StrategyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StrategyFamily {
    type Err = FamilyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key() == wanted)
            .ok_or_else(|| FamilyParseError(s.to_string()))
    }
}
