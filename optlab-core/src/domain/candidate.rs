//! Candidate: one priced instantiation of a strategy family over concrete strikes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::family::StrategyFamily;
use super::leg::Leg;

/// A payoff bound that is either a number or theoretically unlimited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Finite(f64),
    Unbounded,
}

impl Bound {
    pub fn finite(&self) -> Option<f64> {
        match self {
            Bound::Finite(v) => Some(*v),
            Bound::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(v) => write!(f, "{v:.2}"),
            Bound::Unbounded => f.write_str("Unlimited"),
        }
    }
}

/// Serialized as a plain number, or the string `"unbounded"`.
impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bound::Finite(v) => serializer.serialize_f64(*v),
            Bound::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

impl<'de> Deserialize<'de> for Bound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Bound::Finite(v)),
            Repr::Text(s) if s.eq_ignore_ascii_case("unbounded") => Ok(Bound::Unbounded),
            Repr::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"unbounded\", got \"{s}\""
            ))),
        }
    }
}

/// Which cash flow the candidate's `entry_amount` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Quoted premium of a single long option.
    Premium,
    /// Net premium paid for a multi-leg debit structure.
    NetDebit,
    /// Net premium received for a credit structure.
    NetCredit,
    /// Sum of premiums paid for a long volatility structure.
    TotalCost,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Premium => "Premium",
            EntryKind::NetDebit => "Net Debit",
            EntryKind::NetCredit => "Net Credit",
            EntryKind::TotalCost => "Total Cost",
        }
    }
}

/// Values of the strategy under the up and down scenario shocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub stock_up: f64,
    pub stock_down: f64,
    /// Net leg value at `stock_up` (long legs positive, short legs negative).
    pub value_up: f64,
    pub value_down: f64,
    /// Profit relative to entry: `value - debit` for debit structures,
    /// `credit - liability` for credit structures.
    pub profit_up: f64,
    pub profit_down: f64,
}

/// A fully priced strategy candidate. Created once per analysis run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub family: StrategyFamily,
    pub description: String,
    /// Distinct ladder strikes used, in leg order.
    pub strikes: Vec<f64>,
    pub legs: Vec<Leg>,
    pub entry_kind: EntryKind,
    pub entry_amount: f64,
    pub outcome: ScenarioOutcome,
    pub max_gain: Bound,
    /// Defined-risk loss bound, never negative.
    pub max_loss: f64,
    pub percent_gain: f64,
    pub percent_loss: f64,
    pub reward_risk_ratio: f64,
}

impl Candidate {
    /// Strikes joined as `a/b/c`.
    pub fn strikes_label(&self) -> String {
        self.strikes
            .iter()
            .map(|k| format_strike(*k))
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Strike rendered without trailing zeros (`25`, `22.5`).
pub fn format_strike(strike: f64) -> String {
    format!("{strike}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_serializes_sentinel() {
        assert_eq!(serde_json::to_string(&Bound::Unbounded).unwrap(), "\"unbounded\"");
        assert_eq!(serde_json::to_string(&Bound::Finite(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn bound_deserializes_both_shapes() {
        assert_eq!(
            serde_json::from_str::<Bound>("\"unbounded\"").unwrap(),
            Bound::Unbounded
        );
        assert_eq!(serde_json::from_str::<Bound>("2.25").unwrap(), Bound::Finite(2.25));
        assert!(serde_json::from_str::<Bound>("\"lots\"").is_err());
    }

    #[test]
    fn bound_display() {
        assert_eq!(Bound::Finite(1.8).to_string(), "1.80");
        assert_eq!(Bound::Unbounded.to_string(), "Unlimited");
    }

    #[test]
    fn strike_formatting_drops_trailing_zero() {
        assert_eq!(format_strike(25.0), "25");
        assert_eq!(format_strike(22.5), "22.5");
    }
}
