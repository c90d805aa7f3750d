//! Display rows: every numeric field rendered at its fixed precision
//! (currency 2 dp, percentages 1 dp, ratios 2 dp).

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::domain::{Candidate, StrategyFamily};

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn percent(value: f64) -> String {
    format!("{value:.1}")
}

pub fn ratio(value: f64) -> String {
    format!("{value:.2}")
}

/// One candidate ready for rendering without further numeric logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedCandidate {
    pub family: StrategyFamily,
    pub description: String,
    pub strikes: String,
    pub entry_kind: String,
    pub entry_amount: String,
    pub stock_up: String,
    pub stock_down: String,
    pub value_up: String,
    pub value_down: String,
    pub max_gain: String,
    pub max_loss: String,
    pub percent_gain: String,
    pub percent_loss: String,
    pub reward_risk_ratio: String,
}

impl FormattedCandidate {
    /// Column names in field order, for tabular exports.
    pub const HEADERS: [&'static str; 14] = [
        "family",
        "description",
        "strikes",
        "entry_kind",
        "entry_amount",
        "stock_up",
        "stock_down",
        "value_up",
        "value_down",
        "max_gain",
        "max_loss",
        "percent_gain",
        "percent_loss",
        "reward_risk_ratio",
    ];

    pub fn row(&self) -> [&str; 14] {
        [
            self.family.key(),
            self.description.as_str(),
            self.strikes.as_str(),
            self.entry_kind.as_str(),
            self.entry_amount.as_str(),
            self.stock_up.as_str(),
            self.stock_down.as_str(),
            self.value_up.as_str(),
            self.value_down.as_str(),
            self.max_gain.as_str(),
            self.max_loss.as_str(),
            self.percent_gain.as_str(),
            self.percent_loss.as_str(),
            self.reward_risk_ratio.as_str(),
        ]
    }
}

impl From<&Candidate> for FormattedCandidate {
    fn from(c: &Candidate) -> Self {
        Self {
            family: c.family,
            description: c.description.clone(),
            strikes: c.strikes_label(),
            entry_kind: c.entry_kind.label().to_string(),
            entry_amount: money(c.entry_amount),
            stock_up: money(c.outcome.stock_up),
            stock_down: money(c.outcome.stock_down),
            value_up: money(c.outcome.value_up),
            value_down: money(c.outcome.value_down),
            max_gain: c.max_gain.to_string(),
            max_loss: money(c.max_loss),
            percent_gain: percent(c.percent_gain),
            percent_loss: percent(c.percent_loss),
            reward_risk_ratio: ratio(c.reward_risk_ratio),
        }
    }
}

/// The three views of an [`AnalysisResult`] as display rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormattedAnalysis {
    pub all: Vec<FormattedCandidate>,
    pub by_reward: Vec<FormattedCandidate>,
    pub by_ratio: Vec<FormattedCandidate>,
}

impl FormattedAnalysis {
    pub fn from_result(result: &AnalysisResult) -> Self {
        fn rows(candidates: &[Candidate]) -> Vec<FormattedCandidate> {
            candidates.iter().map(FormattedCandidate::from).collect()
        }
        Self {
            all: rows(&result.all),
            by_reward: rows(&result.by_reward),
            by_ratio: rows(&result.by_ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bound, EntryKind, Leg, ScenarioOutcome};

    fn spread() -> Candidate {
        Candidate {
            family: StrategyFamily::BullCallSpread,
            description: "Buy 22.5 / Sell 25 Call".into(),
            strikes: vec![22.5, 25.0],
            legs: vec![Leg::long_call(22.5), Leg::short_call(25.0)],
            entry_kind: EntryKind::NetDebit,
            entry_amount: 1.7,
            outcome: ScenarioOutcome {
                stock_up: 28.19152,
                stock_down: 23.06551,
                value_up: 2.4563,
                value_down: 0.51,
                profit_up: 0.7563,
                profit_down: -1.19,
            },
            max_gain: Bound::Finite(0.8),
            max_loss: 1.7,
            percent_gain: 44.488,
            percent_loss: -70.0,
            reward_risk_ratio: 0.470588,
        }
    }

    #[test]
    fn fixed_precision_fields() {
        let f = FormattedCandidate::from(&spread());
        assert_eq!(f.strikes, "22.5/25");
        assert_eq!(f.entry_kind, "Net Debit");
        assert_eq!(f.entry_amount, "1.70");
        assert_eq!(f.stock_up, "28.19");
        assert_eq!(f.stock_down, "23.07");
        assert_eq!(f.max_gain, "0.80");
        assert_eq!(f.percent_gain, "44.5");
        assert_eq!(f.percent_loss, "-70.0");
        assert_eq!(f.reward_risk_ratio, "0.47");
    }

    #[test]
    fn unbounded_gain_renders_unlimited() {
        let mut c = spread();
        c.max_gain = Bound::Unbounded;
        assert_eq!(FormattedCandidate::from(&c).max_gain, "Unlimited");
    }

    #[test]
    fn row_matches_headers() {
        let f = FormattedCandidate::from(&spread());
        let row = f.row();
        assert_eq!(row.len(), FormattedCandidate::HEADERS.len());
        assert_eq!(row[0], "bull_call_spread");
        assert_eq!(row[13], "0.47");
    }
}
