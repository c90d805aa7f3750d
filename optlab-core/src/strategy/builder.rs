//! Strategy builder: one enumeration rule per family.
//!
//! Each rule walks the ladder with a generator from `combinations`, lays out
//! the legs and entry amount for the chosen strikes, revalues the legs through
//! the scenario projector and attaches the family's metric block.

use tracing::debug;

use crate::analysis::AnalysisError;
use crate::domain::{
    format_strike, Candidate, EntryKind, Leg, OptionType, ScenarioOutcome, Side, StrategyFamily,
    StrikeLadder,
};
use crate::scenario::ScenarioProjector;

use super::combinations::{binomial, butterfly_triples, pairs, quadruples};
use super::metrics::{self, GainScenario, Metrics};

/// Legs and entry cash flow for one strike combination, before pricing.
struct Draft {
    family: StrategyFamily,
    description: String,
    strikes: Vec<f64>,
    legs: Vec<Leg>,
    entry_kind: EntryKind,
    entry_amount: f64,
}

impl Draft {
    /// Cash paid at entry; negative for a credit.
    fn net_cost(&self) -> f64 {
        match self.entry_kind {
            EntryKind::NetCredit => -self.entry_amount,
            EntryKind::Premium | EntryKind::NetDebit | EntryKind::TotalCost => self.entry_amount,
        }
    }

    fn finish(self, outcome: ScenarioOutcome, m: Metrics) -> Candidate {
        Candidate {
            family: self.family,
            description: self.description,
            strikes: self.strikes,
            legs: self.legs,
            entry_kind: self.entry_kind,
            entry_amount: self.entry_amount,
            outcome,
            max_gain: m.max_gain,
            max_loss: m.max_loss,
            percent_gain: m.percent_gain,
            percent_loss: m.percent_loss,
            reward_risk_ratio: m.reward_risk_ratio,
        }
    }
}

fn option_word(option_type: OptionType) -> &'static str {
    match option_type {
        OptionType::Call => "Call",
        OptionType::Put => "Put",
    }
}

/// Enumerates and prices every valid candidate of a family over one ladder.
pub struct StrategyBuilder<'a> {
    ladder: &'a StrikeLadder,
    projector: ScenarioProjector,
}

impl<'a> StrategyBuilder<'a> {
    pub fn new(ladder: &'a StrikeLadder, projector: ScenarioProjector) -> Self {
        Self { ladder, projector }
    }

    /// Every candidate of `family`, in enumeration order.
    ///
    /// Fails with `InsufficientStrikes` when the ladder is shorter than the
    /// family's leg count.
    pub fn build(&self, family: StrategyFamily) -> Result<Vec<Candidate>, AnalysisError> {
        let required = family.leg_count();
        if self.ladder.len() < required {
            return Err(AnalysisError::InsufficientStrikes {
                family,
                required,
                available: self.ladder.len(),
            });
        }

        let candidates = match family {
            StrategyFamily::SingleCall => self.single(OptionType::Call)?,
            StrategyFamily::SinglePut => self.single(OptionType::Put)?,
            StrategyFamily::BullCallSpread => self.bull_call_spreads()?,
            StrategyFamily::BearPutSpread => self.bear_put_spreads()?,
            StrategyFamily::CallButterfly => self.butterflies(OptionType::Call)?,
            StrategyFamily::PutButterfly => self.butterflies(OptionType::Put)?,
            StrategyFamily::IronCondor => self.iron_condors()?,
            StrategyFamily::Straddle => self.straddles()?,
            StrategyFamily::Strangle => self.strangles()?,
        };
        debug!(family = %family, strikes = self.ladder.len(), candidates = candidates.len(), "enumerated family");
        Ok(candidates)
    }

    fn outcome(&self, draft: &Draft) -> Result<ScenarioOutcome, AnalysisError> {
        let (value_up, value_down) = self.projector.revalue(&draft.legs)?;
        let shock = self.projector.shock();
        let cost = draft.net_cost();
        Ok(ScenarioOutcome {
            stock_up: shock.stock_up,
            stock_down: shock.stock_down,
            value_up,
            value_down,
            profit_up: value_up - cost,
            profit_down: value_down - cost,
        })
    }

    fn single(&self, option_type: OptionType) -> Result<Vec<Candidate>, AnalysisError> {
        let family = match option_type {
            OptionType::Call => StrategyFamily::SingleCall,
            OptionType::Put => StrategyFamily::SinglePut,
        };
        self.ladder
            .quotes()
            .iter()
            .map(|q| {
                let premium = q.premium(option_type);
                let draft = Draft {
                    family,
                    description: format!("Long {} {}", format_strike(q.strike), option_word(option_type)),
                    strikes: vec![q.strike],
                    legs: vec![Leg::new(option_type, Side::Long, q.strike, 1)],
                    entry_kind: EntryKind::Premium,
                    entry_amount: premium,
                };
                let outcome = self.outcome(&draft)?;
                Ok(draft.finish(outcome, metrics::long_option(&outcome, premium)))
            })
            .collect()
    }

    fn bull_call_spreads(&self) -> Result<Vec<Candidate>, AnalysisError> {
        let q = self.ladder.quotes();
        let mut out = Vec::with_capacity(binomial(q.len(), 2));
        for (i, j) in pairs(q.len()) {
            let (long, short) = (&q[i], &q[j]);
            let debit = long.call_premium - short.call_premium;
            let draft = Draft {
                family: StrategyFamily::BullCallSpread,
                description: format!(
                    "Buy {} / Sell {} Call",
                    format_strike(long.strike),
                    format_strike(short.strike)
                ),
                strikes: vec![long.strike, short.strike],
                legs: vec![Leg::long_call(long.strike), Leg::short_call(short.strike)],
                entry_kind: EntryKind::NetDebit,
                entry_amount: debit,
            };
            let outcome = self.outcome(&draft)?;
            let width = short.strike - long.strike;
            let m = metrics::debit_structure(&outcome, debit, width, GainScenario::Up);
            out.push(draft.finish(outcome, m));
        }
        Ok(out)
    }

    /// Long the higher-strike put, short the lower. Gain is reported on the
    /// down shock for this family.
    fn bear_put_spreads(&self) -> Result<Vec<Candidate>, AnalysisError> {
        let q = self.ladder.quotes();
        let mut out = Vec::with_capacity(binomial(q.len(), 2));
        for (i, j) in pairs(q.len()) {
            let (short, long) = (&q[i], &q[j]);
            let debit = long.put_premium - short.put_premium;
            let draft = Draft {
                family: StrategyFamily::BearPutSpread,
                description: format!(
                    "Buy {} / Sell {} Put",
                    format_strike(long.strike),
                    format_strike(short.strike)
                ),
                strikes: vec![long.strike, short.strike],
                legs: vec![Leg::long_put(long.strike), Leg::short_put(short.strike)],
                entry_kind: EntryKind::NetDebit,
                entry_amount: debit,
            };
            let outcome = self.outcome(&draft)?;
            let width = long.strike - short.strike;
            let m = metrics::debit_structure(&outcome, debit, width, GainScenario::Down);
            out.push(draft.finish(outcome, m));
        }
        Ok(out)
    }

    fn butterflies(&self, option_type: OptionType) -> Result<Vec<Candidate>, AnalysisError> {
        let family = match option_type {
            OptionType::Call => StrategyFamily::CallButterfly,
            OptionType::Put => StrategyFamily::PutButterfly,
        };
        let q = self.ladder.quotes();
        let strikes = self.ladder.strikes();
        let mut out = Vec::new();
        for (i, j, k) in butterfly_triples(&strikes) {
            let (lower, middle, upper) = (&q[i], &q[j], &q[k]);
            let debit = lower.premium(option_type) - 2.0 * middle.premium(option_type)
                + upper.premium(option_type);
            let draft = Draft {
                family,
                description: format!(
                    "{}/{}/{} {} Butterfly",
                    format_strike(lower.strike),
                    format_strike(middle.strike),
                    format_strike(upper.strike),
                    option_word(option_type)
                ),
                strikes: vec![lower.strike, middle.strike, upper.strike],
                legs: vec![
                    Leg::new(option_type, Side::Long, lower.strike, 1),
                    Leg::new(option_type, Side::Short, middle.strike, 2),
                    Leg::new(option_type, Side::Long, upper.strike, 1),
                ],
                entry_kind: EntryKind::NetDebit,
                entry_amount: debit,
            };
            let outcome = self.outcome(&draft)?;
            let wing = middle.strike - lower.strike;
            let m = metrics::debit_structure(&outcome, debit, wing, GainScenario::Up);
            out.push(draft.finish(outcome, m));
        }
        Ok(out)
    }

    /// Long put `i`, short put `j`, short call `k`, long call `l`.
    fn iron_condors(&self) -> Result<Vec<Candidate>, AnalysisError> {
        let q = self.ladder.quotes();
        let mut out = Vec::with_capacity(binomial(q.len(), 4));
        for (i, j, k, l) in quadruples(q.len()) {
            let (put_long, put_short, call_short, call_long) = (&q[i], &q[j], &q[k], &q[l]);
            let credit = (put_short.put_premium - put_long.put_premium)
                + (call_short.call_premium - call_long.call_premium);
            let draft = Draft {
                family: StrategyFamily::IronCondor,
                description: format!(
                    "{}/{}/{}/{} Iron Condor",
                    format_strike(put_long.strike),
                    format_strike(put_short.strike),
                    format_strike(call_short.strike),
                    format_strike(call_long.strike)
                ),
                strikes: vec![put_long.strike, put_short.strike, call_short.strike, call_long.strike],
                legs: vec![
                    Leg::long_put(put_long.strike),
                    Leg::short_put(put_short.strike),
                    Leg::short_call(call_short.strike),
                    Leg::long_call(call_long.strike),
                ],
                entry_kind: EntryKind::NetCredit,
                entry_amount: credit,
            };
            let outcome = self.outcome(&draft)?;
            let narrower = (put_short.strike - put_long.strike).min(call_long.strike - call_short.strike);
            out.push(draft.finish(outcome, metrics::iron_condor(&outcome, credit, narrower)));
        }
        Ok(out)
    }

    fn straddles(&self) -> Result<Vec<Candidate>, AnalysisError> {
        self.ladder
            .quotes()
            .iter()
            .map(|q| {
                let cost = q.call_premium + q.put_premium;
                let draft = Draft {
                    family: StrategyFamily::Straddle,
                    description: format!("{} Straddle", format_strike(q.strike)),
                    strikes: vec![q.strike],
                    legs: vec![Leg::long_call(q.strike), Leg::long_put(q.strike)],
                    entry_kind: EntryKind::TotalCost,
                    entry_amount: cost,
                };
                let outcome = self.outcome(&draft)?;
                Ok(draft.finish(outcome, metrics::long_volatility(&outcome, cost)))
            })
            .collect()
    }

    /// Put at the lower strike, call at the higher.
    fn strangles(&self) -> Result<Vec<Candidate>, AnalysisError> {
        let q = self.ladder.quotes();
        let mut out = Vec::with_capacity(binomial(q.len(), 2));
        for (i, j) in pairs(q.len()) {
            let (put_row, call_row) = (&q[i], &q[j]);
            let cost = put_row.put_premium + call_row.call_premium;
            let draft = Draft {
                family: StrategyFamily::Strangle,
                description: format!(
                    "{}/{} Strangle",
                    format_strike(put_row.strike),
                    format_strike(call_row.strike)
                ),
                strikes: vec![put_row.strike, call_row.strike],
                legs: vec![Leg::long_put(put_row.strike), Leg::long_call(call_row.strike)],
                entry_kind: EntryKind::TotalCost,
                entry_amount: cost,
            };
            let outcome = self.outcome(&draft)?;
            out.push(draft.finish(outcome, metrics::long_volatility(&outcome, cost)));
        }
        Ok(out)
    }
}
