//! End-to-end analysis tests over small hand-built ladders.

use optlab_core::domain::{Bound, EntryKind, OptionType, Side};
use optlab_core::ranking::ResultCaps;
use optlab_core::{analyze, AnalysisError, AnalysisOptions, MarketInputs, StrategyFamily, StrikeLadder, StrikeQuote};

// ── Fixtures ─────────────────────────────────────────────────────────

fn inputs() -> MarketInputs {
    MarketInputs::new(25.5, 0.35, 30).unwrap()
}

fn five_strikes() -> StrikeLadder {
    StrikeLadder::from_quotes(vec![
        StrikeQuote::new(20.0, 5.80, 0.10),
        StrikeQuote::new(22.5, 3.50, 0.30),
        StrikeQuote::new(25.0, 1.80, 1.50),
        StrikeQuote::new(27.5, 0.60, 3.40),
        StrikeQuote::new(30.0, 0.15, 5.60),
    ])
    .unwrap()
}

fn four_strikes() -> StrikeLadder {
    StrikeLadder::from_quotes(vec![
        StrikeQuote::new(10.0, 10.2, 0.05),
        StrikeQuote::new(15.0, 5.6, 0.30),
        StrikeQuote::new(20.0, 1.9, 1.50),
        StrikeQuote::new(25.0, 0.4, 5.10),
    ])
    .unwrap()
}

/// `n` strikes spaced 1.0 apart from 10, with premiums that decay away from the money.
fn wide_ladder(n: usize) -> StrikeLadder {
    let quotes = (0..n)
        .map(|i| {
            let strike = 10.0 + i as f64;
            let call = (20.0 - strike).max(0.0) + 0.5 + 0.01 * i as f64;
            let put = (strike - 20.0).max(0.0) + 0.5 + 0.02 * i as f64;
            StrikeQuote::new(strike, call, put)
        })
        .collect();
    StrikeLadder::from_quotes(quotes).unwrap()
}

fn run(family: StrategyFamily, ladder: &StrikeLadder) -> optlab_core::AnalysisResult {
    analyze(&inputs(), ladder, family, &AnalysisOptions::default()).unwrap()
}

fn descriptions(candidates: &[optlab_core::Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.description.as_str()).collect()
}

// ── Single options ───────────────────────────────────────────────────

#[test]
fn single_call_one_candidate_per_strike() {
    let result = run(StrategyFamily::SingleCall, &five_strikes());
    assert_eq!(result.all.len(), 5);

    for (candidate, quote) in result.all.iter().zip(five_strikes().quotes()) {
        assert_eq!(candidate.max_gain, Bound::Unbounded);
        assert_eq!(candidate.max_loss, quote.call_premium);
        assert_eq!(candidate.entry_kind, EntryKind::Premium);
        assert_eq!(candidate.strikes, vec![quote.strike]);
    }

    let at_25 = &result.all[2];
    assert_eq!(at_25.description, "Long 25 Call");
    assert_eq!(at_25.max_loss, 1.80);
    assert!((at_25.outcome.stock_up - 28.191495).abs() < 1e-5);
    assert!((at_25.outcome.stock_down - 23.065467).abs() < 1e-5);
    assert!((at_25.percent_gain - 81.97).abs() < 0.01);
    assert!((at_25.percent_loss + 93.59).abs() < 0.01);
}

#[test]
fn single_call_ranked_views() {
    let result = run(StrategyFamily::SingleCall, &five_strikes());
    assert_eq!(
        descriptions(&result.by_reward),
        vec!["Long 27.5 Call", "Long 25 Call", "Long 22.5 Call", "Long 30 Call", "Long 20 Call"]
    );
    assert_eq!(
        descriptions(&result.by_ratio),
        vec!["Long 27.5 Call", "Long 20 Call", "Long 22.5 Call", "Long 25 Call", "Long 30 Call"]
    );
}

#[test]
fn single_put_reports_gain_on_up_shock() {
    let result = run(StrategyFamily::SinglePut, &five_strikes());
    assert_eq!(result.all.len(), 5);
    for c in &result.all {
        assert_eq!(c.legs[0].option_type, OptionType::Put);
        // Puts lose value on the up move, so the up-labelled gain is negative here.
        assert!(c.percent_gain < 0.0, "{}: {}", c.description, c.percent_gain);
        assert!(c.reward_risk_ratio >= 0.0);
    }
}

// ── Vertical spreads ─────────────────────────────────────────────────

#[test]
fn bull_call_spread_metrics() {
    let result = run(StrategyFamily::BullCallSpread, &five_strikes());
    assert_eq!(result.all.len(), 10);

    let first = &result.all[0];
    assert_eq!(first.description, "Buy 20 / Sell 22.5 Call");
    assert_eq!(first.entry_kind, EntryKind::NetDebit);
    assert!((first.entry_amount - 2.30).abs() < 1e-12);
    assert!((first.max_gain.finite().unwrap() - 0.20).abs() < 1e-12);
    assert!((first.max_loss - 2.30).abs() < 1e-12);
    assert!((first.reward_risk_ratio - 0.20 / 2.30).abs() < 1e-12);
    assert_eq!(first.legs[0].side, Side::Long);
    assert_eq!(first.legs[1].side, Side::Short);
}

#[test]
fn bear_put_spread_labels_gain_by_down_shock() {
    let result = run(StrategyFamily::BearPutSpread, &five_strikes());
    assert_eq!(result.all.len(), 10);

    let first = &result.all[0];
    assert_eq!(first.description, "Buy 22.5 / Sell 20 Put");
    assert_eq!(first.strikes, vec![22.5, 20.0]);
    assert!((first.entry_amount - 0.20).abs() < 1e-12);
    assert!((first.max_gain.finite().unwrap() - 2.30).abs() < 1e-12);
    let expected_gain = 100.0 * first.outcome.profit_down / first.entry_amount;
    assert!((first.percent_gain - expected_gain).abs() < 1e-9);
    assert!(first.percent_gain > first.percent_loss);
}

// ── Butterflies ──────────────────────────────────────────────────────

#[test]
fn butterflies_require_equal_wings() {
    let result = run(StrategyFamily::CallButterfly, &four_strikes());
    assert_eq!(
        descriptions(&result.all),
        vec!["10/15/20 Call Butterfly", "15/20/25 Call Butterfly"]
    );

    let fly = &result.all[0];
    assert_eq!(fly.legs.len(), 3);
    assert_eq!(fly.legs[1].quantity, 2);
    assert_eq!(fly.legs[1].side, Side::Short);
    // 10.2 - 2·5.6 + 1.9
    assert!((fly.entry_amount - 0.9).abs() < 1e-12);
    assert!((fly.max_gain.finite().unwrap() - 4.1).abs() < 1e-12);
}

#[test]
fn put_butterfly_uses_put_premiums() {
    let result = run(StrategyFamily::PutButterfly, &four_strikes());
    assert_eq!(result.all.len(), 2);
    // 0.05 - 2·0.30 + 1.50
    assert!((result.all[0].entry_amount - 0.95).abs() < 1e-12);
    assert_eq!(result.all[0].description, "10/15/20 Put Butterfly");
}

// ── Iron condor ──────────────────────────────────────────────────────

#[test]
fn iron_condor_single_quadruple_on_four_strikes() {
    let result = run(StrategyFamily::IronCondor, &four_strikes());
    assert_eq!(result.all.len(), 1);

    let condor = &result.all[0];
    assert_eq!(condor.description, "10/15/20/25 Iron Condor");
    assert_eq!(condor.entry_kind, EntryKind::NetCredit);
    let credit = (0.30 - 0.05) + (1.9 - 0.4);
    assert!((condor.entry_amount - credit).abs() < 1e-12);
    assert!((condor.max_loss - (5.0 - credit)).abs() < 1e-12);
    assert_eq!(condor.max_gain, Bound::Finite(condor.entry_amount));
    assert!((condor.percent_gain - 100.0 * credit / (5.0 - credit)).abs() < 1e-9);
    assert!((condor.reward_risk_ratio - credit / (5.0 - credit)).abs() < 1e-12);
}

#[test]
fn iron_condor_profit_is_credit_minus_liability() {
    let result = run(StrategyFamily::IronCondor, &four_strikes());
    let c = &result.all[0];
    assert!((c.outcome.profit_up - (c.outcome.value_up + c.entry_amount)).abs() < 1e-12);
    assert!((c.outcome.profit_down - (c.outcome.value_down + c.entry_amount)).abs() < 1e-12);
    // Net leg value of a short condor is a liability.
    assert!(c.outcome.value_up <= 0.0);
}

// ── Volatility structures ────────────────────────────────────────────

#[test]
fn straddle_best_over_cost() {
    let result = run(StrategyFamily::Straddle, &five_strikes());
    assert_eq!(result.all.len(), 5);
    let at_20 = &result.all[0];
    assert_eq!(at_20.description, "20 Straddle");
    assert_eq!(at_20.entry_kind, EntryKind::TotalCost);
    assert!((at_20.entry_amount - 5.90).abs() < 1e-12);
    assert!((at_20.reward_risk_ratio - 0.3953).abs() < 1e-3);
    assert_eq!(result.by_ratio[0].description, "22.5 Straddle");
}

#[test]
fn strangle_put_below_call() {
    let result = run(StrategyFamily::Strangle, &five_strikes());
    assert_eq!(result.all.len(), 10);
    let first = &result.all[0];
    assert_eq!(first.description, "20/22.5 Strangle");
    assert_eq!(first.legs[0].option_type, OptionType::Put);
    assert_eq!(first.legs[0].strike, 20.0);
    assert_eq!(first.legs[1].option_type, OptionType::Call);
    assert_eq!(first.legs[1].strike, 22.5);
    assert!((first.entry_amount - (0.10 + 3.50)).abs() < 1e-12);
}

// ── Truncation ───────────────────────────────────────────────────────

#[test]
fn iron_condor_truncated_after_full_ranking() {
    let ladder = wide_ladder(10);
    let capped = run(StrategyFamily::IronCondor, &ladder);
    let full = analyze(&inputs(), &ladder, StrategyFamily::IronCondor, &AnalysisOptions::full()).unwrap();

    assert_eq!(full.all.len(), 210);
    assert_eq!(capped.all.len(), 20);
    assert_eq!(capped.by_reward.len(), 5);
    assert_eq!(capped.by_ratio.len(), 5);

    assert_eq!(capped.all[..], full.all[..20]);
    assert_eq!(capped.by_reward[..], full.by_reward[..5]);
    assert_eq!(capped.by_ratio[..], full.by_ratio[..5]);
}

#[test]
fn strangle_and_butterfly_caps() {
    let ladder = wide_ladder(12);
    let strangle = run(StrategyFamily::Strangle, &ladder);
    assert_eq!(strangle.all.len(), 15);
    assert_eq!(strangle.by_reward.len(), 5);

    let fly = run(StrategyFamily::CallButterfly, &ladder);
    let caps = ResultCaps::for_family(StrategyFamily::CallButterfly);
    assert_eq!(Some(fly.all.len()), caps.all);
    assert_eq!(Some(fly.by_ratio.len()), caps.ranked);
}

#[test]
fn uncapped_families_keep_everything() {
    let ladder = wide_ladder(12);
    let spreads = run(StrategyFamily::BullCallSpread, &ladder);
    assert_eq!(spreads.all.len(), 66);
    assert_eq!(spreads.by_reward.len(), 66);
}

// ── Degenerate inputs ────────────────────────────────────────────────

fn zero_premium_ladder() -> StrikeLadder {
    StrikeLadder::from_quotes(vec![
        StrikeQuote::new(10.0, 0.0, 0.0),
        StrikeQuote::new(15.0, 0.0, 0.0),
        StrikeQuote::new(20.0, 0.0, 0.0),
        StrikeQuote::new(25.0, 0.0, 0.0),
    ])
    .unwrap()
}

#[test]
fn zero_entry_cost_gives_zero_ratio_for_every_family() {
    let ladder = zero_premium_ladder();
    for family in StrategyFamily::ALL {
        let result = analyze(&inputs(), &ladder, family, &AnalysisOptions::full()).unwrap();
        assert!(!result.all.is_empty(), "{family}");
        for c in &result.all {
            assert_eq!(c.entry_amount, 0.0, "{}", c.description);
            assert_eq!(c.reward_risk_ratio, 0.0, "{}", c.description);
            assert!(c.percent_gain.is_finite() && c.percent_loss.is_finite());
        }
    }
}

#[test]
fn equal_keys_keep_enumeration_order() {
    let result = run(StrategyFamily::SingleCall, &zero_premium_ladder());
    assert_eq!(descriptions(&result.by_reward), descriptions(&result.all));
    assert_eq!(descriptions(&result.by_ratio), descriptions(&result.all));
}

#[test]
fn insufficient_strikes_for_each_family() {
    let ladder = StrikeLadder::from_quotes(vec![StrikeQuote::new(25.0, 1.8, 1.5)]).unwrap();
    for family in StrategyFamily::ALL {
        let outcome = analyze(&inputs(), &ladder, family, &AnalysisOptions::default());
        if family.leg_count() <= 1 {
            assert_eq!(outcome.unwrap().all.len(), 1);
        } else {
            match outcome {
                Err(AnalysisError::InsufficientStrikes { required, available, .. }) => {
                    assert_eq!(required, family.leg_count());
                    assert_eq!(available, 1);
                }
                other => panic!("{family}: expected InsufficientStrikes, got {other:?}"),
            }
        }
    }
}

// ── Display ──────────────────────────────────────────────────────────

#[test]
fn formatted_views_mirror_result() {
    let result = run(StrategyFamily::SingleCall, &five_strikes());
    let formatted = result.formatted();
    assert_eq!(formatted.all.len(), 5);
    let at_25 = &formatted.all[2];
    assert_eq!(at_25.max_gain, "Unlimited");
    assert_eq!(at_25.max_loss, "1.80");
    assert_eq!(at_25.entry_amount, "1.80");
    assert_eq!(at_25.stock_up, "28.19");
    assert_eq!(at_25.stock_down, "23.07");
    assert_eq!(at_25.percent_gain, "82.0");
    assert_eq!(formatted.by_reward[0].description, "Long 27.5 Call");
}
