//! Unit tests for the risk decision table

use pause::models::context::{MacroContext, MacroSnapshot};
use pause::models::decision::{Decision, Verdict};
use pause::models::indicators::IndicatorSnapshot;
use pause::models::market::RiskProfile;
use pause::models::risk::{Comparison, GateIndicator, RiskRule};
use pause::signals::risk_gate::RiskGate;

fn decision(verdict: Verdict) -> Decision {
    Decision {
        verdict,
        stop_loss: 95.0,
        target: 110.0,
        reasoning: vec!["Setup looks clean.".to_string()],
        sections: Vec::new(),
    }
}

fn snapshot_with_rsi(rsi: f64) -> IndicatorSnapshot {
    let mut snapshot = IndicatorSnapshot::neutral(100.0);
    snapshot.rsi14 = rsi;
    snapshot
}

fn macro_with_vix(vix: f64) -> MacroContext {
    MacroContext::Available(MacroSnapshot {
        index_price: 500.0,
        index_change_pct_over_window: 1.0,
        volatility_index: vix,
        treasury_yield: Some(4.3),
    })
}

#[test]
fn test_default_table_thresholds_per_profile() {
    let gate = RiskGate::default();
    let cases = [
        (RiskProfile::Conservative, 61.0, Verdict::Wait),
        (RiskProfile::Conservative, 60.0, Verdict::Go),
        (RiskProfile::Moderate, 65.0, Verdict::Go),
        (RiskProfile::Moderate, 71.0, Verdict::Wait),
        (RiskProfile::Aggressive, 74.0, Verdict::Go),
        (RiskProfile::Aggressive, 76.0, Verdict::Wait),
    ];

    for (profile, rsi, expected) in cases {
        let (out, _) = gate.apply(
            decision(Verdict::Go),
            profile,
            &snapshot_with_rsi(rsi),
            &MacroContext::Unavailable,
        );
        assert_eq!(out.verdict, expected, "{} at RSI {}", profile, rsi);
    }
}

#[test]
fn test_override_is_recorded() {
    let (out, record) = RiskGate::default().apply(
        decision(Verdict::Go),
        RiskProfile::Conservative,
        &snapshot_with_rsi(72.5),
        &MacroContext::Unavailable,
    );
    let record = record.expect("override recorded");
    assert_eq!(out.verdict, Verdict::Wait);
    assert_eq!(record.original, Verdict::Go);
    assert_eq!(record.forced, Verdict::Wait);
    assert_eq!(record.observed, 72.5);
    assert_eq!(record.rule, "Conservative profile: RSI > 60");
    // only the verdict changes
    assert_eq!(out.stop_loss, 95.0);
    assert_eq!(out.reasoning, vec!["Setup looks clean."]);
}

#[test]
fn test_vix_rule_skipped_without_macro_data() {
    let gate = RiskGate::default();
    let calm = snapshot_with_rsi(40.0);

    let (out, record) = gate.apply(
        decision(Verdict::Go),
        RiskProfile::Conservative,
        &calm,
        &MacroContext::Unavailable,
    );
    assert_eq!(out.verdict, Verdict::Go);
    assert!(record.is_none());

    let (out, record) = gate.apply(
        decision(Verdict::Go),
        RiskProfile::Conservative,
        &calm,
        &macro_with_vix(35.0),
    );
    assert_eq!(out.verdict, Verdict::Wait);
    assert_eq!(record.map(|r| r.observed), Some(35.0));
}

#[test]
fn test_gate_never_upgrades() {
    let gate = RiskGate::new(vec![RiskRule::new(
        RiskProfile::Aggressive,
        GateIndicator::RSI,
        Comparison::Below,
        30.0,
        Verdict::Go,
    )]);

    for verdict in [Verdict::Wait, Verdict::Stop] {
        let (out, record) = gate.apply(
            decision(verdict),
            RiskProfile::Aggressive,
            &snapshot_with_rsi(20.0),
            &MacroContext::Unavailable,
        );
        assert_eq!(out.verdict, verdict);
        assert!(record.is_none());
    }
}

#[test]
fn test_most_cautious_rule_wins() {
    let gate = RiskGate::new(vec![
        RiskRule::new(RiskProfile::Moderate, GateIndicator::RSI, Comparison::Above, 60.0, Verdict::Wait),
        RiskRule::new(RiskProfile::Moderate, GateIndicator::StochK, Comparison::Above, 90.0, Verdict::Stop),
    ]);
    let mut snapshot = snapshot_with_rsi(80.0);
    snapshot.stoch_k14 = 95.0;

    let (out, record) = gate.apply(
        decision(Verdict::Go),
        RiskProfile::Moderate,
        &snapshot,
        &MacroContext::Unavailable,
    );
    assert_eq!(out.verdict, Verdict::Stop);
    assert_eq!(record.map(|r| r.forced), Some(Verdict::Stop));
}

#[test]
fn test_table_from_json() {
    let json = r#"[
        {"profile": "Moderate", "indicator": "VolumeRatio", "comparison": "Above", "threshold": 300.0, "verdict": "WAIT"}
    ]"#;
    let gate = RiskGate::from_json(json).unwrap();
    assert_eq!(gate.rules().len(), 1);

    let mut snapshot = snapshot_with_rsi(50.0);
    snapshot.volume_ratio_pct = 450.0;
    let (out, _) = gate.apply(decision(Verdict::Go), RiskProfile::Moderate, &snapshot, &MacroContext::Unavailable);
    assert_eq!(out.verdict, Verdict::Wait);

    assert!(RiskGate::from_json(r#"[{"profile": "Reckless"}]"#).is_err());
}
