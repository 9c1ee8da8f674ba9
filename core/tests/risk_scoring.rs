//! Risk scorer: weights, flat bonuses, clamping, monotonicity.

use staffing_core::{
    risk_scorer::{RiskScorer, MAX_RISK_SCORE},
    snapshot::{Occupancy, SeverityMix, SituationSnapshot, StaffPressure, TimeContext},
    types::{ExternalRisk, RiskLevel, Shift},
};

fn reference_snapshot() -> SituationSnapshot {
    SituationSnapshot {
        severity_mix: SeverityMix { critical: 20.0, moderate: 50.0, stable: 30.0 },
        occupancy: Occupancy { icu: 70.0, er: 65.0 },
        staff_pressure: StaffPressure { fatigued_pct: 25.0, transport_issue: false },
        time_context: TimeContext { shift: Shift::Morning, special_day: "Normal Day".into() },
        external_risk: ExternalRisk::None,
        ..Default::default()
    }
}

#[test]
fn reference_situation_scores_59_medium() {
    let assessment = RiskScorer::assess(&reference_snapshot());
    assert_eq!(assessment.risk_score, 59);
    assert_eq!(assessment.risk_level, RiskLevel::Medium);
    assert!(!assessment.explanation.is_empty());
}

#[test]
fn empty_snapshot_scores_zero() {
    let assessment = RiskScorer::assess(&SituationSnapshot::default());
    assert_eq!(assessment.risk_score, 0);
    assert_eq!(assessment.risk_level, RiskLevel::Low);
}

#[test]
fn flat_bonuses_apply() {
    let mut snap = SituationSnapshot::default();
    snap.time_context.shift = Shift::Night;
    assert_eq!(RiskScorer::score(&snap), 10);

    snap.time_context.special_day = "Festival".into();
    assert_eq!(RiskScorer::score(&snap), 20);

    snap.staff_pressure.transport_issue = true;
    assert_eq!(RiskScorer::score(&snap), 30);
}

#[test]
fn external_risk_bonuses() {
    let cases = [
        (ExternalRisk::None, 0),
        (ExternalRisk::WeatherAlert, 10),
        (ExternalRisk::AccidentNearby, 15),
        (ExternalRisk::DiseaseOutbreak, 25),
    ];
    for (risk, expected) in cases {
        let snap = SituationSnapshot { external_risk: risk, ..Default::default() };
        assert_eq!(RiskScorer::score(&snap), expected, "bonus for {risk:?}");
    }
}

#[test]
fn score_is_capped_at_100() {
    let mut snap = reference_snapshot();
    snap.severity_mix.critical = 100.0;
    snap.severity_mix.moderate = 100.0;
    snap.occupancy = Occupancy { icu: 100.0, er: 100.0 };
    snap.staff_pressure = StaffPressure { fatigued_pct: 100.0, transport_issue: true };
    snap.time_context = TimeContext { shift: Shift::Night, special_day: "Holiday".into() };
    snap.external_risk = ExternalRisk::DiseaseOutbreak;

    let assessment = RiskScorer::assess(&snap);
    assert_eq!(assessment.risk_score, MAX_RISK_SCORE);
    assert_eq!(assessment.risk_level, RiskLevel::High);
}

#[test]
fn negative_inputs_floor_at_zero() {
    let snap = SituationSnapshot {
        severity_mix: SeverityMix { critical: -80.0, moderate: 0.0, stable: 0.0 },
        ..Default::default()
    };
    assert_eq!(RiskScorer::score(&snap), 0);
}

fn set_critical(s: &mut SituationSnapshot, v: f64) { s.severity_mix.critical = v; }
fn set_moderate(s: &mut SituationSnapshot, v: f64) { s.severity_mix.moderate = v; }
fn set_icu(s: &mut SituationSnapshot, v: f64) { s.occupancy.icu = v; }
fn set_er(s: &mut SituationSnapshot, v: f64) { s.occupancy.er = v; }
fn set_fatigued(s: &mut SituationSnapshot, v: f64) { s.staff_pressure.fatigued_pct = v; }

#[test]
fn score_is_monotonic_in_each_weighted_input() {
    let setters: [(&str, fn(&mut SituationSnapshot, f64)); 5] = [
        ("critical", set_critical),
        ("moderate", set_moderate),
        ("icu", set_icu),
        ("er", set_er),
        ("fatigued", set_fatigued),
    ];

    for (name, set) in setters {
        let mut prev = 0;
        for step in 0..=20u32 {
            let mut snap = reference_snapshot();
            set(&mut snap, f64::from(step) * 5.0);
            let score = RiskScorer::score(&snap);
            assert!(score <= MAX_RISK_SCORE);
            assert!(
                score >= prev,
                "{name}={} decreased score {prev} -> {score}",
                step * 5
            );
            prev = score;
        }
    }
}

#[test]
fn scoring_is_repeatable() {
    let snap = reference_snapshot();
    assert_eq!(RiskScorer::assess(&snap), RiskScorer::assess(&snap));
}
