//! Operational risk score in [0, 100] from a situation snapshot.
//!
//! Weighted sum, truncated to an integer and capped at 100:
//!   severity    critical x0.4, moderate x0.2
//!   occupancy   icu x0.3, er x0.2
//!   staff       fatigued x0.3, +10 on transport issue
//!   time        +10 night shift, +10 special day
//!   external    weather +10, accident +15, outbreak +25
//!
//! Pure function of the snapshot. No state, no side effects.

use crate::{
    snapshot::SituationSnapshot,
    types::{ExternalRisk, RiskLevel, Shift},
};
use serde::{Deserialize, Serialize};

pub const MAX_RISK_SCORE: u32 = 100;

pub const RISK_EXPLANATION: &str = "Risk is computed using patient severity, department occupancy, \
     staff fatigue, time context, and external signals.";

const CRITICAL_WEIGHT: f64 = 0.4;
const MODERATE_WEIGHT: f64 = 0.2;
const ICU_OCCUPANCY_WEIGHT: f64 = 0.3;
const ER_OCCUPANCY_WEIGHT: f64 = 0.2;
const FATIGUE_WEIGHT: f64 = 0.3;
const TRANSPORT_ISSUE_BONUS: f64 = 10.0;
const NIGHT_SHIFT_BONUS: f64 = 10.0;
const SPECIAL_DAY_BONUS: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub risk_score:  u32,
    pub risk_level:  RiskLevel,
    pub explanation: String,
}

pub struct RiskScorer;

impl RiskScorer {
    pub fn score(snapshot: &SituationSnapshot) -> u32 {
        let mut score = 0.0f64;

        let severity = &snapshot.severity_mix;
        score += severity.critical * CRITICAL_WEIGHT;
        score += severity.moderate * MODERATE_WEIGHT;

        let occupancy = &snapshot.occupancy;
        score += occupancy.icu * ICU_OCCUPANCY_WEIGHT;
        score += occupancy.er * ER_OCCUPANCY_WEIGHT;

        let pressure = &snapshot.staff_pressure;
        score += pressure.fatigued_pct * FATIGUE_WEIGHT;
        if pressure.transport_issue {
            score += TRANSPORT_ISSUE_BONUS;
        }

        let time = &snapshot.time_context;
        if time.shift == Shift::Night {
            score += NIGHT_SHIFT_BONUS;
        }
        if time.is_special_day() {
            score += SPECIAL_DAY_BONUS;
        }

        score += external_risk_bonus(snapshot.external_risk);

        // `as` saturates: NaN and negatives land on 0.
        (score as u32).min(MAX_RISK_SCORE)
    }

    pub fn assess(snapshot: &SituationSnapshot) -> RiskAssessment {
        let risk_score = Self::score(snapshot);
        RiskAssessment {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            explanation: RISK_EXPLANATION.to_string(),
        }
    }
}

fn external_risk_bonus(risk: ExternalRisk) -> f64 {
    match risk {
        ExternalRisk::None            => 0.0,
        ExternalRisk::WeatherAlert    => 10.0,
        ExternalRisk::AccidentNearby  => 15.0,
        ExternalRisk::DiseaseOutbreak => 25.0,
    }
}
