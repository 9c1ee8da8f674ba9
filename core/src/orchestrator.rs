//! The decision orchestrator: one request in, one DecisionRecord out.
//!
//! EXECUTION ORDER (fixed):
//!   1. Validate the five demand features
//!   2. Risk assessment
//!   3. Demand prediction        (opaque collaborator; failure is fatal)
//!   4. Classify roster          (pool sizes captured before any mutation)
//!   5. Requirement table
//!   6. Staffing plan
//!   7. Automation               (alerts, shift updates; mutates the roster)
//!
//! Nothing is returned before validation passes. After that only the
//! predictor can fail. The caller must hold exclusive access to the roster
//! for the whole call: pools are read in step 4 and flags written in step 7.

use crate::{
    alerts::AlertSink,
    automation_agent::{AgentAction, AutomationAgent},
    classifier::{StaffClassifier, StaffStatusSummary},
    config::StaffingConfig,
    error::{StaffingError, StaffingResult},
    plan_builder::{StaffingPlan, StaffingPlanBuilder},
    predictor::DemandPredictor,
    requirement_planner::RequirementPlanner,
    risk_scorer::{RiskAssessment, RiskScorer},
    roster::Roster,
    snapshot::{DemandFeatures, SituationSnapshot},
    types::{DecisionMode, PatientCount},
};
use serde::{Deserialize, Serialize};

pub const AUTOMATION_LEVEL: &str = "Semi-Autonomous (Human-in-the-loop)";

const WHY_FAST_DECISION: &str = "AI already knows staff-to-patient ratios and real-time \
     availability, so it performs direct selection instead of manual reasoning.";

const SAFETY_MEASURES: [&str; 3] = [
    "Burnout filtering",
    "Leave status check",
    "Human approval for critical roles",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionRecord {
    pub risk_assessment:      RiskAssessment,
    pub patient_prediction:   PatientPrediction,
    pub staffing_plan:        StaffingPlan,
    pub staff_status_summary: StaffStatusSummary,
    pub ai_automation:        AutomationReport,
    pub explainability:       Explainability,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientPrediction {
    pub predicted_total_patients: PatientCount,
    pub decision_mode:            DecisionMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutomationReport {
    pub automation_level:    String,
    pub recommended_actions: Vec<AgentAction>,
    pub actions_taken:       Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Explainability {
    pub why_fast_decision: String,
    pub safety_measures:   Vec<String>,
}

impl Default for Explainability {
    fn default() -> Self {
        Self {
            why_fast_decision: WHY_FAST_DECISION.to_string(),
            safety_measures:   SAFETY_MEASURES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Result of a monitoring sweep that found an emergency.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub predicted_total_patients: PatientCount,
    pub staffing_plan:            StaffingPlan,
    pub actions_taken:            Vec<String>,
}

pub struct DecisionOrchestrator {
    agent:     AutomationAgent,
    predictor: Box<dyn DemandPredictor>,
}

impl DecisionOrchestrator {
    pub fn new(
        config:    &StaffingConfig,
        predictor: Box<dyn DemandPredictor>,
        alerts:    Box<dyn AlertSink>,
    ) -> Self {
        Self {
            agent: AutomationAgent::new(config.automation.clone(), alerts),
            predictor,
        }
    }

    pub fn agent(&self) -> &AutomationAgent {
        &self.agent
    }

    /// Parse a loosely-typed request body, then decide.
    pub fn decide_value(
        &mut self,
        payload: &serde_json::Value,
        roster:  &mut Roster,
    ) -> StaffingResult<DecisionRecord> {
        let snapshot = SituationSnapshot::from_value(payload)?;
        self.decide(&snapshot, roster)
    }

    pub fn decide(
        &mut self,
        snapshot: &SituationSnapshot,
        roster:   &mut Roster,
    ) -> StaffingResult<DecisionRecord> {
        let features = snapshot.demand_features()?;

        let risk_assessment = RiskScorer::assess(snapshot);
        let predicted = self.predict(&features)?;

        let (staffing_plan, summary) = plan_for(predicted, roster);

        let mode = self.agent.assess_situation(predicted);
        log::info!(
            "decision: predicted={predicted} mode={mode} risk={} ({:?})",
            risk_assessment.risk_score,
            risk_assessment.risk_level,
        );

        let recommended_actions = self.agent.decide_actions(mode, &staffing_plan);
        let actions_taken = self.agent.execute(mode, &staffing_plan, roster);

        Ok(DecisionRecord {
            risk_assessment,
            patient_prediction: PatientPrediction {
                predicted_total_patients: predicted,
                decision_mode: mode,
            },
            staffing_plan,
            staff_status_summary: summary,
            ai_automation: AutomationReport {
                automation_level: AUTOMATION_LEVEL.to_string(),
                recommended_actions,
                actions_taken,
            },
            explainability: Explainability::default(),
        })
    }

    /// One pass of the monitoring loop: predict, and only in EMERGENCY
    /// build a plan and run automation. Returns None in NORMAL mode.
    pub fn sweep(
        &mut self,
        features: &DemandFeatures,
        roster:   &mut Roster,
    ) -> StaffingResult<Option<SweepOutcome>> {
        let predicted = self.predict(features)?;
        let mode = self.agent.assess_situation(predicted);
        if mode != DecisionMode::Emergency {
            log::debug!("sweep: predicted={predicted}, no emergency");
            return Ok(None);
        }

        let (staffing_plan, _) = plan_for(predicted, roster);
        let actions_taken = self.agent.execute(mode, &staffing_plan, roster);
        for line in &actions_taken {
            log::info!("sweep: {line}");
        }

        Ok(Some(SweepOutcome {
            predicted_total_patients: predicted,
            staffing_plan,
            actions_taken,
        }))
    }

    fn predict(&self, features: &DemandFeatures) -> StaffingResult<PatientCount> {
        self.predictor
            .predict(features)
            .map_err(StaffingError::Predictor)
    }
}

/// Classify, size, and select against the current roster.
fn plan_for(
    predicted: PatientCount,
    roster:    &Roster,
) -> (StaffingPlan, StaffStatusSummary) {
    let requirements = RequirementPlanner::requirements(predicted);
    let pools = StaffClassifier::classify(roster);
    let plan = StaffingPlanBuilder::build(&requirements, &pools);

    for gap in StaffingPlanBuilder::shortfalls(&requirements, &plan) {
        log::warn!(
            "{}/{}: selected {} of {} required",
            gap.department, gap.role, gap.selected, gap.required
        );
    }

    (plan, pools.summary())
}
