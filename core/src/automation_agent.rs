//! Automation agent: situation mode, approval gating, alerts, shift updates.
//!
//! EXECUTION ORDER (per call):
//!   1. Alerts      only in EMERGENCY with alerting enabled; one pass over
//!                  the plan, approval-gated roles get a log note instead.
//!   2. Shift update  when enabled, in every mode; every planned ID,
//!                  approval-gated ones included, is marked on duty.
//!
//! The approval gate suppresses the alert only. It never blocks or queues
//! the duty assignment; "human approval required" is advisory text.

use crate::{
    alerts::{bulk_alert, AlertSink},
    config::AutomationConfig,
    plan_builder::StaffingPlan,
    roster::Roster,
    types::{DecisionMode, PatientCount},
};
use serde::{Deserialize, Serialize};

/// Actions the agent recommends for a situation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentAction {
    ActivateEmergencyProtocol,
    DeployStaff,
}

pub struct AutomationAgent {
    config: AutomationConfig,
    alerts: Box<dyn AlertSink>,
}

impl AutomationAgent {
    pub fn new(config: AutomationConfig, alerts: Box<dyn AlertSink>) -> Self {
        Self { config, alerts }
    }

    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }

    /// EMERGENCY at or above the threshold, NORMAL below it.
    pub fn assess_situation(&self, predicted: PatientCount) -> DecisionMode {
        if predicted >= self.config.emergency_threshold {
            DecisionMode::Emergency
        } else {
            DecisionMode::Normal
        }
    }

    pub fn decide_actions(&self, mode: DecisionMode, plan: &StaffingPlan) -> Vec<AgentAction> {
        let mut actions = Vec::new();
        if mode == DecisionMode::Emergency {
            actions.push(AgentAction::ActivateEmergencyProtocol);
        }
        if !plan.is_empty() {
            actions.push(AgentAction::DeployStaff);
        }
        actions
    }

    /// Run alerts and shift updates for `plan`, mutating `roster` in place.
    /// Returns the human-readable action log.
    pub fn execute(
        &mut self,
        mode:   DecisionMode,
        plan:   &StaffingPlan,
        roster: &mut Roster,
    ) -> Vec<String> {
        let mut logs = Vec::new();

        if mode == DecisionMode::Emergency && self.config.auto_alert_enabled {
            for (department, role, staff_ids) in plan.cells() {
                if self.config.requires_approval(role) {
                    log::warn!("{department}/{role}: alert held for human approval");
                    logs.push(format!("Human approval required for role: {role}"));
                    continue;
                }

                let message = format!("Emergency duty assigned in {department}");
                let delivered = bulk_alert(self.alerts.as_mut(), staff_ids, &message);
                if delivered < staff_ids.len() {
                    log::warn!(
                        "{department}/{role}: {} of {} alerts failed",
                        staff_ids.len() - delivered,
                        staff_ids.len()
                    );
                }
                logs.push(format!("Auto-alert sent to {} {role}s", staff_ids.len()));
            }
        }

        if self.config.auto_shift_update_enabled {
            let all_staff = plan.all_staff_ids();
            let flipped = roster.mark_on_duty(&all_staff);
            log::info!(
                "shift update: {} planned staff, {flipped} newly on duty",
                all_staff.len()
            );
            logs.push("Shift schedule auto-updated".to_string());
        }

        logs
    }
}
