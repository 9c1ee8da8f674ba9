use crate::types::{PatientCount, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_EMERGENCY_THRESHOLD: PatientCount = 700;

// ── Automation config ─────────────────────────────────────────────

/// Thresholds and toggles for the automation agent.
/// Built once and passed in at construction; never mutated mid-run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutomationConfig {
    /// Predicted patient count at or above which the mode is EMERGENCY.
    pub emergency_threshold: PatientCount,
    /// Send emergency alerts to selected staff.
    pub auto_alert_enabled: bool,
    /// Flip selected staff to on-duty after every decision.
    pub auto_shift_update_enabled: bool,
    /// Roles whose alerts are replaced by a "human approval required" note.
    pub approval_required_roles: BTreeSet<Role>,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            emergency_threshold: DEFAULT_EMERGENCY_THRESHOLD,
            auto_alert_enabled: true,
            auto_shift_update_enabled: true,
            approval_required_roles: [Role::Doctor, Role::Radiologist].into_iter().collect(),
        }
    }
}

impl AutomationConfig {
    pub fn requires_approval(&self, role: Role) -> bool {
        self.approval_required_roles.contains(&role)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AutomationConfigFile {
    automation: AutomationConfig,
}

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffingConfig {
    pub automation: AutomationConfig,
}

impl StaffingConfig {
    /// Load from the data/ directory.
    /// In tests, use StaffingConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/automation/automation_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: AutomationConfigFile = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;

        Ok(Self {
            automation: file.automation,
        })
    }
}
