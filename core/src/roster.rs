//! Staff roster: the ordered, uniquely keyed collection of staff records.
//!
//! Roster order is selection priority within a (role, department) group,
//! so it is preserved on every load, save, and mutation.

use crate::{
    error::{StaffingError, StaffingResult},
    types::{BurnoutRisk, Department, Role, StaffId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffRecord {
    pub staff_id:   StaffId,
    pub role:       Role,
    pub department: Department,
    #[serde(with = "crate::types::flag")]
    pub on_duty:    bool,
    #[serde(with = "crate::types::flag")]
    pub on_leave:   bool,
    pub burnout_risk: BurnoutRisk,
    #[serde(with = "crate::types::flag")]
    pub emergency_eligible: bool,
    #[serde(default)]
    pub last_shift_hours: f64,
}

impl StaffRecord {
    pub fn matches(&self, role: Role, department: Department) -> bool {
        self.role == role && self.department == department
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    records: Vec<StaffRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, rejecting duplicate staff IDs.
    pub fn from_records(records: Vec<StaffRecord>) -> StaffingResult<Self> {
        let mut roster = Self::new();
        for record in records {
            roster.push(record)?;
        }
        Ok(roster)
    }

    /// Load a JSON array of staff records exported by the roster system.
    pub fn from_json_file(path: &str) -> StaffingResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let records: Vec<StaffRecord> = serde_json::from_str(&content)?;
        Self::from_records(records)
    }

    pub fn push(&mut self, record: StaffRecord) -> StaffingResult<()> {
        if self.get(&record.staff_id).is_some() {
            return Err(StaffingError::DuplicateStaffId {
                staff_id: record.staff_id,
            });
        }
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, staff_id: &str) -> Option<&StaffRecord> {
        self.records.iter().find(|r| r.staff_id == staff_id)
    }

    pub fn records(&self) -> &[StaffRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaffRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Headcount of a role across all departments.
    pub fn count_role(&self, role: Role) -> usize {
        self.records.iter().filter(|r| r.role == role).count()
    }

    /// Mark every listed staff member on duty.
    /// Unknown IDs are ignored. Returns how many flags actually flipped.
    pub fn mark_on_duty(&mut self, staff_ids: &[StaffId]) -> usize {
        let wanted: HashSet<&str> = staff_ids.iter().map(String::as_str).collect();
        let mut flipped = 0;
        for record in self.records.iter_mut() {
            if wanted.contains(record.staff_id.as_str()) && !record.on_duty {
                record.on_duty = true;
                flipped += 1;
            }
        }
        flipped
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a StaffRecord;
    type IntoIter = std::slice::Iter<'a, StaffRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
