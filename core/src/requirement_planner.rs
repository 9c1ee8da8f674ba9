//! Headcount requirements per department and role for a predicted load.
//!
//! Each row is max(minimum, predicted / divisor) with integer division.
//! The schedule is fixed; its order is the reporting order.

use crate::types::{Department, PatientCount, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the fixed staffing schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffingRule {
    pub department: Department,
    pub role:       Role,
    pub minimum:    u32,
    pub divisor:    u32,
}

impl StaffingRule {
    pub fn required(&self, predicted: PatientCount) -> u32 {
        self.minimum.max(predicted / self.divisor)
    }
}

const fn rule(department: Department, role: Role, minimum: u32, divisor: u32) -> StaffingRule {
    StaffingRule { department, role, minimum, divisor }
}

/// Urban hospital staffing ratios.
pub const STAFFING_SCHEDULE: [StaffingRule; 10] = [
    rule(Department::Icu,          Role::Doctor,     1, 25),
    rule(Department::Icu,          Role::Nurse,      2, 8),
    rule(Department::Icu,          Role::Sister,     1, 15),
    rule(Department::Emergency,    Role::Doctor,     1, 30),
    rule(Department::Emergency,    Role::Nurse,      2, 10),
    rule(Department::Ward,         Role::Nurse,      2, 20),
    rule(Department::Ward,         Role::Cleaner,    1, 40),
    rule(Department::Pharmacy,     Role::Pharmacist, 1, 50),
    rule(Department::Security,     Role::Security,   2, 60),
    rule(Department::Housekeeping, Role::Cleaner,    2, 50),
];

/// department -> role -> required headcount.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RequirementTable {
    cells: BTreeMap<Department, BTreeMap<Role, u32>>,
}

impl RequirementTable {
    pub fn get(&self, department: Department, role: Role) -> Option<u32> {
        self.cells.get(&department)?.get(&role).copied()
    }

    /// (department, role, count) in schedule order.
    pub fn cells(&self) -> impl Iterator<Item = (Department, Role, u32)> + '_ {
        self.cells.iter().flat_map(|(dept, roles)| {
            roles.iter().map(move |(role, count)| (*dept, *role, *count))
        })
    }

    pub fn total(&self) -> u32 {
        self.cells().map(|(_, _, count)| count).sum()
    }
}

pub struct RequirementPlanner;

impl RequirementPlanner {
    pub fn requirements(predicted: PatientCount) -> RequirementTable {
        let mut table = RequirementTable::default();
        for rule in &STAFFING_SCHEDULE {
            table
                .cells
                .entry(rule.department)
                .or_default()
                .insert(rule.role, rule.required(predicted));
        }
        table
    }
}
