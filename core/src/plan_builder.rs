//! Builds the full department -> role -> [staff_id] plan.

use crate::{
    classifier::StaffPools,
    requirement_planner::RequirementTable,
    selector::StaffSelector,
    types::{Department, Role, StaffId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// department -> role -> selected staff IDs, in selection order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StaffingPlan {
    cells: BTreeMap<Department, BTreeMap<Role, Vec<StaffId>>>,
}

impl StaffingPlan {
    pub fn insert(&mut self, department: Department, role: Role, staff_ids: Vec<StaffId>) {
        self.cells.entry(department).or_default().insert(role, staff_ids);
    }

    pub fn get(&self, department: Department, role: Role) -> Option<&[StaffId]> {
        self.cells
            .get(&department)?
            .get(&role)
            .map(Vec::as_slice)
    }

    /// (department, role, staff_ids) in plan order.
    pub fn cells(&self) -> impl Iterator<Item = (Department, Role, &[StaffId])> + '_ {
        self.cells.iter().flat_map(|(dept, roles)| {
            roles.iter().map(move |(role, ids)| (*dept, *role, ids.as_slice()))
        })
    }

    /// Every selected ID across all cells, in plan order.
    pub fn all_staff_ids(&self) -> Vec<StaffId> {
        self.cells()
            .flat_map(|(_, _, ids)| ids.iter().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A requirement the pools could not fully cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub department: Department,
    pub role:       Role,
    pub required:   u32,
    pub selected:   u32,
}

pub struct StaffingPlanBuilder;

impl StaffingPlanBuilder {
    pub fn build(requirements: &RequirementTable, pools: &StaffPools<'_>) -> StaffingPlan {
        let mut plan = StaffingPlan::default();

        for (department, role, count) in requirements.cells() {
            let selected = StaffSelector::select(
                &pools.on_duty,
                &pools.off_duty_ready,
                role,
                department,
                count as usize,
            );
            log::debug!("{department}/{role}: required={count} selected={}", selected.len());
            plan.insert(department, role, selected);
        }

        plan
    }

    /// Cells whose selection came up short of the requirement.
    pub fn shortfalls(requirements: &RequirementTable, plan: &StaffingPlan) -> Vec<Shortfall> {
        requirements
            .cells()
            .filter_map(|(department, role, required)| {
                let selected = plan.get(department, role).map_or(0, |ids| ids.len() as u32);
                (selected < required).then_some(Shortfall { department, role, required, selected })
            })
            .collect()
    }
}
