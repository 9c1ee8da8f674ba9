//! Staff selection for one (role, department, count) requirement.
//!
//! On-duty staff first, then off-duty emergency-ready staff, each in pool
//! order. No secondary ranking. A short result means the pools ran dry;
//! it is an outcome, not an error.

use crate::{
    roster::StaffRecord,
    types::{Department, Role, StaffId},
};

pub struct StaffSelector;

impl StaffSelector {
    pub fn select(
        on_duty:    &[&StaffRecord],
        off_duty:   &[&StaffRecord],
        role:       Role,
        department: Department,
        count:      usize,
    ) -> Vec<StaffId> {
        on_duty
            .iter()
            .chain(off_duty.iter())
            .filter(|r| r.matches(role, department))
            .take(count)
            .map(|r| r.staff_id.clone())
            .collect()
    }
}
