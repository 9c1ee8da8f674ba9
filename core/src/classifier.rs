//! Roster classification into selection pools.
//!
//!   on_duty         on_duty && !on_leave
//!   off_duty_ready  !on_duty && !on_leave && burnout != HIGH && emergency_eligible
//!   blocked         on_leave || burnout == HIGH
//!
//! `blocked` is evaluated independently of the other two. An on-duty record
//! with HIGH burnout is counted in both `on_duty` and `blocked`, and stays
//! selectable from the on-duty pool.

use crate::{
    roster::{Roster, StaffRecord},
    types::BurnoutRisk,
};
use serde::{Deserialize, Serialize};

/// Borrowed views over the roster, each in roster order.
#[derive(Debug, Clone, Default)]
pub struct StaffPools<'a> {
    pub on_duty:        Vec<&'a StaffRecord>,
    pub off_duty_ready: Vec<&'a StaffRecord>,
    pub blocked:        Vec<&'a StaffRecord>,
}

/// Pool sizes as reported in a decision record.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffStatusSummary {
    pub on_duty_count:        usize,
    pub off_duty_ready_count: usize,
    pub blocked_staff_count:  usize,
}

impl StaffPools<'_> {
    pub fn summary(&self) -> StaffStatusSummary {
        StaffStatusSummary {
            on_duty_count:        self.on_duty.len(),
            off_duty_ready_count: self.off_duty_ready.len(),
            blocked_staff_count:  self.blocked.len(),
        }
    }
}

pub struct StaffClassifier;

impl StaffClassifier {
    pub fn classify(roster: &Roster) -> StaffPools<'_> {
        let mut pools = StaffPools::default();

        for record in roster {
            if is_on_duty(record) {
                pools.on_duty.push(record);
            }
            if is_off_duty_ready(record) {
                pools.off_duty_ready.push(record);
            }
            if is_blocked(record) {
                pools.blocked.push(record);
            }
        }

        log::debug!(
            "classified {} staff: on_duty={} off_duty_ready={} blocked={}",
            roster.len(),
            pools.on_duty.len(),
            pools.off_duty_ready.len(),
            pools.blocked.len(),
        );
        pools
    }
}

pub fn is_on_duty(record: &StaffRecord) -> bool {
    record.on_duty && !record.on_leave
}

pub fn is_off_duty_ready(record: &StaffRecord) -> bool {
    !record.on_duty
        && !record.on_leave
        && record.burnout_risk != BurnoutRisk::High
        && record.emergency_eligible
}

pub fn is_blocked(record: &StaffRecord) -> bool {
    record.on_leave || record.burnout_risk == BurnoutRisk::High
}
