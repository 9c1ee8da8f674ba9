//! Roster classification into on-duty, off-duty-ready, and blocked pools.

use staffing_core::{
    classifier::StaffClassifier,
    roster::{Roster, StaffRecord},
    types::{BurnoutRisk, Department, Role},
};

fn staff(id: &str, on_duty: bool, on_leave: bool, burnout: BurnoutRisk, eligible: bool) -> StaffRecord {
    StaffRecord {
        staff_id: id.into(),
        role: Role::Nurse,
        department: Department::Ward,
        on_duty,
        on_leave,
        burnout_risk: burnout,
        emergency_eligible: eligible,
        last_shift_hours: 0.0,
    }
}

fn ids(pool: &[&StaffRecord]) -> Vec<String> {
    pool.iter().map(|r| r.staff_id.clone()).collect()
}

/// Every combination of the four flags that drive classification.
fn exhaustive_roster() -> Roster {
    let mut records = Vec::new();
    let mut n = 0;
    for on_duty in [true, false] {
        for on_leave in [true, false] {
            for burnout in [BurnoutRisk::Low, BurnoutRisk::Moderate, BurnoutRisk::High] {
                for eligible in [true, false] {
                    records.push(staff(&format!("s-{n:02}"), on_duty, on_leave, burnout, eligible));
                    n += 1;
                }
            }
        }
    }
    Roster::from_records(records).unwrap()
}

#[test]
fn pools_follow_flag_rules() {
    let roster = Roster::from_records(vec![
        staff("on", true, false, BurnoutRisk::Low, false),
        staff("ready", false, false, BurnoutRisk::Moderate, true),
        staff("not-eligible", false, false, BurnoutRisk::Low, false),
        staff("leave", false, true, BurnoutRisk::Low, true),
        staff("burnt", false, false, BurnoutRisk::High, true),
    ])
    .unwrap();

    let pools = StaffClassifier::classify(&roster);
    assert_eq!(ids(&pools.on_duty), vec!["on"]);
    assert_eq!(ids(&pools.off_duty_ready), vec!["ready"]);
    assert_eq!(ids(&pools.blocked), vec!["leave", "burnt"]);
}

#[test]
fn on_duty_and_off_duty_ready_are_disjoint() {
    let roster = exhaustive_roster();
    let pools = StaffClassifier::classify(&roster);

    for record in &pools.on_duty {
        assert!(
            !pools.off_duty_ready.iter().any(|r| r.staff_id == record.staff_id),
            "{} is in both on_duty and off_duty_ready",
            record.staff_id
        );
    }
}

#[test]
fn leave_or_high_burnout_is_always_blocked() {
    let roster = exhaustive_roster();
    let pools = StaffClassifier::classify(&roster);
    let blocked = ids(&pools.blocked);

    for record in roster.iter() {
        let should_block = record.on_leave || record.burnout_risk == BurnoutRisk::High;
        assert_eq!(
            blocked.contains(&record.staff_id),
            should_block,
            "blocked membership wrong for {record:?}"
        );
    }
}

#[test]
fn on_duty_high_burnout_counts_in_both_on_duty_and_blocked() {
    let roster = Roster::from_records(vec![staff("tired", true, false, BurnoutRisk::High, true)]).unwrap();
    let pools = StaffClassifier::classify(&roster);

    assert_eq!(ids(&pools.on_duty), vec!["tired"]);
    assert_eq!(ids(&pools.blocked), vec!["tired"]);
    assert!(pools.off_duty_ready.is_empty());

    let summary = pools.summary();
    assert_eq!(summary.on_duty_count, 1);
    assert_eq!(summary.blocked_staff_count, 1);
}

#[test]
fn pools_preserve_roster_order() {
    let roster = Roster::from_records(vec![
        staff("c", false, false, BurnoutRisk::Low, true),
        staff("a", false, false, BurnoutRisk::Low, true),
        staff("b", false, false, BurnoutRisk::Low, true),
    ])
    .unwrap();
    let pools = StaffClassifier::classify(&roster);
    assert_eq!(ids(&pools.off_duty_ready), vec!["c", "a", "b"]);
}

#[test]
fn duplicate_staff_ids_are_rejected() {
    let result = Roster::from_records(vec![
        staff("dup", true, false, BurnoutRisk::Low, true),
        staff("dup", false, false, BurnoutRisk::Low, true),
    ]);
    assert!(result.is_err(), "duplicate staff_id should be rejected");
}
