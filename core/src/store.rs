//! SQLite persistence for the roster, daily load snapshots, and decisions.
//!
//! RULE: Only store.rs talks to the database.
//! The engine itself works on in-memory rosters; the store loads one
//! before a call and writes it back after.

use crate::{
    error::StaffingResult,
    orchestrator::DecisionRecord,
    roster::{Roster, StaffRecord},
    snapshot::DemandFeatures,
    types::Role,
};
use chrono::NaiveDate;
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// One row per calendar day: roster headcounts and patient load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailySnapshot {
    pub snapshot_date:      NaiveDate,
    pub doctors:            u32,
    pub nurses:             u32,
    pub sisters:            u32,
    pub patients_opd:       u32,
    pub patients_emergency: u32,
    pub patients_icu:       u32,
}

impl DailySnapshot {
    pub fn capture(date: NaiveDate, features: &DemandFeatures, roster: &Roster) -> Self {
        Self {
            snapshot_date:      date,
            doctors:            roster.count_role(Role::Doctor) as u32,
            nurses:             roster.count_role(Role::Nurse) as u32,
            sisters:            roster.count_role(Role::Sister) as u32,
            patients_opd:       features.opd_patients,
            patients_emergency: features.emergency_patients,
            patients_icu:       features.icu_patients,
        }
    }
}

pub struct RosterStore {
    conn: Connection,
}

impl RosterStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> StaffingResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> StaffingResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> StaffingResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_roster.sql"))?;
        Ok(())
    }

    // ── Roster ─────────────────────────────────────────────────

    /// Load the roster in its stored order.
    pub fn load_roster(&self) -> StaffingResult<Roster> {
        let mut stmt = self.conn.prepare(
            "SELECT staff_id, role, department, on_duty, on_leave,
                    burnout_risk, emergency_eligible, last_shift_hours
             FROM staff ORDER BY position ASC",
        )?;
        let records = stmt
            .query_map([], |row| {
                Ok(StaffRecord {
                    staff_id:           row.get(0)?,
                    role:               enum_column(row.get::<_, String>(1)?, 1)?,
                    department:         enum_column(row.get::<_, String>(2)?, 2)?,
                    on_duty:            row.get(3)?,
                    on_leave:           row.get(4)?,
                    burnout_risk:       enum_column(row.get::<_, String>(5)?, 5)?,
                    emergency_eligible: row.get(6)?,
                    last_shift_hours:   row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Roster::from_records(records)
    }

    /// Upsert every record by staff_id, storing roster order as position.
    /// Rows for staff missing from `roster` are left untouched.
    pub fn save_roster(&self, roster: &Roster) -> StaffingResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO staff (staff_id, position, role, department, on_duty, on_leave,
                                    burnout_risk, emergency_eligible, last_shift_hours)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(staff_id) DO UPDATE SET
                    position = excluded.position,
                    role = excluded.role,
                    department = excluded.department,
                    on_duty = excluded.on_duty,
                    on_leave = excluded.on_leave,
                    burnout_risk = excluded.burnout_risk,
                    emergency_eligible = excluded.emergency_eligible,
                    last_shift_hours = excluded.last_shift_hours",
            )?;
            for (position, record) in roster.iter().enumerate() {
                stmt.execute(params![
                    record.staff_id,
                    position as i64,
                    enum_text(&record.role)?,
                    enum_text(&record.department)?,
                    record.on_duty,
                    record.on_leave,
                    enum_text(&record.burnout_risk)?,
                    record.emergency_eligible,
                    record.last_shift_hours,
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("saved {} staff records", roster.len());
        Ok(())
    }

    // ── Daily snapshot ─────────────────────────────────────────

    /// Insert today's row. Returns false if a row for that date exists.
    pub fn insert_daily_snapshot(&self, snapshot: &DailySnapshot) -> StaffingResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO daily_snapshot
                (snapshot_date, doctors, nurses, sisters,
                 patients_opd, patients_emergency, patients_icu)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                snapshot.snapshot_date.to_string(),
                snapshot.doctors,
                snapshot.nurses,
                snapshot.sisters,
                snapshot.patients_opd,
                snapshot.patients_emergency,
                snapshot.patients_icu,
            ],
        )?;
        Ok(inserted > 0)
    }

    pub fn daily_snapshot_count(&self) -> StaffingResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM daily_snapshot",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Decision log ───────────────────────────────────────────

    /// Persist a decision record. Returns the generated decision id.
    pub fn record_decision(
        &self,
        decided_on: NaiveDate,
        record:     &DecisionRecord,
    ) -> StaffingResult<String> {
        let decision_id = uuid::Uuid::new_v4().to_string();
        let prediction = &record.patient_prediction;
        self.conn.execute(
            "INSERT INTO decision_log
                (decision_id, decided_on, decision_mode, predicted_total, risk_score, payload)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                decision_id,
                decided_on.to_string(),
                prediction.decision_mode.to_string(),
                prediction.predicted_total_patients,
                record.risk_assessment.risk_score,
                serde_json::to_string(record)?,
            ],
        )?;
        Ok(decision_id)
    }

    pub fn decision_count(&self) -> StaffingResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM decision_log",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Most recent decision payload for a date, if any.
    pub fn latest_decision_on(&self, decided_on: NaiveDate) -> StaffingResult<Option<DecisionRecord>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM decision_log
                 WHERE decided_on = ?1
                 ORDER BY rowid DESC LIMIT 1",
                params![decided_on.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

/// Serialize a unit enum to the same text used in JSON.
fn enum_text<T: Serialize>(value: &T) -> StaffingResult<String> {
    match serde_json::to_value(value)? {
        serde_json::Value::String(s) => Ok(s),
        other => Err(anyhow::anyhow!("expected a unit enum, got {other}").into()),
    }
}

fn enum_column<T: DeserializeOwned>(text: String, idx: usize) -> rusqlite::Result<T> {
    serde_json::from_value(serde_json::Value::String(text))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
