//! Situation snapshot: the typed request payload of one decision call.
//!
//! Nested sub-objects default field-by-field, so a partial payload scores
//! as if the missing parts were zero or absent. Only the five demand
//! features are required, and they are checked by `demand_features()`.

use crate::{
    error::{StaffingError, StaffingResult},
    types::{ExternalRisk, Shift},
};
use serde::{Deserialize, Serialize};

/// Value of `special_day` that means "no special day".
pub const NORMAL_DAY: &str = "Normal Day";

/// Demand features in the order the predictor expects them.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "opd_patients",
    "emergency_patients",
    "icu_patients",
    "available_nurses",
    "available_doctors",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SituationSnapshot {
    pub opd_patients:       Option<u32>,
    pub emergency_patients: Option<u32>,
    pub icu_patients:       Option<u32>,
    pub available_nurses:   Option<u32>,
    pub available_doctors:  Option<u32>,
    #[serde(default)]
    pub severity_mix:       SeverityMix,
    #[serde(default)]
    pub occupancy:          Occupancy,
    #[serde(default)]
    pub staff_pressure:     StaffPressure,
    #[serde(default)]
    pub time_context:       TimeContext,
    #[serde(default, deserialize_with = "nullable_external_risk")]
    pub external_risk:      ExternalRisk,
}

/// Patient severity percentages, 0-100.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeverityMix {
    pub critical: f64,
    pub moderate: f64,
    pub stable:   f64,
}

/// Bed occupancy percentages, 0-100.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Occupancy {
    pub icu: f64,
    pub er:  f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StaffPressure {
    pub fatigued_pct: f64,
    #[serde(with = "crate::types::flag")]
    pub transport_issue: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimeContext {
    pub shift: Shift,
    pub special_day: String,
}

impl Default for TimeContext {
    fn default() -> Self {
        Self {
            shift: Shift::Morning,
            special_day: NORMAL_DAY.to_string(),
        }
    }
}

impl TimeContext {
    pub fn is_special_day(&self) -> bool {
        self.special_day != NORMAL_DAY
    }
}

/// The five numeric features handed to the demand predictor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DemandFeatures {
    pub opd_patients:       u32,
    pub emergency_patients: u32,
    pub icu_patients:       u32,
    pub available_nurses:   u32,
    pub available_doctors:  u32,
}

impl DemandFeatures {
    /// Feature values in `REQUIRED_FIELDS` order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.opd_patients as f64,
            self.emergency_patients as f64,
            self.icu_patients as f64,
            self.available_nurses as f64,
            self.available_doctors as f64,
        ]
    }
}

impl SituationSnapshot {
    /// Parse a loosely-typed request body.
    /// Missing required fields are reported by name before any shape errors.
    pub fn from_value(payload: &serde_json::Value) -> StaffingResult<Self> {
        let object = payload
            .as_object()
            .ok_or_else(|| StaffingError::InvalidRequest("request body must be a JSON object".into()))?;

        for field in REQUIRED_FIELDS {
            if !object.contains_key(field) {
                return Err(StaffingError::MissingField { field: field.to_string() });
            }
        }

        serde_json::from_value(payload.clone())
            .map_err(|e| StaffingError::InvalidRequest(e.to_string()))
    }

    /// Validate that every demand feature is present.
    pub fn demand_features(&self) -> StaffingResult<DemandFeatures> {
        let values = [
            self.opd_patients,
            self.emergency_patients,
            self.icu_patients,
            self.available_nurses,
            self.available_doctors,
        ];
        if let Some(pos) = values.iter().position(Option::is_none) {
            return Err(StaffingError::MissingField {
                field: REQUIRED_FIELDS[pos].to_string(),
            });
        }
        let [opd, emergency, icu, nurses, doctors] = values.map(Option::unwrap_or_default);
        Ok(DemandFeatures {
            opd_patients:       opd,
            emergency_patients: emergency,
            icu_patients:       icu,
            available_nurses:   nurses,
            available_doctors:  doctors,
        })
    }
}

fn nullable_external_risk<'de, D>(deserializer: D) -> Result<ExternalRisk, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<ExternalRisk>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_required_field_is_named() {
        let payload = json!({
            "opd_patients": 400,
            "emergency_patients": 80,
            "available_nurses": 30,
            "available_doctors": 12
        });
        let err = SituationSnapshot::from_value(&payload).unwrap_err();
        assert_eq!(err.to_string(), "Missing field: icu_patients");
        assert!(err.is_client_error());
    }

    #[test]
    fn partial_sub_objects_default() {
        let payload = json!({
            "opd_patients": 1, "emergency_patients": 2, "icu_patients": 3,
            "available_nurses": 4, "available_doctors": 5,
            "severity_mix": { "critical": 20 },
            "staff_pressure": { "transport_issue": "Yes" },
            "external_risk": null
        });
        let snap = SituationSnapshot::from_value(&payload).unwrap();
        assert_eq!(snap.severity_mix.critical, 20.0);
        assert_eq!(snap.severity_mix.moderate, 0.0);
        assert!(snap.staff_pressure.transport_issue);
        assert_eq!(snap.external_risk, ExternalRisk::None);
        assert!(!snap.time_context.is_special_day());
        assert_eq!(snap.demand_features().unwrap().available_doctors, 5);
    }

    #[test]
    fn negative_count_is_invalid_request() {
        let payload = json!({
            "opd_patients": -1, "emergency_patients": 2, "icu_patients": 3,
            "available_nurses": 4, "available_doctors": 5
        });
        let err = SituationSnapshot::from_value(&payload).unwrap_err();
        assert!(matches!(err, StaffingError::InvalidRequest(_)));
    }

    #[test]
    fn typed_snapshot_without_features_fails_validation() {
        let snap = SituationSnapshot {
            opd_patients: Some(10),
            ..Default::default()
        };
        let err = snap.demand_features().unwrap_err();
        assert_eq!(err.to_string(), "Missing field: emergency_patients");
    }
}
