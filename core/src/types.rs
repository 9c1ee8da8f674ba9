//! Shared closed enumerations and primitive aliases used across the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, unique identity of a staff member.
pub type StaffId = String;

/// Predicted total patient count.
pub type PatientCount = u32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Doctor,
    Nurse,
    Sister,
    Pharmacist,
    #[serde(rename = "Lab_Technician")]
    LabTechnician,
    Radiologist,
    Cleaner,
    Security,
    #[serde(rename = "Admin_Staff")]
    AdminStaff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor        => "Doctor",
            Role::Nurse         => "Nurse",
            Role::Sister        => "Sister",
            Role::Pharmacist    => "Pharmacist",
            Role::LabTechnician => "Lab_Technician",
            Role::Radiologist   => "Radiologist",
            Role::Cleaner       => "Cleaner",
            Role::Security      => "Security",
            Role::AdminStaff    => "Admin_Staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hospital departments. Declaration order is the reporting order of
/// requirement tables and staffing plans.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Department {
    #[serde(rename = "ICU")]
    Icu,
    Emergency,
    Ward,
    Pharmacy,
    Security,
    Housekeeping,
    #[serde(rename = "OPD")]
    Opd,
    Surgery,
    Radiology,
    Laboratory,
    Administration,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Icu            => "ICU",
            Department::Emergency      => "Emergency",
            Department::Ward           => "Ward",
            Department::Pharmacy       => "Pharmacy",
            Department::Security       => "Security",
            Department::Housekeeping   => "Housekeeping",
            Department::Opd            => "OPD",
            Department::Surgery        => "Surgery",
            Department::Radiology      => "Radiology",
            Department::Laboratory     => "Laboratory",
            Department::Administration => "Administration",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum BurnoutRisk {
    #[serde(alias = "low", alias = "Low")]
    Low,
    #[serde(alias = "moderate", alias = "Moderate")]
    Moderate,
    #[serde(alias = "high", alias = "High")]
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Fixed thresholds: >= 70 HIGH, >= 40 MEDIUM, else LOW.
    pub fn from_score(score: u32) -> Self {
        if score >= 70 {
            RiskLevel::High
        } else if score >= 40 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Situation mode, recomputed on every call from the predicted count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionMode {
    Normal,
    Emergency,
}

impl fmt::Display for DecisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionMode::Normal    => f.write_str("NORMAL"),
            DecisionMode::Emergency => f.write_str("EMERGENCY"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Shift {
    #[default]
    Morning,
    Evening,
    Night,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ExternalRisk {
    #[default]
    None,
    #[serde(rename = "Weather Alert", alias = "WeatherAlert")]
    WeatherAlert,
    #[serde(rename = "Accident Nearby", alias = "AccidentNearby")]
    AccidentNearby,
    #[serde(rename = "Disease Outbreak", alias = "DiseaseOutbreak")]
    DiseaseOutbreak,
}

/// Lenient boolean flags: accepts JSON booleans or "yes"/"no" strings,
/// the way roster exports write them.
pub mod flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawFlag::deserialize(deserializer)? {
            RawFlag::Bool(b) => Ok(b),
            RawFlag::Text(s) => parse(&s)
                .ok_or_else(|| de::Error::custom(format!("expected yes/no flag, got '{s}'"))),
        }
    }

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(*value)
    }

    pub fn parse(s: &str) -> Option<bool> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "y" => Some(true),
            "no" | "false" | "n" => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_match_roster_spelling() {
        let role: Role = serde_json::from_str("\"Lab_Technician\"").unwrap();
        assert_eq!(role, Role::LabTechnician);
        assert_eq!(Role::AdminStaff.to_string(), "Admin_Staff");
    }

    #[test]
    fn external_risk_accepts_both_spellings() {
        let a: ExternalRisk = serde_json::from_str("\"Disease Outbreak\"").unwrap();
        let b: ExternalRisk = serde_json::from_str("\"DiseaseOutbreak\"").unwrap();
        assert_eq!(a, ExternalRisk::DiseaseOutbreak);
        assert_eq!(a, b);
    }

    #[test]
    fn flag_parser_accepts_yes_no() {
        assert_eq!(flag::parse("Yes"), Some(true));
        assert_eq!(flag::parse(" no "), Some(false));
        assert_eq!(flag::parse("maybe"), None);
    }

    #[test]
    fn risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
    }
}
