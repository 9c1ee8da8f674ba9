//! Demand predictor seam.
//!
//! The engine treats prediction as opaque: five named features in, one
//! non-negative patient count out. Any closure with the right signature is
//! a predictor; `LinearDemandModel` is the file-backed default.

use crate::{snapshot::DemandFeatures, types::PatientCount};
use serde::{Deserialize, Serialize};

pub trait DemandPredictor {
    fn predict(&self, features: &DemandFeatures) -> anyhow::Result<PatientCount>;
}

impl<F> DemandPredictor for F
where
    F: Fn(&DemandFeatures) -> anyhow::Result<PatientCount>,
{
    fn predict(&self, features: &DemandFeatures) -> anyhow::Result<PatientCount> {
        self(features)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureWeights {
    pub opd_patients:       f64,
    pub emergency_patients: f64,
    pub icu_patients:       f64,
    pub available_nurses:   f64,
    pub available_doctors:  f64,
}

impl FeatureWeights {
    fn as_array(&self) -> [f64; 5] {
        [
            self.opd_patients,
            self.emergency_patients,
            self.icu_patients,
            self.available_nurses,
            self.available_doctors,
        ]
    }
}

/// Linear regression over the five demand features.
/// The raw output is truncated toward zero and floored at 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LinearDemandModel {
    pub intercept:    f64,
    pub coefficients: FeatureWeights,
}

impl LinearDemandModel {
    /// Load fitted coefficients, e.g. `data/model/demand_model.json`.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let model = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(model)
    }

    pub fn raw_output(&self, features: &DemandFeatures) -> f64 {
        self.coefficients
            .as_array()
            .iter()
            .zip(features.as_array())
            .fold(self.intercept, |acc, (w, x)| acc + w * x)
    }
}

impl DemandPredictor for LinearDemandModel {
    fn predict(&self, features: &DemandFeatures) -> anyhow::Result<PatientCount> {
        let raw = self.raw_output(features);
        if !raw.is_finite() {
            anyhow::bail!("model produced a non-finite prediction ({raw})");
        }
        Ok(raw.trunc().max(0.0) as PatientCount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> DemandFeatures {
        DemandFeatures {
            opd_patients:       400,
            emergency_patients: 80,
            icu_patients:       20,
            available_nurses:   30,
            available_doctors:  10,
        }
    }

    #[test]
    fn linear_model_truncates() {
        let model = LinearDemandModel {
            intercept: 0.9,
            coefficients: FeatureWeights {
                opd_patients: 1.0,
                emergency_patients: 1.0,
                icu_patients: 1.0,
                ..Default::default()
            },
        };
        assert_eq!(model.predict(&features()).unwrap(), 500);
    }

    #[test]
    fn linear_model_floors_at_zero() {
        let model = LinearDemandModel {
            intercept: -10.0,
            coefficients: FeatureWeights::default(),
        };
        assert_eq!(model.predict(&features()).unwrap(), 0);
    }

    #[test]
    fn non_finite_output_is_an_error() {
        let model = LinearDemandModel {
            intercept: f64::NAN,
            coefficients: FeatureWeights::default(),
        };
        assert!(model.predict(&features()).is_err());
    }

    #[test]
    fn closures_are_predictors() {
        let fixed = |_: &DemandFeatures| -> anyhow::Result<PatientCount> { Ok(42) };
        assert_eq!(fixed.predict(&features()).unwrap(), 42);
    }
}
