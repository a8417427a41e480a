//! Evaluation of the pre-trained linear artifacts.
//!
//! The app treats each artifact as a black-box function:
//!
//! - `scaler.transform(record) -> normalized row`
//! - `model.predict(normalized row) -> outcome`
//!
//! All fitted parameters come from the external training process; nothing
//! here is trained or re-fitted. Shape problems are deliberately *not*
//! checked at load time — they surface as prediction failures, local to the
//! action that triggered them.

use serde::{Deserialize, Serialize};

use crate::domain::{FeatureRecord, FEATURE_COUNT};
use crate::error::AppError;

/// Fitted standard scaler: `z = (x - mean) / scale` per column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Normalize a record into the row its paired model expects.
    pub fn transform(&self, record: &FeatureRecord) -> Result<[f64; FEATURE_COUNT], AppError> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(AppError::prediction(format!(
                "Scaler shape mismatch: expected {FEATURE_COUNT} features, got mean={} scale={}.",
                self.mean.len(),
                self.scale.len()
            )));
        }

        let raw = record.to_row();
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            let scale = self.scale[i];
            if !scale.is_finite() || scale == 0.0 {
                return Err(AppError::prediction(format!(
                    "Scaler column {i} has unusable scale {scale} (unfitted transform?)."
                )));
            }
            out[i] = (raw[i] - self.mean[i]) / scale;
            if !out[i].is_finite() {
                return Err(AppError::prediction(format!(
                    "Non-finite scaled value in column {i}."
                )));
            }
        }
        Ok(out)
    }
}

/// Fitted binary classifier: logistic score over a scaled row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Decision threshold on the positive-class probability.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl LinearClassifier {
    /// Predict the eligibility label (1 = eligible) for a scaled row.
    pub fn predict_label(&self, row: &[f64; FEATURE_COUNT]) -> Result<u8, AppError> {
        let score = dot(&self.weights, row, "classifier")? + self.intercept;
        let prob = sigmoid(score);
        if !prob.is_finite() {
            return Err(AppError::prediction(format!(
                "Non-finite classifier score ({score})."
            )));
        }
        Ok(u8::from(prob >= self.threshold))
    }
}

/// Fitted regressor: affine map from a scaled row to an EMI amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    /// Predict the maximum EMI amount for a scaled row.
    pub fn predict_value(&self, row: &[f64; FEATURE_COUNT]) -> Result<f64, AppError> {
        let value = dot(&self.weights, row, "regressor")? + self.intercept;
        if !value.is_finite() {
            return Err(AppError::prediction(format!(
                "Non-finite regressor prediction ({value})."
            )));
        }
        Ok(value)
    }
}

fn dot(weights: &[f64], row: &[f64; FEATURE_COUNT], what: &str) -> Result<f64, AppError> {
    if weights.len() != FEATURE_COUNT {
        return Err(AppError::prediction(format!(
            "{what} shape mismatch: expected {FEATURE_COUNT} weights, got {}.",
            weights.len()
        )));
    }
    Ok(weights.iter().zip(row.iter()).map(|(w, x)| w * x).sum())
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureRecord;

    fn record() -> FeatureRecord {
        FeatureRecord::from_values([30, 50_000, 250_000, 24, 650, 1, 5])
    }

    /// Identity scaler: mean 0, scale 1 in every column.
    fn identity_scaler() -> StandardScaler {
        StandardScaler {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    #[test]
    fn transform_identity_passes_row_through() {
        let scaled = identity_scaler().transform(&record()).unwrap();
        assert_eq!(scaled, record().to_row());
    }

    #[test]
    fn transform_rejects_shape_mismatch() {
        let scaler = StandardScaler {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        let err = scaler.transform(&record()).unwrap_err();
        assert!(err.to_string().contains("shape mismatch"), "{err}");
    }

    #[test]
    fn transform_rejects_zero_scale() {
        let mut scaler = identity_scaler();
        scaler.scale[2] = 0.0;
        let err = scaler.transform(&record()).unwrap_err();
        assert!(err.to_string().contains("unusable scale"), "{err}");
    }

    #[test]
    fn classifier_label_follows_intercept_sign() {
        let positive = LinearClassifier {
            weights: vec![0.0; FEATURE_COUNT],
            intercept: 10.0,
            threshold: 0.5,
        };
        let negative = LinearClassifier {
            weights: vec![0.0; FEATURE_COUNT],
            intercept: -10.0,
            threshold: 0.5,
        };
        let row = [0.0; FEATURE_COUNT];
        assert_eq!(positive.predict_label(&row).unwrap(), 1);
        assert_eq!(negative.predict_label(&row).unwrap(), 0);
    }

    #[test]
    fn classifier_rejects_short_weights() {
        let clf = LinearClassifier {
            weights: vec![1.0],
            intercept: 0.0,
            threshold: 0.5,
        };
        let err = clf.predict_label(&[0.0; FEATURE_COUNT]).unwrap_err();
        assert!(err.to_string().contains("shape mismatch"), "{err}");
    }

    #[test]
    fn regressor_constant_model() {
        let reg = LinearRegressor {
            weights: vec![0.0; FEATURE_COUNT],
            intercept: 12345.6,
        };
        let value = reg.predict_value(&[0.0; FEATURE_COUNT]).unwrap();
        assert!((value - 12345.6).abs() < 1e-9);
    }

    #[test]
    fn default_threshold_deserializes() {
        let clf: LinearClassifier =
            serde_json::from_str(r#"{"weights":[0,0,0,0,0,0,0],"intercept":1.0}"#).unwrap();
        assert!((clf.threshold - 0.5).abs() < 1e-12);
    }
}
