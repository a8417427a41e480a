//! Prediction dispatch shared by the CLI and TUI front-ends.
//!
//! Two independent actions over `(&ArtifactBundle, &FeatureRecord)`:
//!
//! - eligibility check: classification scaler -> classifier -> verdict
//! - maximum EMI: regression scaler -> regressor -> amount
//!
//! Each action is stateless and recomputed from scratch on every trigger.
//! Any failure during transform or predict propagates as `Err` to the
//! action boundary, where the front-end renders it inline; a failure in one
//! action never affects the other.

use crate::artifacts::ArtifactBundle;
use crate::domain::{FeatureRecord, Verdict};
use crate::error::AppError;

/// Run the eligibility check: label 1 maps to `Eligible`, anything else to
/// `Not Eligible`.
pub fn check_eligibility(
    bundle: &ArtifactBundle,
    record: &FeatureRecord,
) -> Result<Verdict, AppError> {
    let scaled = bundle.classifier_scaler.transform(record)?;
    let label = bundle.classifier.predict_label(&scaled)?;
    Ok(Verdict::from_label(label))
}

/// Predict the maximum EMI amount for the record.
pub fn predict_max_emi(bundle: &ArtifactBundle, record: &FeatureRecord) -> Result<f64, AppError> {
    let scaled = bundle.regressor_scaler.transform(record)?;
    bundle.regressor.predict_value(&scaled)
}
