//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the prediction code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::artifacts::ArtifactBundle;
use crate::domain::{FeatureField, FeatureRecord};

/// Format an amount with two decimals and comma thousands separators.
///
/// `12345.6` renders as `12,345.60`. The sign is preserved; non-finite
/// values fall back to the plain float rendering.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }

    let negative = value < 0.0;
    let mut digits = format!("{:.2}", value.abs());
    let frac = digits.split_off(digits.len() - 3);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(&frac);
    out
}

/// Format the current record as an aligned label/value table, in the fixed
/// field order. Shown before any prediction is requested.
pub fn format_record_preview(record: &FeatureRecord) -> String {
    let mut out = String::new();
    out.push_str("Input data preview:\n");
    for field in FeatureField::ALL {
        out.push_str(&format!("  {:<22} {:>12}\n", field.label(), record.get(field) as i64));
    }
    out
}

/// Summarize the loaded artifacts (for `emi inspect`).
pub fn format_artifact_summary(bundle: &ArtifactBundle) -> String {
    let mut out = String::new();

    out.push_str("=== emi - loaded artifacts ===\n");
    out.push_str(&format!(
        "Classifier : {} weights | intercept={:.6} | threshold={:.2}\n",
        bundle.classifier.weights.len(),
        bundle.classifier.intercept,
        bundle.classifier.threshold,
    ));
    out.push_str(&format!(
        "Regressor  : {} weights | intercept={:.6}\n",
        bundle.regressor.weights.len(),
        bundle.regressor.intercept,
    ));
    out.push_str(&format!(
        "Clf scaler : mean={} | scale={}\n",
        fmt_vec(&bundle.classifier_scaler.mean),
        fmt_vec(&bundle.classifier_scaler.scale),
    ));
    out.push_str(&format!(
        "Reg scaler : mean={} | scale={}\n",
        fmt_vec(&bundle.regressor_scaler.mean),
        fmt_vec(&bundle.regressor_scaler.scale),
    ));

    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.3}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;

    #[test]
    fn currency_thousands_and_decimals() {
        assert_eq!(format_currency(12345.6), "12,345.60");
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(999.5), "999.50");
        assert_eq!(format_currency(1_000.0), "1,000.00");
        assert_eq!(format_currency(1_000_000.0), "1,000,000.00");
        assert_eq!(format_currency(123.456), "123.46");
    }

    #[test]
    fn currency_preserves_sign() {
        assert_eq!(format_currency(-1234.5), "-1,234.50");
        assert_eq!(format_currency(-0.004), "-0.00");
    }

    #[test]
    fn currency_rounding_can_add_a_group() {
        // 999.995 rounds up to 1,000.00 — the separator must still appear.
        assert_eq!(format_currency(999.995), "1,000.00");
    }

    #[test]
    fn currency_guards_non_finite() {
        assert_eq!(format_currency(f64::NAN), "NaN");
        assert_eq!(format_currency(f64::INFINITY), "inf");
    }

    #[test]
    fn preview_lists_all_fields_in_order() {
        let preview = format_record_preview(&FormState::new().record());
        let age_pos = preview.find("Age").unwrap();
        let income_pos = preview.find("Monthly Income").unwrap();
        let years_pos = preview.find("Employment Years").unwrap();
        assert!(age_pos < income_pos && income_pos < years_pos);
        assert!(preview.contains("250000"), "{preview}");
    }
}
