//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory while driving the form and the models
//! - shared between the CLI and TUI front-ends without conversion
//! - constructed directly in tests with crafted values

/// Number of customer attributes fed to the models.
///
/// The scalers and models were fitted on exactly this many columns, in the
/// order given by [`FeatureField::ALL`].
pub const FEATURE_COUNT: usize = 7;

/// One customer attribute collected by the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureField {
    Age,
    MonthlyIncome,
    LoanAmount,
    LoanTenure,
    CreditScore,
    ExistingLoans,
    EmploymentYears,
}

/// Declared bounds, default, and step for a form control.
///
/// Values outside `[min, max]` are not reachable through any control, so no
/// separate validation stage exists downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub min: i64,
    pub max: i64,
    pub default: i64,
    pub step: i64,
}

impl FieldSpec {
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

pub const AGE: FieldSpec = FieldSpec {
    min: 18,
    max: 70,
    default: 30,
    step: 1,
};

pub const MONTHLY_INCOME: FieldSpec = FieldSpec {
    min: 10_000,
    max: 200_000,
    default: 50_000,
    step: 5_000,
};

pub const LOAN_AMOUNT: FieldSpec = FieldSpec {
    min: 1_000,
    max: 1_000_000,
    default: 250_000,
    step: 10_000,
};

pub const LOAN_TENURE: FieldSpec = FieldSpec {
    min: 6,
    max: 60,
    default: 24,
    step: 1,
};

pub const CREDIT_SCORE: FieldSpec = FieldSpec {
    min: 300,
    max: 900,
    default: 650,
    step: 1,
};

pub const EXISTING_LOANS: FieldSpec = FieldSpec {
    min: 0,
    max: 10,
    default: 1,
    step: 1,
};

pub const EMPLOYMENT_YEARS: FieldSpec = FieldSpec {
    min: 0,
    max: 40,
    default: 5,
    step: 1,
};

impl FeatureField {
    /// All fields in the positional order the scaler/model pairs expect.
    ///
    /// This order must match the column order used at training time; the
    /// record is always assembled from it (never from an ad-hoc list).
    pub const ALL: [FeatureField; FEATURE_COUNT] = [
        FeatureField::Age,
        FeatureField::MonthlyIncome,
        FeatureField::LoanAmount,
        FeatureField::LoanTenure,
        FeatureField::CreditScore,
        FeatureField::ExistingLoans,
        FeatureField::EmploymentYears,
    ];

    /// Human-readable label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            FeatureField::Age => "Age",
            FeatureField::MonthlyIncome => "Monthly Income (₹)",
            FeatureField::LoanAmount => "Loan Amount (₹)",
            FeatureField::LoanTenure => "Loan Tenure (months)",
            FeatureField::CreditScore => "Credit Score",
            FeatureField::ExistingLoans => "Existing Loans",
            FeatureField::EmploymentYears => "Employment Years",
        }
    }

    pub fn spec(self) -> FieldSpec {
        match self {
            FeatureField::Age => AGE,
            FeatureField::MonthlyIncome => MONTHLY_INCOME,
            FeatureField::LoanAmount => LOAN_AMOUNT,
            FeatureField::LoanTenure => LOAN_TENURE,
            FeatureField::CreditScore => CREDIT_SCORE,
            FeatureField::ExistingLoans => EXISTING_LOANS,
            FeatureField::EmploymentYears => EMPLOYMENT_YEARS,
        }
    }

    /// Position of this field in the model input row.
    pub fn index(self) -> usize {
        match self {
            FeatureField::Age => 0,
            FeatureField::MonthlyIncome => 1,
            FeatureField::LoanAmount => 2,
            FeatureField::LoanTenure => 3,
            FeatureField::CreditScore => 4,
            FeatureField::ExistingLoans => 5,
            FeatureField::EmploymentYears => 6,
        }
    }
}

/// The immutable seven-field record passed to scalers and models.
///
/// Constructed fresh from the current form values on every action; it has
/// no identity and is discarded after use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    pub age: f64,
    pub monthly_income: f64,
    pub loan_amount: f64,
    pub loan_tenure: f64,
    pub credit_score: f64,
    pub existing_loans: f64,
    pub employment_years: f64,
}

impl FeatureRecord {
    /// Build a record from control values in [`FeatureField::ALL`] order.
    pub fn from_values(values: [i64; FEATURE_COUNT]) -> Self {
        Self {
            age: values[0] as f64,
            monthly_income: values[1] as f64,
            loan_amount: values[2] as f64,
            loan_tenure: values[3] as f64,
            credit_score: values[4] as f64,
            existing_loans: values[5] as f64,
            employment_years: values[6] as f64,
        }
    }

    /// The model input row, in the fixed positional order.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.monthly_income,
            self.loan_amount,
            self.loan_tenure,
            self.credit_score,
            self.existing_loans,
            self.employment_years,
        ]
    }

    pub fn get(&self, field: FeatureField) -> f64 {
        self.to_row()[field.index()]
    }
}

/// Eligibility verdict from the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Eligible,
    NotEligible,
}

impl Verdict {
    /// Label 1 means eligible; any other label means not eligible.
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Verdict::Eligible
        } else {
            Verdict::NotEligible
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Verdict::Eligible => "Eligible",
            Verdict::NotEligible => "Not Eligible",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_matches_indices() {
        for (i, field) in FeatureField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i, "field {field:?} out of position");
        }
    }

    #[test]
    fn record_row_follows_field_order() {
        let record = FeatureRecord::from_values([18, 10_000, 1_000, 6, 300, 0, 0]);
        let row = record.to_row();
        assert_eq!(row[FeatureField::Age.index()], 18.0);
        assert_eq!(row[FeatureField::MonthlyIncome.index()], 10_000.0);
        assert_eq!(row[FeatureField::LoanAmount.index()], 1_000.0);
        assert_eq!(row[FeatureField::LoanTenure.index()], 6.0);
        assert_eq!(row[FeatureField::CreditScore.index()], 300.0);
        assert_eq!(row[FeatureField::ExistingLoans.index()], 0.0);
        assert_eq!(row[FeatureField::EmploymentYears.index()], 0.0);
    }

    #[test]
    fn verdict_label_mapping() {
        assert_eq!(Verdict::from_label(1), Verdict::Eligible);
        assert_eq!(Verdict::from_label(0), Verdict::NotEligible);
        assert_eq!(Verdict::from_label(2), Verdict::NotEligible);
    }

    #[test]
    fn specs_are_internally_consistent() {
        for field in FeatureField::ALL {
            let spec = field.spec();
            assert!(spec.min <= spec.max, "{field:?}: min > max");
            assert!(
                (spec.min..=spec.max).contains(&spec.default),
                "{field:?}: default outside bounds"
            );
            assert!(spec.step > 0, "{field:?}: non-positive step");
        }
    }
}
