//! Core domain types shared by all modules.

pub mod types;

pub use types::{
    FeatureField, FeatureRecord, FieldSpec, Verdict, AGE, CREDIT_SCORE, EMPLOYMENT_YEARS,
    EXISTING_LOANS, FEATURE_COUNT, LOAN_AMOUNT, LOAN_TENURE, MONTHLY_INCOME,
};
