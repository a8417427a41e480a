//! Command-line parsing for the EMI eligibility & prediction app.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the form/prediction code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    self, FeatureField, FEATURE_COUNT,
};
use crate::form::FormState;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "emi", version, about = "EMI Eligibility & Prediction System")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (the default when no subcommand is given).
    Tui(FormArgs),
    /// One-shot eligibility check for the given customer details.
    Check(FormArgs),
    /// One-shot maximum EMI prediction for the given customer details.
    Amount(FormArgs),
    /// Print a summary of the four loaded model artifacts.
    Inspect(FormArgs),
}

/// Customer details plus artifact location, shared by every subcommand.
///
/// Each value flag is bounded by the same `FieldSpec` constants that drive
/// the TUI controls, so out-of-range inputs are rejected at parse time and
/// no later validation stage exists.
#[derive(Debug, Parser, Clone)]
pub struct FormArgs {
    /// Directory containing the four model artifact files
    /// (defaults to $EMI_MODELS_DIR, then `models/`).
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Customer age in years.
    #[arg(long, default_value_t = domain::AGE.default,
          value_parser = clap::value_parser!(i64).range(domain::AGE.min..=domain::AGE.max))]
    pub age: i64,

    /// Monthly income (₹).
    #[arg(long, default_value_t = domain::MONTHLY_INCOME.default,
          value_parser = clap::value_parser!(i64).range(domain::MONTHLY_INCOME.min..=domain::MONTHLY_INCOME.max))]
    pub income: i64,

    /// Requested loan amount (₹).
    #[arg(long, default_value_t = domain::LOAN_AMOUNT.default,
          value_parser = clap::value_parser!(i64).range(domain::LOAN_AMOUNT.min..=domain::LOAN_AMOUNT.max))]
    pub loan_amount: i64,

    /// Loan tenure in months.
    #[arg(long, default_value_t = domain::LOAN_TENURE.default,
          value_parser = clap::value_parser!(i64).range(domain::LOAN_TENURE.min..=domain::LOAN_TENURE.max))]
    pub loan_tenure: i64,

    /// Credit score.
    #[arg(long, default_value_t = domain::CREDIT_SCORE.default,
          value_parser = clap::value_parser!(i64).range(domain::CREDIT_SCORE.min..=domain::CREDIT_SCORE.max))]
    pub credit_score: i64,

    /// Number of existing loans.
    #[arg(long, default_value_t = domain::EXISTING_LOANS.default,
          value_parser = clap::value_parser!(i64).range(domain::EXISTING_LOANS.min..=domain::EXISTING_LOANS.max))]
    pub existing_loans: i64,

    /// Years in current job.
    #[arg(long, default_value_t = domain::EMPLOYMENT_YEARS.default,
          value_parser = clap::value_parser!(i64).range(domain::EMPLOYMENT_YEARS.min..=domain::EMPLOYMENT_YEARS.max))]
    pub employment_years: i64,
}

impl FormArgs {
    /// The argument values in [`FeatureField::ALL`] order.
    pub fn values(&self) -> [i64; FEATURE_COUNT] {
        let mut out = [0; FEATURE_COUNT];
        out[FeatureField::Age.index()] = self.age;
        out[FeatureField::MonthlyIncome.index()] = self.income;
        out[FeatureField::LoanAmount.index()] = self.loan_amount;
        out[FeatureField::LoanTenure.index()] = self.loan_tenure;
        out[FeatureField::CreditScore.index()] = self.credit_score;
        out[FeatureField::ExistingLoans.index()] = self.existing_loans;
        out[FeatureField::EmploymentYears.index()] = self.employment_years;
        out
    }

    /// A form pre-seeded with these arguments.
    pub fn form(&self) -> FormState {
        FormState::with_values(self.values())
    }
}
