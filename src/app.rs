//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the model artifacts (once, fatal on failure)
//! - dispatches to the one-shot commands or the TUI

use clap::Parser;

use crate::artifacts::{ArtifactBundle, ArtifactPaths, ArtifactState};
use crate::cli::{Command, FormArgs};
use crate::error::AppError;

/// Entry point for the `emi` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `emi` (and `emi --models-dir ...`) to behave like
    // `emi tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Check(args) => handle_check(args),
        Command::Amount(args) => handle_amount(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

/// Load the artifact bundle, treating any failure as fatal.
///
/// This is the one place artifacts are read from disk: every front-end
/// calls it exactly once per process, before offering any prediction
/// action, and passes the bundle explicitly from there on.
pub fn load_artifacts(args: &FormArgs) -> Result<ArtifactBundle, AppError> {
    let paths = ArtifactPaths::resolve(args.models_dir.as_deref());
    ArtifactState::load(&paths).into_bundle()
}

fn handle_check(args: FormArgs) -> Result<(), AppError> {
    let bundle = load_artifacts(&args)?;
    let record = args.form().record();

    print!("{}", crate::report::format_record_preview(&record));

    let verdict = crate::predict::check_eligibility(&bundle, &record)
        .map_err(|e| AppError::prediction(format!("Error in prediction: {e}")))?;
    println!("Prediction: {}", verdict.display_name());
    Ok(())
}

fn handle_amount(args: FormArgs) -> Result<(), AppError> {
    let bundle = load_artifacts(&args)?;
    let record = args.form().record();

    print!("{}", crate::report::format_record_preview(&record));

    let amount = crate::predict::predict_max_emi(&bundle, &record)
        .map_err(|e| AppError::prediction(format!("Error in prediction: {e}")))?;
    println!(
        "Predicted Maximum EMI: ₹ {}",
        crate::report::format_currency(amount)
    );
    Ok(())
}

fn handle_inspect(args: FormArgs) -> Result<(), AppError> {
    let bundle = load_artifacts(&args)?;
    print!("{}", crate::report::format_artifact_summary(&bundle));
    Ok(())
}

/// Rewrite argv so `emi` defaults to `emi tui`.
///
/// Rules:
/// - `emi`                      -> `emi tui`
/// - `emi --models-dir X ...`   -> `emi tui --models-dir X ...`
/// - `emi --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "check" | "amount" | "inspect");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["emi"])), argv(&["emi", "tui"]));
    }

    #[test]
    fn leading_flag_is_treated_as_tui() {
        assert_eq!(
            rewrite_args(argv(&["emi", "--models-dir", "m"])),
            argv(&["emi", "tui", "--models-dir", "m"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["emi", "check", "--age", "40"])),
            argv(&["emi", "check", "--age", "40"])
        );
        assert_eq!(rewrite_args(argv(&["emi", "--help"])), argv(&["emi", "--help"]));
        assert_eq!(rewrite_args(argv(&["emi", "-V"])), argv(&["emi", "-V"]));
    }

    #[test]
    fn artifact_failure_is_fatal_with_exit_code_2() {
        let args = FormArgs {
            models_dir: Some("does/not/exist".into()),
            ..default_args()
        };
        let err = load_artifacts(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Error loading model files"), "{err}");
    }

    fn default_args() -> FormArgs {
        use clap::Parser;
        let cli = crate::cli::Cli::parse_from(["emi", "check"]);
        match cli.command {
            Command::Check(args) => args,
            _ => unreachable!(),
        }
    }
}
