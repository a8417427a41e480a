//! Loading of the four pre-trained model artifacts.
//!
//! The artifacts are produced by an external training process and dumped as
//! JSON: a classifier, a regressor, and the standard scaler paired with
//! each. They are loaded exactly once per process, before any input control
//! is rendered, and the bundle is passed explicitly to whatever needs it —
//! re-renders never touch the disk again.
//!
//! Load-failure and load-not-attempted are distinct [`ArtifactState`]
//! variants, so a failed load can never be mistaken for "not loaded yet"
//! and silently retried into unusable artifacts.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::AppError;

pub mod linear;

pub use linear::{LinearClassifier, LinearRegressor, StandardScaler};

pub const CLASSIFIER_FILE: &str = "classification_model.json";
pub const REGRESSOR_FILE: &str = "regression_model.json";
pub const CLASSIFIER_SCALER_FILE: &str = "scaler.json";
pub const REGRESSOR_SCALER_FILE: &str = "reg_scaler.json";

/// Default models directory when neither the CLI flag nor the environment
/// provides one.
pub const DEFAULT_MODELS_DIR: &str = "models";

/// The four fixed artifact paths.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub regressor: PathBuf,
    pub classifier_scaler: PathBuf,
    pub regressor_scaler: PathBuf,
}

impl ArtifactPaths {
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            classifier: dir.join(CLASSIFIER_FILE),
            regressor: dir.join(REGRESSOR_FILE),
            classifier_scaler: dir.join(CLASSIFIER_SCALER_FILE),
            regressor_scaler: dir.join(REGRESSOR_SCALER_FILE),
        }
    }

    /// Resolve the models directory: CLI flag, else `EMI_MODELS_DIR`
    /// (a `.env` file is honored), else `models/`.
    pub fn resolve(cli_dir: Option<&Path>) -> Self {
        if let Some(dir) = cli_dir {
            return Self::from_dir(dir);
        }
        dotenvy::dotenv().ok();
        let dir = std::env::var("EMI_MODELS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODELS_DIR));
        Self::from_dir(&dir)
    }
}

/// All four loaded artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub classifier: LinearClassifier,
    pub regressor: LinearRegressor,
    pub classifier_scaler: StandardScaler,
    pub regressor_scaler: StandardScaler,
}

/// Load all four artifacts, or fail with the first underlying error.
///
/// Errors name the offending path and the verbatim failure text; no shape
/// validation happens here (shape problems are prediction-time failures).
pub fn load_bundle(paths: &ArtifactPaths) -> Result<ArtifactBundle, AppError> {
    Ok(ArtifactBundle {
        classifier: load_json(&paths.classifier, "classification model")?,
        regressor: load_json(&paths.regressor, "regression model")?,
        classifier_scaler: load_json(&paths.classifier_scaler, "classification scaler")?,
        regressor_scaler: load_json(&paths.regressor_scaler, "regression scaler")?,
    })
}

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::artifact(format!("Failed to open {what} '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file).map_err(|e| {
        AppError::artifact(format!("Invalid {what} '{}': {e}", path.display()))
    })
}

/// Process-lifetime artifact state.
///
/// `NotLoaded` exists only before the one startup load; after that the
/// state is either `Loaded` (bundle usable for the rest of the process) or
/// `Failed` (fatal — no prediction action may be offered).
#[derive(Debug, Clone)]
pub enum ArtifactState {
    NotLoaded,
    Failed(String),
    Loaded(Box<ArtifactBundle>),
}

impl ArtifactState {
    /// Attempt the one-time load. Never panics past this boundary.
    pub fn load(paths: &ArtifactPaths) -> Self {
        match load_bundle(paths) {
            Ok(bundle) => ArtifactState::Loaded(Box::new(bundle)),
            Err(err) => ArtifactState::Failed(err.to_string()),
        }
    }

    pub fn bundle(&self) -> Option<&ArtifactBundle> {
        match self {
            ArtifactState::Loaded(bundle) => Some(bundle),
            _ => None,
        }
    }

    /// Convert into a usable bundle, treating anything else as fatal.
    pub fn into_bundle(self) -> Result<ArtifactBundle, AppError> {
        match self {
            ArtifactState::Loaded(bundle) => Ok(*bundle),
            ArtifactState::Failed(msg) => {
                Err(AppError::artifact(format!("Error loading model files: {msg}")))
            }
            ArtifactState::NotLoaded => {
                Err(AppError::artifact("Model artifacts were never loaded."))
            }
        }
    }
}
