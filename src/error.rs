//! Process-level error type.
//!
//! Exit codes used across the app:
//!
//! - 2: artifact/config errors (missing or corrupt model files, bad env)
//! - 3: prediction failures in one-shot CLI mode
//! - 4: terminal/UI errors

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// An artifact could not be loaded (fatal to the session).
    pub fn artifact(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// A scaler transform or model prediction failed (local to the action).
    pub fn prediction(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Terminal setup, drawing, or event polling failed.
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
