//! Navigation failures and how loudly each one is reported

use std::path::PathBuf;

use thiserror::Error;

/// How a message is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Reasons a navigation command could not open a sibling file.
///
/// None of these are fatal: each one is reported to the user and leaves
/// the editor exactly as it was.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("No active editor!")]
    NoActiveEditor,
    #[error("Couldn't find a matching file: {}", path.display())]
    TargetMissing { path: PathBuf },
    #[error("Not a tracked component file: {}", path.display())]
    UnrecognizedRole { path: PathBuf },
    #[error("No other related files to navigate to.")]
    NoCyclicTarget,
    #[error("Failed to open {}: {reason}", path.display())]
    OpenFailed { path: PathBuf, reason: String },
}

impl NavigationError {
    pub fn severity(&self) -> Severity {
        match self {
            NavigationError::NoActiveEditor | NavigationError::OpenFailed { .. } => {
                Severity::Error
            }
            NavigationError::TargetMissing { .. } | NavigationError::UnrecognizedRole { .. } => {
                Severity::Warning
            }
            NavigationError::NoCyclicTarget => Severity::Info,
        }
    }
}
