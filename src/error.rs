use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release planning and remote operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid version format: '{text}'")]
    InvalidVersionFormat { text: String },

    #[error("Invalid repository identifier: '{text}' - expected owner/name")]
    InvalidRepositoryIdentifier { text: String },

    #[error("Repository owner mismatch: expected '{expected}', found '{actual}'")]
    OwnerMismatch { expected: String, actual: String },

    #[error("Remote fetch failed: {reason}")]
    RemoteFetchFailed { reason: String },

    /// Restoring the original origin failed. When the fetch itself had already
    /// failed, its message travels along in `fetch_error`.
    #[error("{}", restore_message(.reason, .fetch_error.as_deref()))]
    RemoteRestoreFailed {
        reason: String,
        fetch_error: Option<String>,
    },

    #[error("Not a git working copy: {}", .path.display())]
    NotAGitWorkingCopy { path: PathBuf },

    #[error("Git command `{command}` failed: {reason}")]
    GitCommand { command: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn restore_message(reason: &str, fetch_error: Option<&str>) -> String {
    match fetch_error {
        Some(fetch) => format!(
            "Failed to restore origin remote: {} (after fetch failure: {})",
            reason, fetch
        ),
        None => format!("Failed to restore origin remote: {}", reason),
    }
}

/// Convenience type alias for Results in milestone-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    pub fn invalid_version(text: impl Into<String>) -> Self {
        ReleaseError::InvalidVersionFormat { text: text.into() }
    }

    pub fn invalid_repository(text: impl Into<String>) -> Self {
        ReleaseError::InvalidRepositoryIdentifier { text: text.into() }
    }

    pub fn fetch_failed(reason: impl Into<String>) -> Self {
        ReleaseError::RemoteFetchFailed {
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Whether the error points at bad input rather than an environment failure.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ReleaseError::InvalidVersionFormat { .. }
                | ReleaseError::InvalidRepositoryIdentifier { .. }
                | ReleaseError::OwnerMismatch { .. }
        )
    }
}
