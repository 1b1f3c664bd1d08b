use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a policy failure
/// and a broken invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no violations, or the fail policy let them through
    Success = 0,
    /// Policy violations were found and the fail policy demands a stop
    PolicyViolation = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (snapshot, network, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PolicyViolation => write!(f, "Policy Violation (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency collection and policy checks.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Project snapshot not found: {path}\n\n💡 Hint: {suggestion}")]
    SnapshotNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse project snapshot: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the snapshot was exported by a compatible build plugin")]
    SnapshotParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid path: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing regular file")]
    InvalidPath { path: PathBuf, reason: String },

    /// Validation error for configuration values and builders
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Dependency policy failed: {license_violations} license violation(s), {vulnerability_violations} vulnerability violation(s)\n\n💡 Hint: See the violation list above for details")]
    PolicyViolation {
        license_violations: usize,
        vulnerability_violations: usize,
    },
}
