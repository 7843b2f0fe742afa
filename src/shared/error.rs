use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let scripts distinguish a failed installer from a refused
/// action and from an infrastructure problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the command completed and any action succeeded
    Success = 0,
    /// An installer or uninstaller ran but reported failure
    ActionFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (catalog unreachable, file I/O error, etc.)
    ApplicationError = 3,
    /// The action was refused before any process was started
    ActionRejected = 4,
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
            ExitCode::ActionFailed => write!(f, "Action Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::ActionRejected => write!(f, "Action Rejected (4)"),
        }
    }
}

/// Application-specific errors.
///
/// Uses thiserror to derive Display and Error; every variant carries a hint
/// that the CLI prints alongside the cause chain.
#[derive(Debug, Error)]
pub enum SoftkeeperError {
    #[error("Catalog request failed: {url}\nDetails: {details}\n\n💡 Hint: Check the catalog URL and that the catalog service is reachable")]
    CatalogRequest { url: String, details: String },

    #[error("Failed to parse catalog data from {source_name}\nDetails: {details}\n\n💡 Hint: The catalog must be a JSON array of software records")]
    CatalogParse { source_name: String, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Software not found: {name}\n\n💡 Hint: {hint}")]
    SoftwareNotFound { name: String, hint: String },

    #[error("No catalog source configured\n\n💡 Hint: Pass --catalog-url or --catalog-file, or set catalogUrl in the config file")]
    CatalogSourceMissing,

    /// Validation error for user-supplied values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
