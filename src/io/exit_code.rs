//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - every input scanned cleanly
//! - `1`: General error - including a batch where any file failed
//! - `3-125`: Specific recoverable errors, used in JSON payloads
//! - `126-255`: Reserved by shell

use crate::error::ScanError;

/// Standard exit codes for CLI operations.
///
/// A batch scan exits 0 only when all files succeed, and 1 otherwise; the
/// finer-grained codes identify the specific failure for single operations
/// and JSON payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error, or at least one file in a batch failed (code 1)
    GeneralError = 1,

    /// Failed to parse a file (code 4)
    ParseError = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,

    /// Operation not supported (code 8)
    UnsupportedOperation = 8,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Convert a `ScanError` to the appropriate exit code.
    pub fn from_error(error: &ScanError) -> Self {
        match error {
            ScanError::Parse { .. } => ExitCode::ParseError,
            ScanError::FileRead { .. } => ExitCode::IoError,
            ScanError::ConfigError { .. } => ExitCode::ConfigError,
            ScanError::UnsupportedFileType { .. } => ExitCode::UnsupportedOperation,
            ScanError::General(_) => ExitCode::GeneralError,
        }
    }

    /// Exit code for a whole batch: 0 only when nothing failed.
    pub fn from_failure_count(failures: usize) -> Self {
        if failures == 0 {
            ExitCode::Success
        } else {
            ExitCode::GeneralError
        }
    }

    /// Check if this exit code indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }
}
