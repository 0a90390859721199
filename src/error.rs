//! Error types for the declaration scanner
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scan operations at the file/batch level.
///
/// Per-file variants render as one `<file>: <reason>` line, which is the
/// exact shape the CLI prints to stderr for each failing file.
#[derive(Error, Debug)]
pub enum ScanError {
    /// File system errors
    #[error("{path}: failed to read file: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: unsupported file type '{extension}'")]
    UnsupportedFileType { path: PathBuf, extension: String },

    /// Parse failure for one input file; the partial result is discarded
    #[error("{path}: {source}")]
    Parse { path: PathBuf, source: ParseError },

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    /// General errors for cases where we need to preserve existing behavior
    #[error("{0}")]
    General(String),
}

impl ScanError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::General(_) => "GENERAL_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
                "Ensure the file is valid UTF-8",
            ],
            Self::UnsupportedFileType { .. } => vec![
                "Add the extension to scanner.extensions in .declscan/settings.toml",
            ],
            Self::Parse { .. } => vec![
                "Check the file for unbalanced braces or an unterminated comment/literal",
                "declscan expects syntactically plausible C/C++ snippets",
            ],
            Self::ConfigError { .. } => vec![
                "Run 'declscan init --force' to regenerate the default settings",
            ],
            _ => vec![],
        }
    }
}

/// Errors specific to scanning one source text
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unbalanced braces: {open} scope(s) still open at end of input (line {line})")]
    UnbalancedBraces { open: usize, line: u32 },

    #[error("unexpected closing brace at line {line}")]
    UnexpectedClosingBrace { line: u32 },

    #[error("unterminated block comment starting at line {line}")]
    UnterminatedBlockComment { line: u32 },

    #[error("unterminated {kind} literal starting at line {line}")]
    UnterminatedLiteral { kind: &'static str, line: u32 },

    #[error("missing name for {construct} at line {line}")]
    MissingName {
        construct: &'static str,
        line: u32,
    },
}

impl ParseError {
    /// Line the error was detected on, for per-file diagnostics.
    pub fn line(&self) -> u32 {
        match self {
            Self::UnbalancedBraces { line, .. }
            | Self::UnexpectedClosingBrace { line }
            | Self::UnterminatedBlockComment { line }
            | Self::UnterminatedLiteral { line, .. }
            | Self::MissingName { line, .. } => *line,
        }
    }
}

/// Result type alias for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_stable() {
        let err = ScanError::Parse {
            path: PathBuf::from("demo.cpp"),
            source: ParseError::UnexpectedClosingBrace { line: 3 },
        };
        assert_eq!(err.status_code(), "PARSE_ERROR");
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_parse_error_line() {
        let err = ParseError::UnterminatedLiteral {
            kind: "string",
            line: 12,
        };
        assert_eq!(err.line(), 12);
        assert_eq!(
            err.to_string(),
            "unterminated string literal starting at line 12"
        );
    }
}
