//! Per-file scan reports.

use super::scanner::CppScanner;
use crate::error::{ScanError, ScanResult};
use crate::types::Symbol;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Language detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    C,
    #[serde(rename = "C++")]
    Cpp,
}

impl Language {
    /// `.c`/`.h` map to C, every other configured extension to C++.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "c" | "h" => Language::C,
            _ => Language::Cpp,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan result for one input file.
///
/// Produced fresh per file and immutable afterwards; holds no resources
/// beyond its own buffers.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Language,
    /// Total line count of the input, independent of symbol count
    pub lines: usize,
    pub symbols: Vec<Symbol>,
    pub includes: Vec<String>,
}

impl FileReport {
    /// Read a file and scan it. The failing file's partial result is
    /// discarded; callers decide whether the batch continues.
    pub fn from_path(path: &Path) -> ScanResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ScanError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(path, &text)
    }

    /// Scan already-loaded source text under the given path label.
    pub fn from_source(path: &Path, text: &str) -> ScanResult<Self> {
        let scan = CppScanner::new()
            .scan(text)
            .map_err(|source| ScanError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            symbols = scan.symbols.len(),
            includes = scan.includes.len(),
            "scanned file"
        );

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Ok(Self {
            path: path.to_path_buf(),
            language: Language::from_extension(extension),
            lines: text.lines().count(),
            symbols: scan.symbols,
            includes: scan.includes,
        })
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}, {} lines, {} symbols)",
            self.path.display(),
            self.language,
            self.lines,
            self.symbols.len()
        )?;
        if !self.includes.is_empty() {
            writeln!(f, "  includes: {}", self.includes.join(", "))?;
        }
        for symbol in &self.symbols {
            writeln!(f, "  {symbol}")?;
        }
        Ok(())
    }
}
