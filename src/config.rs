//! Configuration module for the declaration scanner.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DECLSCAN_` and use double
//! underscores to separate nested levels:
//! - `DECLSCAN_SCANNER__PARALLEL_THREADS=8` sets `scanner.parallel_threads`
//! - `DECLSCAN_OUTPUT__FORMAT=json` sets `output.format`
//! - `DECLSCAN_DEBUG=true` sets `debug`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

static GLOBAL_DEBUG: AtomicBool = AtomicBool::new(false);

/// Set the process-wide debug flag used by the `debug_print!` macro.
pub fn set_global_debug(enabled: bool) {
    GLOBAL_DEBUG.store(enabled, Ordering::Relaxed);
}

pub fn is_global_debug_enabled() -> bool {
    GLOBAL_DEBUG.load(Ordering::Relaxed)
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Workspace root directory (where .declscan is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Scanner configuration
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScannerConfig {
    /// Number of parallel threads for batch scanning
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,

    /// File extensions accepted as C/C++ input
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Default output format: "text" or "json"
    #[serde(default = "default_output_format")]
    pub format: String,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_false() -> bool {
    false
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_extensions() -> Vec<String> {
    ["cpp", "cc", "cxx", "hpp", "hh", "c", "h"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_output_format() -> String {
    "text".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            debug: false,
            scanner: ScannerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
            extensions: default_extensions(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(".declscan/settings.toml"));
        Self::load_from(&config_path)
    }

    /// Load configuration with an explicit settings file
    pub fn load_from(config_path: &Path) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Layer in environment variables with DECLSCAN_ prefix
            // Double underscore (__) separates nested levels
            .merge(Env::prefixed("DECLSCAN_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Find the workspace root by looking for a .declscan directory,
    /// searching from the current directory up to the filesystem root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(".declscan");
            if config_dir.is_dir() {
                return Some(config_dir.join("settings.toml"));
            }
        }

        None
    }

    fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        current
            .ancestors()
            .find(|a| a.join(".declscan").is_dir())
            .map(Path::to_path_buf)
    }

    /// Check if configuration is properly initialized
    pub fn check_init() -> Result<(), String> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(".declscan/settings.toml"));

        if !config_path.exists() {
            return Err("No configuration file found. Run 'declscan init' first.".to_string());
        }
        Ok(())
    }

    /// Write the default settings file, creating .declscan if needed
    pub fn init_config_file(force: bool) -> Result<PathBuf, String> {
        let config_dir = PathBuf::from(".declscan");
        let config_path = config_dir.join("settings.toml");

        if config_path.exists() && !force {
            return Err(format!(
                "Configuration file already exists at: {}",
                config_path.display()
            ));
        }

        std::fs::create_dir_all(&config_dir)
            .map_err(|e| format!("Failed to create {}: {e}", config_dir.display()))?;

        let defaults = Settings::default();
        let toml_str = toml::to_string_pretty(&defaults)
            .map_err(|e| format!("Failed to serialize default settings: {e}"))?;

        std::fs::write(&config_path, toml_str)
            .map_err(|e| format!("Failed to write {}: {e}", config_path.display()))?;

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert!(!settings.debug);
        assert!(settings.scanner.parallel_threads >= 1);
        assert!(settings.scanner.extensions.contains(&"cpp".to_string()));
        assert!(settings.scanner.extensions.contains(&"h".to_string()));
        assert_eq!(settings.output.format, "text");
    }

    #[test]
    fn test_settings_round_trip_toml() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.version, settings.version);
        assert_eq!(parsed.scanner.extensions, settings.scanner.extensions);
    }

    #[test]
    fn test_global_debug_flag() {
        set_global_debug(true);
        assert!(is_global_debug_enabled());
        set_global_debug(false);
        assert!(!is_global_debug_enabled());
    }
}
