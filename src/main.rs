//! CLI entry point for the declaration scanner.
//!
//! Provides commands for scanning C/C++ snippet files and inspecting the
//! active configuration. Main components: Cli parser, Commands enum, and the
//! parallel batch driver.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use declscan::config::set_global_debug;
use declscan::debug_print;
use declscan::io::{ExitCode, OutputFormat, OutputManager};
use declscan::scanning::FileReport;
use declscan::{ScanError, Settings};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// C/C++ declaration scanner
#[derive(Parser)]
#[command(
    name = "declscan",
    version = env!("CARGO_PKG_VERSION"),
    about = "C/C++ declaration scanner",
    long_about = "Scan C/C++ snippet files and report the declared symbols: \
                  namespaces, classes, structs, enums, aliases, and functions.",
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Initialize project
    #[command(about = "Set up .declscan directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Scan files or directories for declarations
    #[command(
        about = "Scan C/C++ files and report declared symbols",
        after_help = "Examples:\n  declscan scan demo.cpp\n  declscan scan src include --json\n  declscan scan tests/codes --threads 4\n\nExit codes:\n  0  every file scanned cleanly\n  1  at least one file failed"
    )]
    Scan {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Emit JSON instead of human-readable text
        #[arg(long)]
        json: bool,

        /// Number of threads to use (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .declscan/settings.toml")]
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Warn when running without a settings file; scanning still works
    if !matches!(cli.command, Commands::Init { .. })
        && cli.config.is_none()
        && let Err(warning) = Settings::check_init()
    {
        debug_print!("{warning}");
    }

    let config = if let Some(config_path) = &cli.config {
        Settings::load_from(config_path).unwrap_or_else(|e| {
            eprintln!(
                "Configuration error loading from {}: {}",
                config_path.display(),
                e
            );
            std::process::exit(ExitCode::ConfigError.into());
        })
    } else {
        Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        })
    };
    set_global_debug(config.debug);

    match cli.command {
        Commands::Init { force } => {
            match Settings::init_config_file(force) {
                Ok(path) => {
                    println!("Created configuration file at: {}", path.display());
                    println!("Edit this file to customize your settings.");
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(ExitCode::ConfigError.into());
                }
            }
        }

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            match toml::to_string_pretty(&config) {
                Ok(toml_str) => println!("{toml_str}"),
                Err(e) => {
                    eprintln!("Error displaying config: {e}");
                    std::process::exit(ExitCode::ConfigError.into());
                }
            }
        }

        Commands::Scan {
            paths,
            json,
            threads,
        } => {
            let code = run_scan(&config, &paths, json, threads);
            std::process::exit(code.into());
        }
    }
}

/// Scan a batch of files, output per-file reports in input order, and
/// compute the batch exit code (0 only when every file succeeded).
fn run_scan(
    config: &Settings,
    paths: &[PathBuf],
    json: bool,
    threads: Option<usize>,
) -> ExitCode {
    let format = OutputFormat::from_json_flag(json || config.output.format == "json");
    let mut out = OutputManager::new(format);

    let files = collect_input_files(paths, &config.scanner.extensions);
    if files.is_empty() {
        let _ = out.progress("No input files found");
        return ExitCode::Success;
    }
    debug_print!("scanning {} file(s)", files.len());

    let threads = threads.unwrap_or(config.scanner.parallel_threads).max(1);
    let results: Vec<Result<FileReport, ScanError>> =
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| {
                files
                    .par_iter()
                    .map(|path| scan_one(path, &config.scanner.extensions))
                    .collect()
            }),
            Err(e) => {
                tracing::warn!("failed to build thread pool ({e}), scanning sequentially");
                files
                    .iter()
                    .map(|path| scan_one(path, &config.scanner.extensions))
                    .collect()
            }
        };

    let mut failures = 0;
    for result in &results {
        let written = match result {
            Ok(report) => out.success(report),
            Err(error) => {
                failures += 1;
                out.error(error)
            }
        };
        if let Err(e) = written {
            eprintln!("Failed to write output: {e}");
            return ExitCode::GeneralError;
        }
    }

    ExitCode::from_failure_count(failures)
}

/// Scan one file after checking its extension against the configuration.
fn scan_one(path: &Path, extensions: &[String]) -> Result<FileReport, ScanError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !extensions.iter().any(|e| e.eq_ignore_ascii_case(extension)) {
        return Err(ScanError::UnsupportedFileType {
            path: path.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    FileReport::from_path(path)
}

/// Expand the given paths into a file list. Directories are walked in
/// sorted order and filtered by the configured extensions; explicit files
/// are taken as-is and validated later.
fn collect_input_files(paths: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                let matches = entry
                    .path()
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
                if matches {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files
}
