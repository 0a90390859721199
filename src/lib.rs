/// The main library module for declscan
// Debug macro for consistent debug output
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        if $crate::config::is_global_debug_enabled() {
            eprintln!("DEBUG: {}", format!($($arg)*));
        }
    };
}

pub mod config;
pub mod error;
pub mod io;
pub mod scanning;
pub mod types;

// Explicit exports for better API clarity
pub use config::Settings;
pub use error::{ParseError, ParseResult, ScanError, ScanResult};
pub use scanning::{CppScanner, FileReport, Language, Scan};
pub use types::{CompactString, Symbol, SymbolKind, compact_string};
