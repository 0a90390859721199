//! C/C++ declaration scanning.
//!
//! A lightweight, statement-oriented scanner for C/C++ snippets. It blanks
//! comments and literals, tracks namespace/type/function scopes with a
//! brace-depth stack, and records top-level and namespace-scoped
//! declarations. It is intentionally not a compiler front end: member
//! declarations, preprocessor expansion, and semantic analysis are out of
//! scope.

pub mod report;
pub mod scanner;
pub mod source;

pub use report::{FileReport, Language};
pub use scanner::{CppScanner, Scan};
