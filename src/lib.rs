//! langprune - find and remove unused translation keys
//!
//! langprune inventories a project's translation catalogs (flat `lang/*.json`
//! files and grouped `lang/<locale>/*.php` arrays), scans PHP, Blade, Vue and
//! React sources for the keys they reference, and reports or deletes the keys
//! nobody uses.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, output)
//! - `config`: Configuration file loading and resolution
//! - `core`: Catalog loading, usage scanning and pruning
//! - `logging`: Diagnostic tracing subscriber

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
