//! Usage reconciliation engine.
//!
//! - `repository`: builds the [`data::Catalog`] from the lang directory
//! - `usage`: walks source directories and collects referenced keys
//! - `pruner`: diffs the two and removes unused keys from storage
//!
//! Storage formats live in `loaders`, source dialects in `scanners`.

pub mod data;
pub mod loaders;
pub mod parsers;
pub mod pruner;
pub mod repository;
pub mod scanners;
pub mod usage;
pub mod utils;

pub use data::*;
pub use pruner::{Pruner, ScanReport};
pub use repository::TranslationRepository;
pub use usage::UsageScanner;
