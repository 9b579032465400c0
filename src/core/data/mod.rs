//! Shared data types for the pruning pipeline.
//!
//! - `entry`: catalog inventory types (`LocaleEntry`, `Catalog`, key aliases)

pub mod entry;

pub use entry::*;
