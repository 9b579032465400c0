//! Parsers for catalog file formats that serde does not cover.
//!
//! - `php`: PHP `return [...]` translation files (read and write)

pub mod php;
