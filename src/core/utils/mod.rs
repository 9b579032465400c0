//! Utility functions and helpers for the pruning pipeline.
//!
//! - `glob_matcher`: wildcard patterns protecting keys from pruning

pub mod glob_matcher;

pub use glob_matcher::*;
