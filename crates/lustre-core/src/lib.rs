//! Lustre Core: shared error type and small utilities.
//!
//! This crate has no internal lustre dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error type and Result alias
//! - [`util`]: Path expansion helpers

pub mod error;
pub mod util;

pub use error::{Error, Result};
pub use util::paths::expand_path;
