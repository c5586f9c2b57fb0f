//! Utility modules.
//!
//! - [`paths`]: Tilde and environment-variable expansion for configured paths

pub mod paths;
