//! Common types shared throughout the generator.
//!
//! This module provides the error type used by every stage of generation and
//! the build-environment table that manifests and the scripting layer read.

/// Build-environment key/value table.
pub mod env;

/// Error types for fatal generation failures.
pub mod error;

pub use env::{BuildEnv, EnvValue};
pub use error::{GenError, Result};
