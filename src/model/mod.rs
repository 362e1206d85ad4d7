//! Registry data model.
//!
//! Descriptors produced during discovery: configuration classes, their typed
//! parameters, enumerations, and the trace flags fed to the flag-table
//! emitters.

/// Configuration class descriptors.
pub mod class;

/// Enumeration descriptors.
pub mod enums;

/// Trace/debug flag descriptors.
pub mod flags;

/// Typed parameters and parameter types.
pub mod param;

pub use class::ConfigClass;
pub use enums::{EnumValue, Enumeration};
pub use flags::TraceFlag;
pub use param::{Param, ParamKind, ParamType, Scalar};

/// Name of the sentinel root of the class hierarchy.
pub const ROOT_CLASS: &str = "SimObject";
