//! Discovery harness.
//!
//! Everything that touches module resolution lives here: the manifests a
//! module path maps to, the host module table, the sandboxed loader that
//! installs into it, script-source descriptors, and the end-to-end build
//! driver.

/// End-to-end generation driver.
pub mod build;

/// Sandboxed module loader.
pub mod loader;

/// Manifest format.
pub mod manifest;

/// Module values and the host module table.
pub mod module;

/// Script-source descriptors.
pub mod source;

pub use loader::Loader;
pub use manifest::Manifest;
pub use module::{Module, ModuleTable};
pub use source::ScriptSource;
