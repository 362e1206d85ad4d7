//! Script-Source Descriptors.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One scripting source known to the build.
///
/// The module path is what the loader resolves; the archive name is the
/// member name the compiled form gets inside the bundle, independent of where
/// the compiled file lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    /// Logical module path (`objects.BaseCPU`).
    pub modpath: String,
    /// Path of the source file.
    pub srcpath: PathBuf,
    /// Member name inside the bundle archive.
    pub arcname: String,
    /// Path of the compiled form.
    pub compiled: PathBuf,
    /// Whether the compiled form goes into the bundle.
    pub package: bool,
}

impl ScriptSource {
    /// Creates a descriptor with derived archive name and compiled path.
    ///
    /// The archive name is the module path with dots turned into slashes plus
    /// the source's extension; the compiled path is the source path with a
    /// `c` appended.
    pub fn new(modpath: impl Into<String>, srcpath: impl Into<PathBuf>) -> Self {
        let modpath = modpath.into();
        let srcpath = srcpath.into();
        let arcname = default_arcname(&modpath, &srcpath);
        let compiled = compiled_beside(&srcpath);
        Self {
            modpath,
            srcpath,
            arcname,
            compiled,
            package: true,
        }
    }

    /// Overrides the archive member name.
    pub fn with_arcname(mut self, arcname: impl Into<String>) -> Self {
        self.arcname = arcname.into();
        self
    }

    /// Overrides the compiled path.
    pub fn with_compiled(mut self, compiled: impl Into<PathBuf>) -> Self {
        self.compiled = compiled.into();
        self
    }

    /// Excludes the source from the bundle.
    pub fn unpackaged(mut self) -> Self {
        self.package = false;
        self
    }
}

/// Archive name derived from a module path and the source's extension.
pub fn default_arcname(modpath: &str, srcpath: &Path) -> String {
    let base = modpath.replace('.', "/");
    match srcpath.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", base, ext),
        None => base,
    }
}

fn compiled_beside(srcpath: &Path) -> PathBuf {
    let mut name = OsString::from(srcpath.as_os_str());
    name.push("c");
    PathBuf::from(name)
}
