//! Build Configuration.
//!
//! The generator is driven by a TOML file listing the requested classes, the
//! scripting sources, the environment table and the auxiliary inputs. Relative
//! paths are resolved against `root`, which itself is resolved against the
//! directory holding the configuration file.

use crate::common::env::BuildEnv;
use crate::common::error::{GenError, Result};
use crate::sim::source::{default_arcname, ScriptSource};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_OUT_DIR: &str = "build";
const DEFAULT_BUNDLE: &str = "objects.zip";

/// Top-level build configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Requested configuration classes.
    #[serde(default)]
    pub objects: Vec<String>,

    /// Binding sub-modules chained by the initializer.
    #[serde(default = "default_swig_modules")]
    pub swig_modules: Vec<String>,

    /// Trace flag list. Flag tables are skipped when absent.
    #[serde(default)]
    pub flags: Option<PathBuf>,

    /// Files embedded in the info module.
    #[serde(default)]
    pub info_files: Vec<PathBuf>,

    #[serde(default)]
    pub env: toml::Table,

    #[serde(default, rename = "source")]
    pub sources: Vec<SourceConfig>,

    /// Bundle archive, relative to `out_dir`.
    #[serde(default = "default_bundle")]
    pub bundle: PathBuf,

    /// Tree probed for provenance. Defaults to `root`.
    #[serde(default)]
    pub provenance: Option<PathBuf>,
}

/// One `[[source]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub modpath: String,
    pub srcpath: PathBuf,
    #[serde(default)]
    pub arcname: Option<String>,
    #[serde(default)]
    pub compiled: Option<PathBuf>,
    #[serde(default = "default_package")]
    pub package: bool,
}

impl BuildConfig {
    /// Parses a configuration from TOML text without touching the filesystem.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| GenError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads the configuration at `path` and anchors `root` to its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let mut config = Self::parse(path, &text)?;
        if config.root.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.root = base.join(&config.root);
        }
        Ok(config)
    }

    /// Resolves `path` against `root`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Absolute-or-root-relative output directory.
    pub fn out_dir(&self) -> PathBuf {
        self.resolve(&self.out_dir)
    }

    /// Parsed build environment.
    pub fn env(&self) -> Result<BuildEnv> {
        BuildEnv::from_table(&self.env)
    }

    /// Script-source descriptors with every path resolved.
    ///
    /// A missing archive name is derived from the module path; a missing
    /// compiled path is `<out_dir>/<arcname>c`.
    pub fn script_sources(&self) -> Vec<ScriptSource> {
        let out_dir = self.out_dir();
        self.sources
            .iter()
            .map(|s| {
                let srcpath = self.resolve(&s.srcpath);
                let arcname = s
                    .arcname
                    .clone()
                    .unwrap_or_else(|| default_arcname(&s.modpath, &srcpath));
                let compiled = match &s.compiled {
                    Some(c) => self.resolve(c),
                    None => out_dir.join(format!("{}c", arcname)),
                };
                ScriptSource {
                    modpath: s.modpath.clone(),
                    srcpath,
                    arcname,
                    compiled,
                    package: s.package,
                }
            })
            .collect()
    }

    /// Flag list path, resolved.
    pub fn flags_path(&self) -> Option<PathBuf> {
        self.flags.as_deref().map(|p| self.resolve(p))
    }

    /// Bundle archive path, resolved.
    pub fn bundle_path(&self) -> PathBuf {
        self.out_dir().join(&self.bundle)
    }

    /// Tree probed for provenance, resolved.
    pub fn provenance_dir(&self) -> PathBuf {
        match &self.provenance {
            Some(p) => self.resolve(p),
            None => self.root.clone(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUT_DIR)
}

fn default_swig_modules() -> Vec<String> {
    vec!["params".to_string()]
}

fn default_bundle() -> PathBuf {
    PathBuf::from(DEFAULT_BUNDLE)
}

fn default_package() -> bool {
    true
}
