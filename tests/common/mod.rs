//! Shared fixtures for the integration tests.
//!
//! A [`Fixture`] owns a temporary directory of manifests together with the
//! script-source descriptors mapping module paths to them.

#![allow(dead_code)]

use simgen::common::{BuildEnv, Result};
use simgen::registry::Orchestrator;
use simgen::sim::ScriptSource;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Base runtime manifest declaring the root class.
pub const RUNTIME: &str = r#"
[[class]]
name = "SimObject"
abstract = true
"#;

pub struct Fixture {
    pub dir: TempDir,
    pub sources: Vec<ScriptSource>,
}

impl Fixture {
    /// Empty fixture: no modules mapped.
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
            sources: Vec::new(),
        }
    }

    /// Fixture with the base runtime module mapped.
    pub fn new() -> Self {
        let mut fixture = Self::empty();
        fixture.add("runtime", RUNTIME);
        fixture
    }

    /// Writes `text` as the manifest of `modpath` and maps it.
    pub fn add(&mut self, modpath: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(format!("{}.toml", modpath));
        fs::write(&path, text).expect("write manifest");
        self.sources.push(ScriptSource::new(modpath, path.clone()));
        path
    }

    /// Maps `objects.<name>` to a manifest declaring one class.
    pub fn add_class(&mut self, name: &str, parent: Option<&str>) -> PathBuf {
        let text = match parent {
            Some(p) => format!("[[class]]\nname = \"{}\"\nparent = \"{}\"\n", name, p),
            None => format!("[[class]]\nname = \"{}\"\n", name),
        };
        self.add(&format!("objects.{}", name), &text)
    }

    /// Maps a module path to a file that does not exist.
    pub fn map_missing(&mut self, modpath: &str) {
        let path = self.dir.path().join("missing").join(format!("{}.toml", modpath));
        self.sources.push(ScriptSource::new(modpath, path));
    }

    /// Module path to manifest path pairs, as the loader takes them.
    pub fn mapping(&self) -> Vec<(String, PathBuf)> {
        self.sources
            .iter()
            .map(|s| (s.modpath.clone(), s.srcpath.clone()))
            .collect()
    }

    pub fn build(&self, requested: &[&str]) -> Result<Orchestrator> {
        Orchestrator::new(&self.sources, requested, &BuildEnv::new())
    }

    pub fn build_with_env(&self, requested: &[&str], env: &BuildEnv) -> Result<Orchestrator> {
        Orchestrator::new(&self.sources, requested, env)
    }
}

/// Index of the first line of `text` containing `needle`.
pub fn line_of(text: &str, needle: &str) -> usize {
    text.lines()
        .position(|l| l.contains(needle))
        .unwrap_or_else(|| panic!("'{}' not found in:\n{}", needle, text))
}
