//! Modules and the Host Module Table.
//!
//! The `ModuleTable` is the host environment's module-resolution state. The
//! loader installs modules into it while classes are discovered and removes
//! them again afterwards; anything the host put there itself is left alone.

use crate::common::env::BuildEnv;
use crate::sim::manifest::Manifest;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

/// A resolved module.
#[derive(Debug, Clone, PartialEq)]
pub enum Module {
    /// Virtual module exposing the build environment.
    Env(BuildEnv),
    /// Virtual package with no content of its own.
    Namespace,
    /// Manifest read from a mapped source path.
    Manifest {
        /// Path the manifest was read from.
        path: PathBuf,
        /// Parsed contents.
        manifest: Manifest,
    },
    /// Module provided by the host itself (for example native internals).
    Native,
}

/// Module-resolution state of the host environment.
#[derive(Debug, Default)]
pub struct ModuleTable {
    modules: BTreeMap<String, Rc<Module>>,
}

impl ModuleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, module: Module) {
        self.modules.insert(name.into(), Rc::new(module));
    }

    /// Resolves `name` if the table holds it.
    pub fn get(&self, name: &str) -> Option<Rc<Module>> {
        self.modules.get(name).cloned()
    }

    /// Returns `true` if `name` resolves.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Resolvable module names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Number of resolvable modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if nothing resolves.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub(crate) fn install(&mut self, name: String, module: Rc<Module>) {
        self.modules.insert(name, module);
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.modules.remove(name);
    }
}
