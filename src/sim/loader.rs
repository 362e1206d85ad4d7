//! Sandboxed Module Loader.
//!
//! The loader resolves module names against a mapping of module path to
//! manifest path and installs what it resolves into the host module table.
//! Installation is scoped: the loader holds the table by exclusive borrow, so
//! two loaders can never be installed over the same host at once, and it
//! removes everything it installed when unloaded or dropped. Prior resolution
//! state is never shadowed; a name the host already resolves is returned
//! as-is and left untouched on unload.

use crate::common::env::BuildEnv;
use crate::common::error::Result;
use crate::sim::manifest::Manifest;
use crate::sim::module::{Module, ModuleTable};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::debug;

/// Virtual module exposing the build environment.
pub const ENV_MODULE: &str = "build_env";

/// Virtual package holding one module per configuration class.
pub const OBJECTS_MODULE: &str = "objects";

/// Namespace reserved for the native core's internals.
pub const RESERVED_NAMESPACE: &str = "internal";

enum Resolution {
    Env,
    Namespace,
    Source(PathBuf),
}

/// Module loader installed over a host module table.
#[derive(Debug)]
pub struct Loader<'h> {
    host: &'h mut ModuleTable,
    sources: BTreeMap<String, PathBuf>,
    env: BuildEnv,
    installed: BTreeSet<String>,
}

impl<'h> Loader<'h> {
    /// Installs a loader over `host`.
    ///
    /// # Arguments
    ///
    /// * `host` - The module table modules are installed into.
    /// * `sources` - Module path to manifest path mapping.
    /// * `env` - Build environment exposed through [`ENV_MODULE`].
    pub fn install<I>(host: &'h mut ModuleTable, sources: I, env: BuildEnv) -> Self
    where
        I: IntoIterator<Item = (String, PathBuf)>,
    {
        let sources: BTreeMap<_, _> = sources.into_iter().collect();
        debug!(sources = sources.len(), "loader installed");
        Self {
            host,
            sources,
            env,
            installed: BTreeSet::new(),
        }
    }

    fn find(&self, name: &str) -> Option<Resolution> {
        if is_reserved(name) {
            return None;
        }
        if name == ENV_MODULE {
            return Some(Resolution::Env);
        }
        if name == OBJECTS_MODULE {
            return Some(Resolution::Namespace);
        }
        self.sources
            .get(name)
            .filter(|path| path.exists())
            .map(|path| Resolution::Source(path.clone()))
    }

    /// Resolves a module, installing it into the host table if needed.
    ///
    /// Resolvable parent packages of a dotted name are loaded first.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the name does not resolve.
    ///
    /// # Errors
    ///
    /// Fails if a mapped manifest cannot be read or parsed.
    pub fn load(&mut self, name: &str) -> Result<Option<Rc<Module>>> {
        if let Some(module) = self.host.get(name) {
            return Ok(Some(module));
        }
        let Some(resolution) = self.find(name) else {
            return Ok(None);
        };
        if let Some((package, _)) = name.rsplit_once('.') {
            self.load(package)?;
        }

        let module = match resolution {
            Resolution::Env => Module::Env(self.env.clone()),
            Resolution::Namespace => Module::Namespace,
            Resolution::Source(path) => {
                let manifest = Manifest::read(&path)?;
                Module::Manifest { path, manifest }
            }
        };
        let module = Rc::new(module);
        self.host.install(name.to_string(), module.clone());
        self.installed.insert(name.to_string());
        debug!(module = name, "module installed");
        Ok(Some(module))
    }

    /// Returns `true` if this loader installed `name`.
    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.contains(name)
    }

    /// Names this loader has installed, in order.
    pub fn installed(&self) -> impl Iterator<Item = &str> {
        self.installed.iter().map(String::as_str)
    }

    /// Removes every module this loader installed. Safe to call repeatedly.
    pub fn unload(&mut self) {
        if self.installed.is_empty() {
            return;
        }
        for name in std::mem::take(&mut self.installed) {
            self.host.remove(&name);
        }
        debug!("loader unloaded");
    }
}

impl Drop for Loader<'_> {
    fn drop(&mut self) {
        self.unload();
    }
}

fn is_reserved(name: &str) -> bool {
    name == RESERVED_NAMESPACE
        || name
            .strip_prefix(RESERVED_NAMESPACE)
            .is_some_and(|rest| rest.starts_with('.'))
}
