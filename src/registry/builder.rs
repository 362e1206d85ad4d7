//! Orchestrator.
//!
//! The orchestrator discovers configuration classes through the sandboxed
//! loader and publishes three read-only registries: classes, enumerations,
//! and parameter types that need a foreign-binding declaration. Discovery is
//! all-or-nothing; any failure aborts construction and nothing is published.

use crate::common::env::{BuildEnv, EnvValue};
use crate::common::error::{GenError, Result};
use crate::model::class::ConfigClass;
use crate::model::enums::Enumeration;
use crate::model::param::{Param, ParamType};
use crate::model::ROOT_CLASS;
use crate::registry::order::order_classes;
use crate::sim::loader::{Loader, ENV_MODULE, OBJECTS_MODULE};
use crate::sim::manifest::{ClassDecl, Manifest, ParamDecl};
use crate::sim::module::{Module, ModuleTable};
use crate::sim::source::ScriptSource;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Base runtime module imported before any requested class.
pub const BASE_MODULE: &str = "runtime";

/// Populated class, enumeration and parameter-type registries.
#[derive(Debug, Clone, PartialEq)]
pub struct Orchestrator {
    classes: BTreeMap<String, ConfigClass>,
    enums: BTreeMap<String, Enumeration>,
    param_types: BTreeMap<String, ParamType>,
}

impl Orchestrator {
    /// Discovers `requested` classes over a private host module table.
    ///
    /// # Arguments
    ///
    /// * `sources` - Script sources; their module paths are what the loader resolves.
    /// * `requested` - Configuration classes to discover.
    /// * `env` - Build environment.
    ///
    /// # Errors
    ///
    /// Any unresolved requested class, missing root, unknown parent, duplicate
    /// declaration, bad parameter type or unreadable manifest is fatal.
    pub fn new<S: AsRef<str>>(
        sources: &[ScriptSource],
        requested: &[S],
        env: &BuildEnv,
    ) -> Result<Self> {
        let mut host = ModuleTable::new();
        Self::with_host(&mut host, sources, requested, env)
    }

    /// Discovers `requested` classes, installing modules into `host` only for
    /// the duration of discovery.
    ///
    /// On return, successful or not, `host` resolves exactly what it resolved
    /// before the call.
    pub fn with_host<S: AsRef<str>>(
        host: &mut ModuleTable,
        sources: &[ScriptSource],
        requested: &[S],
        env: &BuildEnv,
    ) -> Result<Self> {
        let mut loader = Loader::install(
            host,
            sources
                .iter()
                .map(|s| (s.modpath.clone(), s.srcpath.clone())),
            env.clone(),
        );
        let discovered = Discovery::run(&mut loader, requested);
        loader.unload();
        drop(loader);

        let (classes, enums, env) = discovered?;
        let orchestrator = Self::assemble(classes, enums, &env)?;
        info!(
            classes = orchestrator.classes.len(),
            enums = orchestrator.enums.len(),
            param_types = orchestrator.param_types.len(),
            "registries built"
        );
        Ok(orchestrator)
    }

    fn assemble(
        pending: BTreeMap<String, Pending>,
        enums: BTreeMap<String, Enumeration>,
        env: &BuildEnv,
    ) -> Result<Self> {
        let known: BTreeSet<String> = pending.keys().cloned().collect();
        let is_enum = |name: &str| enums.contains_key(name);
        let is_class = |name: &str| known.contains(name);
        let mut classes = BTreeMap::new();
        for (name, pending) in pending {
            let class = pending.resolve(env, &is_enum, &is_class)?;
            classes.insert(name, class);
        }

        let names: Vec<String> = classes.keys().cloned().collect();
        let order: Vec<String> = order_classes(&classes, &names)?
            .into_iter()
            .map(|c| c.name.clone())
            .collect();
        for name in &order {
            let inherited = classes
                .get(name)
                .and_then(|c| c.parent.as_deref())
                .and_then(|p| classes.get(p))
                .map(|p| p.all_params.clone())
                .unwrap_or_default();
            if let Some(class) = classes.get_mut(name) {
                let mut all = inherited;
                for param in &class.params {
                    match all.iter_mut().find(|p| p.name == param.name) {
                        Some(slot) => *slot = param.clone(),
                        None => all.push(param.clone()),
                    }
                }
                class.all_params = all;
            }
        }

        // Types resolve against the global registries, so one type name has
        // exactly one shape and the first registration is as good as any.
        let mut param_types: BTreeMap<String, ParamType> = BTreeMap::new();
        for class in classes.values() {
            for param in class.params.iter().filter(|p| p.ptype.needs_binding()) {
                param_types
                    .entry(param.ptype.name().to_string())
                    .or_insert_with(|| param.ptype.clone());
            }
        }

        Ok(Self {
            classes,
            enums,
            param_types,
        })
    }

    /// Looks up a registered class.
    pub fn class(&self, name: &str) -> Result<&ConfigClass> {
        self.classes
            .get(name)
            .ok_or_else(|| GenError::UnknownClass(name.to_string()))
    }

    /// Looks up a registered enumeration.
    pub fn enumeration(&self, name: &str) -> Result<&Enumeration> {
        self.enums
            .get(name)
            .ok_or_else(|| GenError::UnknownEnum(name.to_string()))
    }

    /// Looks up a binding-eligible parameter type.
    pub fn param_type(&self, name: &str) -> Result<&ParamType> {
        self.param_types
            .get(name)
            .ok_or_else(|| GenError::UnknownParamType(name.to_string()))
    }

    /// Registered classes in name order.
    pub fn classes(&self) -> impl Iterator<Item = &ConfigClass> {
        self.classes.values()
    }

    /// Registered enumerations in name order.
    pub fn enums(&self) -> impl Iterator<Item = &Enumeration> {
        self.enums.values()
    }

    /// Binding-eligible parameter types in name order.
    pub fn param_types(&self) -> impl Iterator<Item = &ParamType> {
        self.param_types.values()
    }

    /// Orders `names` and their ancestors parent-first.
    pub fn order<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&ConfigClass>> {
        order_classes(&self.classes, names)
    }
}

#[derive(Debug)]
struct Pending {
    decl: ClassDecl,
    module: String,
}

impl Pending {
    fn parent(&self) -> Option<&str> {
        if self.decl.name == ROOT_CLASS {
            None
        } else {
            Some(self.decl.parent.as_deref().unwrap_or(ROOT_CLASS))
        }
    }

    fn resolve(
        self,
        env: &BuildEnv,
        is_enum: &dyn Fn(&str) -> bool,
        is_class: &dyn Fn(&str) -> bool,
    ) -> Result<ConfigClass> {
        let mut params = Vec::with_capacity(self.decl.params.len());
        for decl in &self.decl.params {
            if let Some(key) = &decl.when {
                let enabled = env.get(key).map(EnvValue::is_truthy).ok_or_else(|| {
                    GenError::UnknownEnvKey {
                        class: self.decl.name.clone(),
                        param: decl.name.clone(),
                        key: key.clone(),
                    }
                })?;
                if !enabled {
                    continue;
                }
            }
            let ptype = ParamType::parse(&decl.ty, is_enum).ok_or_else(|| {
                GenError::InvalidParamType {
                    class: self.decl.name.clone(),
                    param: decl.name.clone(),
                    ty: decl.ty.clone(),
                }
            })?;
            if ptype.object_name().is_some_and(|o| !is_class(o)) {
                return Err(GenError::UnknownParamClass {
                    class: self.decl.name.clone(),
                    param: decl.name.clone(),
                    ty: decl.ty.clone(),
                });
            }
            params.push(Param {
                name: decl.name.clone(),
                ptype,
                desc: decl.desc.clone(),
                default: decl.default_text(),
            });
        }

        let parent = self.parent().map(str::to_string);
        let decl = self.decl;
        Ok(ConfigClass {
            cxx_class: decl.cxx_class.unwrap_or_else(|| decl.name.clone()),
            name: decl.name,
            parent,
            params,
            namespace: decl.namespace,
            custom_decl: decl.decl,
            is_abstract: decl.is_abstract,
            module: self.module,
            all_params: Vec::new(),
        })
    }
}

type Discovered = (BTreeMap<String, Pending>, BTreeMap<String, Enumeration>, BuildEnv);

/// Import walk driven through an installed loader.
struct Discovery<'l, 'h> {
    loader: &'l mut Loader<'h>,
    env: BuildEnv,
    visited: BTreeSet<String>,
    classes: BTreeMap<String, Pending>,
    enums: BTreeMap<String, Enumeration>,
}

impl<'l, 'h> Discovery<'l, 'h> {
    fn run<S: AsRef<str>>(loader: &'l mut Loader<'h>, requested: &[S]) -> Result<Discovered> {
        let env = match loader.load(ENV_MODULE)?.as_deref() {
            Some(Module::Env(env)) => env.clone(),
            _ => {
                return Err(GenError::MalformedEnv(format!(
                    "module '{}' does not expose an environment table",
                    ENV_MODULE
                )))
            }
        };

        let mut discovery = Self {
            loader,
            env,
            visited: BTreeSet::new(),
            classes: BTreeMap::new(),
            enums: BTreeMap::new(),
        };

        if !discovery.import_module(BASE_MODULE)? || !discovery.classes.contains_key(ROOT_CLASS) {
            return Err(GenError::MissingRoot {
                module: BASE_MODULE.to_string(),
                root: ROOT_CLASS.to_string(),
            });
        }

        let mut requested: Vec<&str> = requested.iter().map(AsRef::as_ref).collect();
        requested.sort_unstable();
        requested.dedup();
        for name in requested {
            if !discovery.classes.contains_key(name) {
                discovery.import_module(&format!("{}.{}", OBJECTS_MODULE, name))?;
            }
            if !discovery.classes.contains_key(name) {
                return Err(GenError::UnresolvedClass(name.to_string()));
            }
        }

        Ok((discovery.classes, discovery.enums, discovery.env))
    }

    /// Imports a module once. Returns `false` if it does not resolve.
    fn import_module(&mut self, name: &str) -> Result<bool> {
        if self.visited.contains(name) {
            return Ok(true);
        }
        let Some(module) = self.loader.load(name)? else {
            return Ok(false);
        };
        self.visited.insert(name.to_string());
        if let Module::Manifest { manifest, .. } = module.as_ref() {
            debug!(module = name, "importing manifest");
            self.register(name, manifest)?;
        }
        Ok(true)
    }

    fn register(&mut self, module: &str, manifest: &Manifest) -> Result<()> {
        for import in &manifest.imports {
            if !self.import_module(import)? {
                return Err(GenError::UnresolvedImport {
                    module: import.clone(),
                    importer: module.to_string(),
                });
            }
        }

        for decl in &manifest.enums {
            if self.enums.contains_key(&decl.name) {
                return Err(GenError::DuplicateEnum(decl.name.clone()));
            }
            self.enums.insert(decl.name.clone(), decl.to_enumeration()?);
        }

        for decl in &manifest.classes {
            if let Some(existing) = self.classes.get(&decl.name) {
                return Err(GenError::DuplicateClass {
                    name: decl.name.clone(),
                    first: existing.module.clone(),
                    second: module.to_string(),
                });
            }
            if decl.name == ROOT_CLASS && decl.parent.is_some() {
                warn!(module = module, "root class declares a parent; ignoring it");
            }
            self.classes.insert(
                decl.name.clone(),
                Pending {
                    decl: decl.clone(),
                    module: module.to_string(),
                },
            );
        }

        for decl in &manifest.classes {
            let parent = match self.classes.get(&decl.name).and_then(Pending::parent) {
                Some(parent) => parent.to_string(),
                None => continue,
            };
            if !self.classes.contains_key(&parent) {
                self.import_module(&format!("{}.{}", OBJECTS_MODULE, parent))?;
            }
            if !self.classes.contains_key(&parent) {
                return Err(GenError::UnknownParent {
                    class: decl.name.clone(),
                    parent,
                });
            }
        }

        // Classes named by parameter types. A name that still does not
        // resolve may be an enumeration imported later; resolution decides.
        let is_enum = |name: &str| self.enums.contains_key(name);
        let targets: Vec<String> = manifest
            .classes
            .iter()
            .flat_map(|decl| decl.params.iter())
            .filter(|param| self.guard_enabled(param))
            .filter_map(|param| ParamType::parse(&param.ty, &is_enum))
            .filter_map(|ptype| ptype.object_name().map(str::to_string))
            .collect();
        for target in targets {
            if !self.classes.contains_key(&target) {
                self.import_module(&format!("{}.{}", OBJECTS_MODULE, target))?;
            }
        }

        Ok(())
    }

    /// Unknown keys count as enabled here; resolution reports them.
    fn guard_enabled(&self, param: &ParamDecl) -> bool {
        param
            .when
            .as_ref()
            .and_then(|key| self.env.get(key))
            .map_or(true, EnvValue::is_truthy)
    }
}
