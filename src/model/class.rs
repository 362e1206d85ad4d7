//! Configuration Classes.

use crate::model::param::Param;
use crate::model::ROOT_CLASS;

/// A registered configuration class.
///
/// Describes one simulated component: its place in the single-inheritance
/// hierarchy and the parameters it declares. Instances are immutable once the
/// orchestrator publishes its registries.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigClass {
    /// Unique class name.
    pub name: String,
    /// Parent class name. `None` only for the root.
    pub parent: Option<String>,
    /// Locally declared parameters, in declaration order.
    pub params: Vec<Param>,
    /// Native namespace the class lives in, if any.
    pub namespace: Option<String>,
    /// Native class name (defaults to `name`).
    pub cxx_class: String,
    /// Literal binding declaration replacing the synthesized stub.
    pub custom_decl: Option<Vec<String>>,
    /// Abstract classes get no factory method.
    pub is_abstract: bool,
    /// Module path of the manifest that declared the class.
    pub module: String,
    /// Inherited parameters followed by local ones, overrides resolved.
    pub all_params: Vec<Param>,
}

impl ConfigClass {
    /// Returns `true` for the sentinel root class.
    pub fn is_root(&self) -> bool {
        self.name == ROOT_CLASS && self.parent.is_none()
    }

    /// Native class name qualified with its namespace.
    pub fn qualified_cxx(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}::{}", ns, self.cxx_class),
            None => self.cxx_class.clone(),
        }
    }

    /// Name of the generated parameter struct.
    pub fn params_struct(&self) -> String {
        format!("{}Params", self.name)
    }

    /// Looks up a parameter by name, falling back to inherited ones.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.all_params.iter().find(|p| p.name == name)
    }
}
