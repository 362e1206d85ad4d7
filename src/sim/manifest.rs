//! Manifest Format.
//!
//! A manifest is the source a module path maps to. It declares configuration
//! classes and enumerations and names the modules it depends on:
//!
//! ```toml
//! imports = ["enums.mem"]
//!
//! [[enum]]
//! name = "MemoryMode"
//! values = ["invalid", "atomic", "timing"]
//!
//! [[class]]
//! name = "BaseCPU"
//! parent = "MemObject"
//! abstract = true
//!
//! [[class.param]]
//! name = "clock"
//! type = "Tick"
//! desc = "Clock period"
//!
//! [[class.param]]
//! name = "profile"
//! type = "Bool"
//! default = false
//! when = "FULL_SYSTEM"
//! ```

use crate::common::error::{GenError, Result};
use crate::model::enums::{EnumValue, Enumeration};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parsed manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Modules imported before anything here is registered.
    #[serde(default)]
    pub imports: Vec<String>,

    /// Declared enumerations.
    #[serde(default, rename = "enum")]
    pub enums: Vec<EnumDecl>,

    /// Declared configuration classes.
    #[serde(default, rename = "class")]
    pub classes: Vec<ClassDecl>,
}

/// Enumeration declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<EnumValueDecl>,
}

/// One enumeration value: a bare name, or a name with an explicit value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValueDecl {
    Name(String),
    Explicit { name: String, value: i64 },
}

/// Configuration class declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDecl {
    pub name: String,

    /// Defaults to the root class.
    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub cxx_class: Option<String>,

    /// Literal binding declaration lines.
    #[serde(default)]
    pub decl: Option<Vec<String>>,

    #[serde(default, rename = "param")]
    pub params: Vec<ParamDecl>,
}

/// Parameter declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub desc: String,

    #[serde(default)]
    pub default: Option<toml::Value>,

    /// Build-environment key the parameter depends on.
    #[serde(default)]
    pub when: Option<String>,
}

impl ParamDecl {
    /// Default value rendered as text.
    pub fn default_text(&self) -> Option<String> {
        self.default.as_ref().map(|v| match v {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl EnumDecl {
    /// Builds the enumeration. Bare names continue counting from the
    /// previous value.
    ///
    /// # Errors
    ///
    /// Returns `GenError::DuplicateEnumValue` if a value name repeats.
    pub fn to_enumeration(&self) -> Result<Enumeration> {
        let mut seen = HashSet::new();
        let mut values = Vec::with_capacity(self.values.len());
        let mut next = 0i64;
        for decl in &self.values {
            let (name, value) = match decl {
                EnumValueDecl::Name(name) => (name.clone(), next),
                EnumValueDecl::Explicit { name, value } => (name.clone(), *value),
            };
            if !seen.insert(name.clone()) {
                return Err(GenError::DuplicateEnumValue {
                    enumeration: self.name.clone(),
                    value: name,
                });
            }
            next = value + 1;
            values.push(EnumValue { name, value });
        }
        Ok(Enumeration {
            name: self.name.clone(),
            values,
        })
    }
}

impl Manifest {
    /// Parses manifest text. `path` is only used for error reporting.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| GenError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads and parses the manifest at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Self::parse(path, &text)
    }
}
