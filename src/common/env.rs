//! Build Environment Table.
//!
//! The build environment is the key/value table of build settings (for example
//! `FULL_SYSTEM = true`) handed to the generator by the build scheduler. The
//! loader exposes it as a virtual module so manifests can guard parameters on
//! it, and the scripting layer receives a rendered copy.

use crate::common::error::{GenError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// A single build-environment value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvValue {
    /// Boolean switch.
    Bool(bool),
    /// Integer setting.
    Int(i64),
    /// String setting.
    Str(String),
}

impl EnvValue {
    /// Returns whether the value enables a guarded parameter.
    ///
    /// `true`, any non-zero integer and any non-empty string are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            EnvValue::Bool(b) => *b,
            EnvValue::Int(i) => *i != 0,
            EnvValue::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Bool(b) => write!(f, "{}", b),
            EnvValue::Int(i) => write!(f, "{}", i),
            EnvValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Ordered build-environment table.
///
/// Keys are kept sorted so every rendering of the table is byte-stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildEnv {
    values: BTreeMap<String, EnvValue>,
}

impl BuildEnv {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an environment from a parsed TOML table.
    ///
    /// # Errors
    ///
    /// Returns `GenError::MalformedEnv` when a key is not an identifier or a
    /// value is not a boolean, integer or string.
    pub fn from_table(table: &toml::Table) -> Result<Self> {
        let mut env = Self::new();
        for (key, value) in table {
            let value = match value {
                toml::Value::Boolean(b) => EnvValue::Bool(*b),
                toml::Value::Integer(i) => EnvValue::Int(*i),
                toml::Value::String(s) => EnvValue::Str(s.clone()),
                other => {
                    return Err(GenError::MalformedEnv(format!(
                        "key '{}' has unsupported {} value",
                        key,
                        other.type_str()
                    )))
                }
            };
            env.insert(key.clone(), value)?;
        }
        Ok(env)
    }

    /// Inserts or replaces a setting.
    ///
    /// # Errors
    ///
    /// Returns `GenError::MalformedEnv` when `key` is not a valid identifier.
    pub fn insert(&mut self, key: impl Into<String>, value: EnvValue) -> Result<()> {
        let key = key.into();
        if !is_identifier(&key) {
            return Err(GenError::MalformedEnv(format!(
                "key '{}' is not an identifier",
                key
            )));
        }
        self.values.insert(key, value);
        Ok(())
    }

    /// Looks up a setting.
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.values.get(key)
    }

    /// Iterates settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of settings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no settings are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
