//! Trace Flags.
//!
//! Trace flags name debug-output categories of the simulation core. Simple
//! flags are numbered in declaration order; compound flags group simple flags
//! under one name. The flag list is supplied directly to the flag-table
//! emitters, usually from a TOML file:
//!
//! ```toml
//! [[flag]]
//! name = "Exec"
//! desc = "Instruction execution"
//!
//! [[flag]]
//! name = "ExecAll"
//! compound = true
//! members = ["Exec"]
//! desc = "Everything about execution"
//! ```

use crate::common::error::{GenError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A named debug-output category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceFlag {
    /// Flag name.
    pub name: String,
    /// Whether the flag groups other flags.
    pub is_compound: bool,
    /// Member simple flags, in order. Empty for simple flags.
    pub members: Vec<String>,
    /// Human-readable description.
    pub description: String,
}

impl TraceFlag {
    /// Creates a simple flag.
    pub fn simple(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_compound: false,
            members: Vec::new(),
            description: description.into(),
        }
    }

    /// Creates a compound flag.
    pub fn compound<I, S>(name: impl Into<String>, members: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            is_compound: true,
            members: members.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FlagFile {
    #[serde(default, rename = "flag")]
    flags: Vec<FlagDecl>,
}

#[derive(Debug, Deserialize)]
struct FlagDecl {
    name: String,
    #[serde(default)]
    compound: bool,
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    desc: String,
}

/// Parses a flag list from TOML text.
///
/// # Errors
///
/// Returns `GenError::InvalidFlags` if the text is not a valid flag file or a
/// simple flag lists members.
pub fn parse_flags(text: &str) -> Result<Vec<TraceFlag>> {
    let file: FlagFile =
        toml::from_str(text).map_err(|e| GenError::InvalidFlags(e.to_string()))?;
    file.flags
        .into_iter()
        .map(|decl| {
            if !decl.compound && !decl.members.is_empty() {
                return Err(GenError::InvalidFlags(format!(
                    "simple flag '{}' lists members",
                    decl.name
                )));
            }
            Ok(TraceFlag {
                name: decl.name,
                is_compound: decl.compound,
                members: decl.members,
                description: decl.desc,
            })
        })
        .collect()
}

/// Reads and parses a flag list file.
pub fn load_flags(path: &Path) -> Result<Vec<TraceFlag>> {
    let text = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
    parse_flags(&text)
}
