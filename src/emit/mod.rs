//! Multi-target emitters.
//!
//! Every emitter is a pure render function over the populated
//! [`Orchestrator`] or an explicit input list; identical inputs give
//! identical text. [`Artifact`] names one output file and dispatches to the
//! emitter producing it.

/// Aggregate binding module.
pub mod aggregate;

/// Per-type binding declarations and the binding initializer.
pub mod binding;

/// Enumeration definition and declaration files.
pub mod enums;

/// Debug-flag tables.
pub mod flags;

/// Per-class interface headers.
pub mod interface;

/// Compiled scripting sources and the bundle archive.
pub mod package;

/// Build-provenance stamp.
pub mod provenance;

/// Scripting support modules.
pub mod script;

use crate::common::env::BuildEnv;
use crate::common::error::Result;
use crate::model::flags::TraceFlag;
use crate::model::param::ParamType;
use crate::registry::Orchestrator;
use provenance::Provenance;
use std::path::PathBuf;

/// Inputs shared by every artifact of one generation run.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Populated registries.
    pub orch: &'a Orchestrator,
    /// Build environment.
    pub env: &'a BuildEnv,
    /// Trace flag list.
    pub flags: &'a [TraceFlag],
    /// Provenance stamp.
    pub provenance: &'a Provenance,
}

/// One generated text file.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// Interface header of a class.
    Interface(String),
    /// Binding declaration of a parameter type.
    Binding(ParamType),
    /// String table of an enumeration.
    EnumDef(String),
    /// Declaration header of an enumeration.
    EnumDecl(String),
    /// Aggregate binding module over the given classes.
    Aggregate(Vec<String>),
    /// Binding initializer chaining the given sub-modules.
    BindingInit(Vec<String>),
    /// Flag tables for the scripting layer.
    FlagsScript,
    /// Flag tables for the native core.
    FlagsSource,
    /// Flag enumeration header.
    FlagsHeader,
    /// Provenance stamp.
    Provenance,
    /// Build-environment module.
    BuildEnv,
    /// Embedded-file module: `(variable, contents)` pairs.
    Info(Vec<(String, String)>),
    /// Init module of the object namespace over the given modules.
    ObjectsInit(Vec<String>),
}

impl Artifact {
    /// Output path, relative to the output directory.
    pub fn target(&self) -> PathBuf {
        match self {
            Artifact::Interface(class) => PathBuf::from(interface::interface_path(class)),
            Artifact::Binding(ptype) => {
                PathBuf::from(interface::PARAMS_DIR).join(format!("{}.i", ptype.tag()))
            }
            Artifact::EnumDef(name) => {
                PathBuf::from(enums::ENUMS_DIR).join(format!("{}.cc", name))
            }
            Artifact::EnumDecl(name) => PathBuf::from(enums::enum_header_path(name)),
            Artifact::Aggregate(_) => PathBuf::from(interface::PARAMS_DIR)
                .join(format!("{}.i", aggregate::MODULE_NAME)),
            Artifact::BindingInit(_) => PathBuf::from("swig/init.cc"),
            Artifact::FlagsScript => PathBuf::from("base/traceflags.py"),
            Artifact::FlagsSource => PathBuf::from("base/traceflags.cc"),
            Artifact::FlagsHeader => PathBuf::from("base/traceflags.hh"),
            Artifact::Provenance => PathBuf::from("base/program_info.cc"),
            Artifact::BuildEnv => PathBuf::from("scripts/build_env.py"),
            Artifact::Info(_) => PathBuf::from("scripts/info.py"),
            Artifact::ObjectsInit(_) => PathBuf::from("scripts/objects/__init__.py"),
        }
    }

    /// Short label grouping artifacts in statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            Artifact::Interface(_) => "interface",
            Artifact::Binding(_) => "binding",
            Artifact::EnumDef(_) | Artifact::EnumDecl(_) => "enum",
            Artifact::Aggregate(_) => "aggregate",
            Artifact::BindingInit(_) => "binding-init",
            Artifact::FlagsScript | Artifact::FlagsSource | Artifact::FlagsHeader => "flags",
            Artifact::Provenance => "provenance",
            Artifact::BuildEnv | Artifact::Info(_) | Artifact::ObjectsInit(_) => "script",
        }
    }

    /// Renders the artifact.
    ///
    /// # Errors
    ///
    /// Propagates the emitter's error: an unregistered name or an invalid
    /// flag list.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        match self {
            Artifact::Interface(class) => interface::render_interface(ctx.orch, class),
            Artifact::Binding(ptype) => binding::render_param_binding(ctx.orch, ptype.name()),
            Artifact::EnumDef(name) => enums::render_enum_def(ctx.orch, name),
            Artifact::EnumDecl(name) => enums::render_enum_decl(ctx.orch, name),
            Artifact::Aggregate(classes) => aggregate::render_aggregate(ctx.orch, classes),
            Artifact::BindingInit(modules) => Ok(binding::render_binding_init(modules)),
            Artifact::FlagsScript => flags::render_flags_script(ctx.flags),
            Artifact::FlagsSource => flags::render_flags_source(ctx.flags),
            Artifact::FlagsHeader => flags::render_flags_header(ctx.flags),
            Artifact::Provenance => Ok(ctx.provenance.render()),
            Artifact::BuildEnv => Ok(script::render_build_env(ctx.env)),
            Artifact::Info(files) => {
                let files: Vec<(&str, &str)> = files
                    .iter()
                    .map(|(n, c)| (n.as_str(), c.as_str()))
                    .collect();
                Ok(script::render_info(&files))
            }
            Artifact::ObjectsInit(modules) => Ok(script::render_objects_init(modules)),
        }
    }
}

/// Quotes `s` as a scripting-layer string literal.
pub fn script_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Quotes `s` as a native string literal.
pub fn cxx_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
