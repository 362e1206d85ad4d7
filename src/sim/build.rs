//! End-to-End Generation.
//!
//! Drives one full generation run from a [`BuildConfig`]: builds the
//! orchestrator, writes every text artifact under the output directory,
//! compiles the scripting sources and bundles the packaged ones.

use crate::common::error::{GenError, Result};
use crate::config::BuildConfig;
use crate::emit::package;
use crate::emit::provenance::Provenance;
use crate::emit::{Artifact, RenderContext};
use crate::model::flags::{load_flags, TraceFlag};
use crate::registry::Orchestrator;
use crate::sim::loader::OBJECTS_MODULE;
use crate::sim::source::ScriptSource;
use crate::stats::GenStats;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Lists the text artifacts of a run, in write order.
///
/// # Arguments
///
/// * `orch` - Populated registries.
/// * `sources` - Script sources; `objects.*` modules feed the namespace init module.
/// * `swig_modules` - Binding sub-modules chained by the initializer.
/// * `with_flags` - Whether the flag tables are generated.
/// * `info` - `(variable, contents)` pairs of embedded files.
pub fn plan<S: AsRef<str>>(
    orch: &Orchestrator,
    sources: &[ScriptSource],
    swig_modules: &[S],
    with_flags: bool,
    info: Vec<(String, String)>,
) -> Vec<Artifact> {
    let classes: Vec<String> = orch.classes().map(|c| c.name.clone()).collect();

    let mut artifacts: Vec<Artifact> = classes.iter().cloned().map(Artifact::Interface).collect();
    artifacts.extend(orch.param_types().cloned().map(Artifact::Binding));
    for e in orch.enums() {
        artifacts.push(Artifact::EnumDef(e.name.clone()));
        artifacts.push(Artifact::EnumDecl(e.name.clone()));
    }
    artifacts.push(Artifact::Aggregate(classes));
    artifacts.push(Artifact::BindingInit(
        swig_modules.iter().map(|m| m.as_ref().to_string()).collect(),
    ));
    if with_flags {
        artifacts.push(Artifact::FlagsScript);
        artifacts.push(Artifact::FlagsSource);
        artifacts.push(Artifact::FlagsHeader);
    }
    artifacts.push(Artifact::Provenance);
    artifacts.push(Artifact::BuildEnv);
    artifacts.push(Artifact::Info(info));

    let prefix = format!("{}.", OBJECTS_MODULE);
    let mut modules: Vec<String> = sources
        .iter()
        .filter(|s| s.modpath.starts_with(&prefix))
        .map(|s| s.modpath.clone())
        .collect();
    modules.sort();
    artifacts.push(Artifact::ObjectsInit(modules));
    artifacts
}

/// Runs a full generation.
///
/// # Errors
///
/// Any discovery, rendering, packaging or I/O failure. Files already written
/// are left in place.
pub fn generate(config: &BuildConfig) -> Result<GenStats> {
    let mut stats = GenStats::default();
    let env = config.env()?;
    let sources = config.script_sources();
    let orch = Orchestrator::new(&sources, &config.objects, &env)?;
    stats.classes = orch.classes().count();
    stats.enums = orch.enums().count();
    stats.param_types = orch.param_types().count();

    let flags: Vec<TraceFlag> = match config.flags_path() {
        Some(path) => load_flags(&path)?,
        None => Vec::new(),
    };
    let provenance = Provenance::probe(&config.provenance_dir());
    let info = read_info_files(config)?;

    let ctx = RenderContext {
        orch: &orch,
        env: &env,
        flags: &flags,
        provenance: &provenance,
    };
    let out_dir = config.out_dir();
    let artifacts = plan(
        &orch,
        &sources,
        &config.swig_modules,
        config.flags.is_some(),
        info,
    );
    for artifact in &artifacts {
        let text = artifact.render(&ctx)?;
        let target = out_dir.join(artifact.target());
        write_file(&target, text.as_bytes())?;
        info!(kind = artifact.kind(), path = %target.display(), "wrote artifact");
        stats.record(artifact.kind(), text.len());
    }

    for source in &sources {
        let len = package::compile_file(&source.srcpath, &source.compiled)?;
        info!(module = %source.modpath, path = %source.compiled.display(), "compiled source");
        stats.record("compiled", len);
    }

    let selected: Vec<PathBuf> = sources
        .iter()
        .filter(|s| s.package)
        .map(|s| s.compiled.clone())
        .collect();
    let target = config.bundle_path();
    let len = package::bundle(&target, &selected, &sources)?;
    info!(members = selected.len(), path = %target.display(), "wrote bundle");
    stats.record("bundle", len);

    Ok(stats)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| GenError::io(dir, e))?;
    }
    fs::write(path, bytes).map_err(|e| GenError::io(path, e))
}

fn read_info_files(config: &BuildConfig) -> Result<Vec<(String, String)>> {
    config
        .info_files
        .iter()
        .map(|file| {
            let path = config.resolve(file);
            let contents = fs::read_to_string(&path).map_err(|e| GenError::io(&path, e))?;
            Ok((info_variable(file), contents))
        })
        .collect()
}

/// Variable name an embedded file is exposed under (`COPYING` stays
/// `COPYING`, `README.md` becomes `README_md`).
fn info_variable(file: &Path) -> String {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut var: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if var.is_empty() || var.starts_with(|c: char| c.is_ascii_digit()) {
        var.insert(0, '_');
    }
    var
}
