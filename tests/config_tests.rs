//! Tests for the build configuration and the end-to-end generation run.

use simgen::common::{EnvValue, GenError};
use simgen::config::BuildConfig;
use simgen::emit::package::payload_of;
use simgen::sim::build::generate;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Tests defaults of an almost empty configuration.
#[test]
fn test_defaults() {
    let config = BuildConfig::parse(Path::new("simgen.toml"), "objects = [\"Bus\"]\n").unwrap();
    assert_eq!(config.root, PathBuf::from("."));
    assert_eq!(config.out_dir, PathBuf::from("build"));
    assert_eq!(config.swig_modules, vec!["params".to_string()]);
    assert_eq!(config.bundle, PathBuf::from("objects.zip"));
    assert!(config.flags.is_none());
    assert!(config.sources.is_empty());
    assert!(config.env().unwrap().is_empty());
}

/// Tests source descriptor resolution, explicit and derived.
#[test]
fn test_script_sources() {
    let text = r#"
root = "/work"
out_dir = "out"

[[source]]
modpath = "objects.BaseCPU"
srcpath = "src/cpu/BaseCPU.toml"

[[source]]
modpath = "runtime"
srcpath = "/abs/runtime.toml"
arcname = "m5/runtime.toml"
compiled = "gen/runtime.tomlc"
package = false
"#;
    let config = BuildConfig::parse(Path::new("simgen.toml"), text).unwrap();
    let sources = config.script_sources();

    assert_eq!(sources[0].srcpath, PathBuf::from("/work/src/cpu/BaseCPU.toml"));
    assert_eq!(sources[0].arcname, "objects/BaseCPU.toml");
    assert_eq!(sources[0].compiled, PathBuf::from("/work/out/objects/BaseCPU.tomlc"));
    assert!(sources[0].package);

    assert_eq!(sources[1].srcpath, PathBuf::from("/abs/runtime.toml"));
    assert_eq!(sources[1].arcname, "m5/runtime.toml");
    assert_eq!(sources[1].compiled, PathBuf::from("/work/gen/runtime.tomlc"));
    assert!(!sources[1].package);
}

/// Tests environment conversion and its rejection of nested values.
#[test]
fn test_env_table() {
    let config = BuildConfig::parse(
        Path::new("simgen.toml"),
        "[env]\nFULL_SYSTEM = true\nNUM_CPUS = 2\nISA = \"riscv\"\n",
    )
    .unwrap();
    let env = config.env().unwrap();
    assert_eq!(env.get("FULL_SYSTEM"), Some(&EnvValue::Bool(true)));
    assert_eq!(env.get("NUM_CPUS"), Some(&EnvValue::Int(2)));
    assert_eq!(env.get("ISA"), Some(&EnvValue::Str("riscv".into())));

    let config =
        BuildConfig::parse(Path::new("simgen.toml"), "[env]\nNESTED = [1, 2]\n").unwrap();
    assert!(matches!(config.env(), Err(GenError::MalformedEnv(_))));
}

/// Tests that unknown keys and bad types are reported as configuration errors.
#[test]
fn test_malformed_config() {
    let err = BuildConfig::parse(Path::new("simgen.toml"), "objcts = []\n").unwrap_err();
    assert!(matches!(err, GenError::Config { .. }));
}

fn write(dir: &Path, rel: &str, text: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/runtime.toml", "[[class]]\nname = \"SimObject\"\nabstract = true\n");
    write(
        root,
        "src/enums.toml",
        "[[enum]]\nname = \"MemoryMode\"\nvalues = [\"atomic\", \"timing\"]\n",
    );
    write(
        root,
        "src/objects/Bus.toml",
        r#"
imports = ["enums.mem"]

[[class]]
name = "Bus"

[[class.param]]
name = "mode"
type = "MemoryMode"

[[class.param]]
name = "peers"
type = "Vector<Bus>"

[[class.param]]
name = "snoop"
type = "Bool"
when = "FULL_SYSTEM"
"#,
    );
    write(
        root,
        "flags.toml",
        "[[flag]]\nname = \"Bus\"\ndesc = \"Bus traffic\"\n",
    );
    write(root, "COPYING", "All rights reserved.\n");
    write(
        root,
        "simgen.toml",
        r#"
objects = ["Bus"]
flags = "flags.toml"
info_files = ["COPYING"]

[env]
FULL_SYSTEM = true

[[source]]
modpath = "runtime"
srcpath = "src/runtime.toml"
package = false

[[source]]
modpath = "enums.mem"
srcpath = "src/enums.toml"

[[source]]
modpath = "objects.Bus"
srcpath = "src/objects/Bus.toml"
"#,
    );
    dir
}

/// Tests a full generation run over a small project.
#[test]
fn test_generate() {
    let dir = project();
    let config = BuildConfig::load(&dir.path().join("simgen.toml")).unwrap();
    let stats = generate(&config).unwrap();
    let out = dir.path().join("build");

    for rel in [
        "params/SimObject.hh",
        "params/Bus.hh",
        "params/vector_Bus.i",
        "params/params.i",
        "enums/MemoryMode.cc",
        "enums/MemoryMode.hh",
        "swig/init.cc",
        "base/traceflags.py",
        "base/traceflags.cc",
        "base/traceflags.hh",
        "base/program_info.cc",
        "scripts/build_env.py",
        "scripts/info.py",
        "scripts/objects/__init__.py",
        "runtime.tomlc",
        "enums/mem.tomlc",
        "objects/Bus.tomlc",
        "objects.zip",
    ] {
        assert!(out.join(rel).is_file(), "missing {}", rel);
    }

    let bus = fs::read_to_string(out.join("params/Bus.hh")).unwrap();
    assert!(bus.contains("    bool snoop;\n"));
    let info = fs::read_to_string(out.join("scripts/info.py")).unwrap();
    assert_eq!(info, "COPYING = \"All rights reserved.\\n\"\n");
    let init = fs::read_to_string(out.join("scripts/objects/__init__.py")).unwrap();
    assert_eq!(init, "from params import *\nfrom objects.Bus import *\n");

    let bytes = fs::read(out.join("objects.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["enums/mem.toml", "objects/Bus.toml"]);
    let mut data = Vec::new();
    archive
        .by_name("objects/Bus.toml")
        .unwrap()
        .read_to_end(&mut data)
        .unwrap();
    let source = fs::read(dir.path().join("src/objects/Bus.toml")).unwrap();
    assert_eq!(payload_of(&data), Some(&source[..]));

    assert_eq!(stats.classes, 2);
    assert_eq!(stats.enums, 1);
    assert_eq!(stats.param_types, 1);
    assert_eq!(stats.kinds["interface"].files, 2);
    assert_eq!(stats.kinds["flags"].files, 3);
    assert_eq!(stats.kinds["compiled"].files, 3);
    assert_eq!(stats.kinds["bundle"].files, 1);
    assert!(stats.summary().contains("out.total"));
}

/// Tests that two runs over the same project write identical artifacts.
#[test]
fn test_generate_deterministic() {
    let dir = project();
    let config = BuildConfig::load(&dir.path().join("simgen.toml")).unwrap();
    let out = dir.path().join("build");

    generate(&config).unwrap();
    let first_aggregate = fs::read(out.join("params/params.i")).unwrap();
    let first_bundle = fs::read(out.join("objects.zip")).unwrap();
    generate(&config).unwrap();
    assert_eq!(fs::read(out.join("params/params.i")).unwrap(), first_aggregate);
    assert_eq!(fs::read(out.join("objects.zip")).unwrap(), first_bundle);
}

/// Tests that a discovery failure aborts the run.
#[test]
fn test_generate_unresolved_class() {
    let dir = project();
    let mut config = BuildConfig::load(&dir.path().join("simgen.toml")).unwrap();
    config.objects.push("Nonexistent".to_string());
    assert!(matches!(generate(&config), Err(GenError::UnresolvedClass(_))));
}
