//! Tests for compiled sources and the bundle archive.

use simgen::common::GenError;
use simgen::emit::package::{
    bundle, bundle_to_bytes, compile_file, compile_source, payload_of, COMPILED_MAGIC,
};
use simgen::sim::ScriptSource;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn compiled(dir: &TempDir, modpath: &str, text: &str) -> ScriptSource {
    let src = dir.path().join(format!("{}.toml", modpath));
    fs::write(&src, text).unwrap();
    let source = ScriptSource::new(modpath, &src);
    compile_file(&source.srcpath, &source.compiled).unwrap();
    source
}

fn members(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        out.push((file.name().to_string(), data));
    }
    out
}

/// Tests the compiled form layout and its payload check.
#[test]
fn test_compile_source() {
    let out = compile_source(Path::new("a.toml"), b"x = 1\r\ny = 2\n").unwrap();
    assert_eq!(&out[..4], COMPILED_MAGIC);
    assert_eq!(payload_of(&out), Some(&b"x = 1\ny = 2\n"[..]));

    let again = compile_source(Path::new("b.toml"), b"x = 1\r\ny = 2\n").unwrap();
    assert_eq!(out, again);

    let mut tampered = out.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0xff;
    assert_eq!(payload_of(&tampered), None);
    assert_eq!(payload_of(b"SGPC"), None);
}

/// Tests that non-UTF-8 sources are rejected.
#[test]
fn test_compile_invalid_utf8() {
    let err = compile_source(Path::new("bad.toml"), &[0x66, 0xff, 0xfe]).unwrap_err();
    assert!(matches!(err, GenError::InvalidSource(path) if path == PathBuf::from("bad.toml")));
}

/// Tests that the bundle holds exactly the selected files under their
/// archive names.
#[test]
fn test_bundle_membership() {
    let dir = tempfile::tempdir().unwrap();
    let a = compiled(&dir, "objects.A", "alpha").with_arcname("alpha");
    let b = compiled(&dir, "objects.B", "beta").with_arcname("beta");
    let c = compiled(&dir, "objects.C", "gamma").with_arcname("gamma");
    let sources = vec![a.clone(), b.clone(), c];

    let bytes = bundle_to_bytes(&[b.compiled.clone(), a.compiled.clone()], &sources).unwrap();
    let members = members(bytes);
    let names: Vec<&str> = members.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert_eq!(payload_of(&members[0].1), Some(&b"alpha"[..]));
    assert_eq!(payload_of(&members[1].1), Some(&b"beta"[..]));
}

/// Tests that bundling is byte-stable.
#[test]
fn test_bundle_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let a = compiled(&dir, "objects.A", "alpha");
    let b = compiled(&dir, "objects.B", "beta");
    let sources = vec![a.clone(), b.clone()];
    let selected = vec![a.compiled.clone(), b.compiled.clone()];

    let first = bundle_to_bytes(&selected, &sources).unwrap();
    let reversed: Vec<PathBuf> = selected.iter().rev().cloned().collect();
    let second = bundle_to_bytes(&reversed, &sources).unwrap();
    assert_eq!(first, second);

    let target = dir.path().join("out").join("objects.zip");
    let len = bundle(&target, &selected, &sources).unwrap();
    assert_eq!(fs::read(&target).unwrap(), first);
    assert_eq!(len, first.len());
}

/// Tests that a selected file without a descriptor is fatal.
#[test]
fn test_bundle_unknown_compiled() {
    let dir = tempfile::tempdir().unwrap();
    let a = compiled(&dir, "objects.A", "alpha");
    let stray = dir.path().join("stray.tomlc");
    let err = bundle_to_bytes(&[stray.clone()], &[a]).unwrap_err();
    assert!(matches!(err, GenError::UnknownCompiled(path) if path == stray));
}

/// Tests that two descriptors producing one compiled file are fatal.
#[test]
fn test_bundle_duplicate_compiled() {
    let dir = tempfile::tempdir().unwrap();
    let a = compiled(&dir, "objects.A", "alpha");
    let twin = ScriptSource::new("objects.Twin", dir.path().join("twin.toml"))
        .with_compiled(a.compiled.clone());
    let err = bundle_to_bytes(&[a.compiled.clone()], &[a.clone(), twin]).unwrap_err();
    assert!(matches!(err, GenError::DuplicateCompiled(_)));
}

/// Tests the default archive name and compiled path of a descriptor.
#[test]
fn test_descriptor_defaults() {
    let source = ScriptSource::new("objects.BaseCPU", "src/cpu/BaseCPU.toml");
    assert_eq!(source.arcname, "objects/BaseCPU.toml");
    assert_eq!(source.compiled, PathBuf::from("src/cpu/BaseCPU.tomlc"));
    assert!(source.package);
    assert!(!source.clone().unpackaged().package);
}
