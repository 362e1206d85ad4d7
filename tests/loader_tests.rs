//! Tests for the sandboxed module loader.

mod common;

use common::Fixture;
use simgen::common::{BuildEnv, EnvValue, GenError};
use simgen::sim::loader::{ENV_MODULE, OBJECTS_MODULE};
use simgen::sim::{Loader, Module, ModuleTable};

/// Tests that a mapped manifest is parsed into a fresh module and installed.
#[test]
fn test_load_mapped_manifest() {
    let fixture = Fixture::new();
    let mut host = ModuleTable::new();
    let mut loader = Loader::install(&mut host, fixture.mapping(), BuildEnv::new());

    let module = loader.load("runtime").unwrap().expect("runtime resolves");
    match module.as_ref() {
        Module::Manifest { manifest, .. } => {
            assert_eq!(manifest.classes.len(), 1);
            assert_eq!(manifest.classes[0].name, "SimObject");
            assert!(manifest.classes[0].is_abstract);
        }
        other => panic!("expected a manifest module, got {:?}", other),
    }
    assert!(loader.is_installed("runtime"));
}

/// Tests that unmapped names and mapped-but-missing paths do not resolve.
#[test]
fn test_unresolvable_names() {
    let mut fixture = Fixture::new();
    fixture.map_missing("objects.Ghost");
    let mut host = ModuleTable::new();
    let mut loader = Loader::install(&mut host, fixture.mapping(), BuildEnv::new());

    assert!(loader.load("nowhere").unwrap().is_none());
    assert!(loader.load("objects.Ghost").unwrap().is_none());
    assert!(!loader.is_installed("objects.Ghost"));
}

/// Tests that the reserved namespace never resolves, even when mapped.
#[test]
fn test_reserved_namespace_hidden() {
    let mut fixture = Fixture::new();
    fixture.add("internal", "");
    fixture.add("internal.core", "");
    fixture.add("internals", "");
    let mut host = ModuleTable::new();
    let mut loader = Loader::install(&mut host, fixture.mapping(), BuildEnv::new());

    assert!(loader.load("internal").unwrap().is_none());
    assert!(loader.load("internal.core").unwrap().is_none());
    assert!(loader.load("internals").unwrap().is_some());
}

/// Tests the two virtual modules.
#[test]
fn test_virtual_modules() {
    let mut env = BuildEnv::new();
    env.insert("FULL_SYSTEM", EnvValue::Bool(true)).unwrap();
    let mut host = ModuleTable::new();
    let mut loader = Loader::install(&mut host, Fixture::empty().mapping(), env.clone());

    let module = loader.load(ENV_MODULE).unwrap().expect("env module");
    assert_eq!(*module, Module::Env(env));

    let module = loader.load(OBJECTS_MODULE).unwrap().expect("objects package");
    assert_eq!(*module, Module::Namespace);
}

/// Tests that a dotted name installs its parent package first.
#[test]
fn test_parent_package_loaded() {
    let mut fixture = Fixture::new();
    fixture.add_class("Bus", None);
    let mut host = ModuleTable::new();
    let mut loader = Loader::install(&mut host, fixture.mapping(), BuildEnv::new());

    assert!(loader.load("objects.Bus").unwrap().is_some());
    let installed: Vec<&str> = loader.installed().collect();
    assert_eq!(installed, vec!["objects", "objects.Bus"]);
}

/// Tests that modules the host already resolves are returned untouched.
#[test]
fn test_host_modules_not_shadowed() {
    let fixture = Fixture::new();
    let mut host = ModuleTable::new();
    host.insert("runtime", Module::Native);
    host.insert(ENV_MODULE, Module::Native);

    {
        let mut loader = Loader::install(&mut host, fixture.mapping(), BuildEnv::new());
        assert_eq!(*loader.load("runtime").unwrap().unwrap(), Module::Native);
        assert_eq!(*loader.load(ENV_MODULE).unwrap().unwrap(), Module::Native);
        assert!(!loader.is_installed("runtime"));
    }

    assert_eq!(host.len(), 2);
    assert_eq!(*host.get("runtime").unwrap(), Module::Native);
}

/// Tests that unload removes exactly what the loader installed and can repeat.
#[test]
fn test_unload_restores_host() {
    let mut fixture = Fixture::new();
    fixture.add_class("Bus", None);
    let mut host = ModuleTable::new();
    host.insert("preexisting", Module::Native);

    let mut loader = Loader::install(&mut host, fixture.mapping(), BuildEnv::new());
    loader.load("runtime").unwrap();
    loader.load("objects.Bus").unwrap();
    loader.unload();
    assert_eq!(loader.installed().count(), 0);
    loader.unload();
    drop(loader);

    let names: Vec<&str> = host.names().collect();
    assert_eq!(names, vec!["preexisting"]);
}

/// Tests that dropping the loader restores the host table.
#[test]
fn test_drop_restores_host() {
    let fixture = Fixture::new();
    let mut host = ModuleTable::new();
    {
        let mut loader = Loader::install(&mut host, fixture.mapping(), BuildEnv::new());
        loader.load("runtime").unwrap();
        loader.load(ENV_MODULE).unwrap();
    }
    assert!(host.is_empty());
}

/// Tests that a manifest that fails to parse is fatal.
#[test]
fn test_malformed_manifest_fatal() {
    let mut fixture = Fixture::empty();
    fixture.add("runtime", "[[class]]\nname = 3\n");
    let mut host = ModuleTable::new();
    let mut loader = Loader::install(&mut host, fixture.mapping(), BuildEnv::new());

    let err = loader.load("runtime").unwrap_err();
    assert!(matches!(err, GenError::Manifest { .. }));
    drop(loader);
    assert!(host.is_empty());
}

/// Tests that loaders can be installed one after another over one host.
#[test]
fn test_sequential_loaders() {
    let fixture = Fixture::new();
    let mut host = ModuleTable::new();
    for _ in 0..3 {
        let mut loader = Loader::install(&mut host, fixture.mapping(), BuildEnv::new());
        assert!(loader.load("runtime").unwrap().is_some());
        assert!(loader.is_installed("runtime"));
    }
    assert!(host.is_empty());
}
