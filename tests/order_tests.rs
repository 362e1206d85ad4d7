//! Tests for dependency ordering and predeclaration collection.

mod common;

use common::Fixture;
use simgen::common::GenError;
use simgen::model::ConfigClass;
use simgen::registry::{collect, order_classes, Orchestrator};
use std::collections::BTreeMap;

/// Hierarchy: SimObject <- MemObject <- {Cache, BaseCPU <- AtomicCPU}.
fn hierarchy() -> Orchestrator {
    let mut f = Fixture::new();
    f.add_class("MemObject", None);
    f.add_class("Cache", Some("MemObject"));
    f.add_class("BaseCPU", Some("MemObject"));
    f.add_class("AtomicCPU", Some("BaseCPU"));
    f.build(&["AtomicCPU", "Cache"]).unwrap()
}

fn names<'a>(classes: &[&'a ConfigClass]) -> Vec<&'a str> {
    classes.iter().map(|c| c.name.as_str()).collect()
}

/// Tests that every class follows its ancestors and appears exactly once.
#[test]
fn test_parents_first_once() {
    let orch = hierarchy();
    let ordered = orch.order(&["AtomicCPU", "Cache"]).unwrap();
    assert_eq!(
        names(&ordered),
        vec!["SimObject", "MemObject", "BaseCPU", "AtomicCPU", "Cache"]
    );
}

/// Tests that shared ancestors and repeated names are emitted once.
#[test]
fn test_shared_ancestors() {
    let orch = hierarchy();
    let ordered = orch
        .order(&["Cache", "AtomicCPU", "MemObject", "Cache", "SimObject"])
        .unwrap();
    assert_eq!(
        names(&ordered),
        vec!["SimObject", "MemObject", "Cache", "BaseCPU", "AtomicCPU"]
    );

    let all: Vec<String> = orch.classes().map(|c| c.name.clone()).collect();
    let ordered = orch.order(&all).unwrap();
    assert_eq!(ordered.len(), all.len());
    for (i, class) in ordered.iter().enumerate() {
        if let Some(parent) = &class.parent {
            let pos = ordered.iter().position(|c| &c.name == parent).unwrap();
            assert!(pos < i, "{} emitted before its parent {}", class.name, parent);
        }
    }
}

/// Tests that ordering an unregistered name is fatal.
#[test]
fn test_order_unknown_name() {
    let orch = hierarchy();
    assert!(matches!(
        orch.order(&["AtomicCPU", "Nope"]),
        Err(GenError::UnknownClass(name)) if name == "Nope"
    ));
}

fn bare_class(name: &str, parent: Option<&str>) -> ConfigClass {
    ConfigClass {
        name: name.to_string(),
        parent: parent.map(str::to_string),
        params: Vec::new(),
        namespace: None,
        cxx_class: name.to_string(),
        custom_decl: None,
        is_abstract: false,
        module: format!("objects.{}", name),
        all_params: Vec::new(),
    }
}

/// Tests that a very deep chain orders without recursion.
#[test]
fn test_deep_chain() {
    let depth = 100_000;
    let mut classes = BTreeMap::new();
    classes.insert("SimObject".to_string(), bare_class("SimObject", None));
    let mut parent = "SimObject".to_string();
    for i in 0..depth {
        let name = format!("C{}", i);
        classes.insert(name.clone(), bare_class(&name, Some(parent.as_str())));
        parent = name;
    }

    let ordered = order_classes(&classes, &[parent.as_str(), "C7"]).unwrap();
    assert_eq!(ordered.len(), depth + 1);
    assert_eq!(ordered[0].name, "SimObject");
    assert_eq!(ordered[1].name, "C0");
    assert_eq!(ordered[depth].name, parent);
}

/// Tests that predeclarations keep first-seen order without duplicates and
/// enumerations come out sorted.
#[test]
fn test_collect() {
    let mut f = Fixture::new();
    f.add(
        "enums.all",
        r#"
[[enum]]
name = "Zeta"
values = ["z"]

[[enum]]
name = "Alpha"
values = ["a"]
"#,
    );
    f.add(
        "objects.Bus",
        r#"
imports = ["enums.all"]

[[class]]
name = "Bus"

[[class.param]]
name = "mode"
type = "Zeta"

[[class.param]]
name = "clock"
type = "Tick"

[[class.param]]
name = "name2"
type = "String"
"#,
    );
    f.add(
        "objects.Bridge",
        r#"
[[class]]
name = "Bridge"
parent = "Bus"

[[class.param]]
name = "size"
type = "UInt64"

[[class.param]]
name = "kind"
type = "Alpha"

[[class.param]]
name = "peers"
type = "Vector<Bus>"

[[class.param]]
name = "latency"
type = "Latency"
"#,
    );
    let orch = f.build(&["Bridge"]).unwrap();
    let ordered = orch.order(&["Bridge"]).unwrap();
    let collected = collect(&ordered);

    assert_eq!(
        collected.predecls,
        vec![
            "%import \"stdint.i\"",
            "%import \"base/types.hh\"",
            "%include \"std_string.i\"",
            "class Bus;",
            "%include \"std_vector.i\"",
        ]
    );
    assert_eq!(collected.enums, vec!["Alpha", "Zeta"]);
}
