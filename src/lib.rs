//! Simulation-Object Metadata Generator Library.
//!
//! This crate turns a graph of configuration-class manifests (hierarchical,
//! parameterized descriptions of simulated components) into the generated
//! artifacts a separately built simulation core compiles against: interface
//! headers, binding modules, enumeration tables, debug-flag tables, a bundle
//! of compiled scripting sources and a build-provenance stamp.
//!
//! # Pipeline
//!
//! * **Discovery**: a sandboxed loader resolves module paths to manifests and
//!   the orchestrator registers every class, enumeration and parameter type
//!   reachable from the requested classes.
//! * **Ordering**: classes are emitted parent-first; predeclarations and
//!   enumerations are collected along that order.
//! * **Emission**: pure render functions produce each artifact.
//!
//! # Modules
//!
//! * `common`: Error type and build-environment table.
//! * `config`: Build configuration loading.
//! * `emit`: Artifact emitters.
//! * `model`: Class, parameter, enumeration and flag descriptors.
//! * `registry`: Orchestrator, ordering and collection.
//! * `sim`: Loader, manifests and the end-to-end driver.
//! * `stats`: Generation statistics.

/// Shared error type and build-environment table.
pub mod common;

/// Build configuration loaded from TOML.
///
/// Lists requested classes, scripting sources, the environment table and
/// auxiliary inputs, with relative paths anchored to the configuration file.
pub mod config;

/// Multi-target emitters.
///
/// Interface headers, binding declarations, enumeration tables, the
/// aggregate binding module, flag tables, packaging and provenance.
pub mod emit;

/// Descriptors produced by discovery.
pub mod model;

/// Orchestrator and the ordering and collection passes over its registries.
pub mod registry;

/// Module loading, manifests and the generation driver.
///
/// Handles resolving module paths to manifests inside a scoped sandbox and
/// coordinating a full generation run.
pub mod sim;

/// Generation statistics collection and reporting.
pub mod stats;
