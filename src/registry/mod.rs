//! Class, enumeration and parameter-type registries.
//!
//! The [`Orchestrator`] owns discovery and the registries it produces; the
//! ordering and collection passes work over those registries for the
//! emitters.

/// Orchestrator construction and registry lookups.
pub mod builder;

/// Predeclaration and enumeration collection.
pub mod collect;

/// Parent-before-child ordering.
pub mod order;

pub use builder::Orchestrator;
pub use collect::{collect, Collected};
pub use order::order_classes;
