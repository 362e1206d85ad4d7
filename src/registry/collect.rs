//! Predeclaration and Enumeration Collection.

use crate::model::class::ConfigClass;
use std::collections::{BTreeSet, HashSet};

/// What the aggregate binding module needs ahead of its class declarations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Collected<'a> {
    /// Predeclarations, deduplicated, in first-seen order.
    pub predecls: Vec<String>,
    /// Referenced enumerations, lexically sorted.
    pub enums: Vec<&'a str>,
}

/// Walks the local parameters of an ordered class list.
///
/// Predeclarations keep the order they are first met in; enumerations are
/// sorted by name regardless of where they were found.
pub fn collect<'a>(ordered: &[&'a ConfigClass]) -> Collected<'a> {
    let mut predecls = Vec::new();
    let mut seen = HashSet::new();
    let mut enums = BTreeSet::new();

    for &class in ordered {
        for param in &class.params {
            if let Some(e) = param.ptype.enum_name() {
                enums.insert(e);
            }
            for pd in param.ptype.predecls() {
                if seen.insert(pd.clone()) {
                    predecls.push(pd);
                }
            }
        }
    }

    Collected {
        predecls,
        enums: enums.into_iter().collect(),
    }
}
