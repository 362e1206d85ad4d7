//! Dependency Ordering.
//!
//! Linearizes part of the class hierarchy so that every class is emitted
//! after all of its ancestors, and each class exactly once even when several
//! requested classes share ancestors.

use crate::common::error::{GenError, Result};
use crate::model::class::ConfigClass;
use std::collections::{BTreeMap, HashSet};

/// Orders `names` and their ancestors parent-first.
///
/// Ancestor chains are walked iteratively, so arbitrarily deep hierarchies
/// cannot exhaust the stack.
///
/// # Arguments
///
/// * `classes` - Registry to resolve names and parents against.
/// * `names` - Classes to emit, in request order.
///
/// # Errors
///
/// * `GenError::UnknownClass` if a name or parent is not registered.
/// * `GenError::InheritanceCycle` if parent links loop.
pub fn order_classes<'a, S: AsRef<str>>(
    classes: &'a BTreeMap<String, ConfigClass>,
    names: &[S],
) -> Result<Vec<&'a ConfigClass>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut ordered = Vec::new();

    for name in names {
        let mut chain: Vec<&'a ConfigClass> = Vec::new();
        let mut on_chain: HashSet<&str> = HashSet::new();
        let mut next = Some(name.as_ref());
        while let Some(current) = next {
            if visited.contains(current) {
                break;
            }
            let class = classes
                .get(current)
                .ok_or_else(|| GenError::UnknownClass(current.to_string()))?;
            if !on_chain.insert(class.name.as_str()) {
                return Err(GenError::InheritanceCycle(current.to_string()));
            }
            chain.push(class);
            next = class.parent.as_deref();
        }
        for class in chain.into_iter().rev() {
            visited.insert(class.name.as_str());
            ordered.push(class);
        }
    }

    Ok(ordered)
}
