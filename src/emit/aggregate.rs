//! Aggregate Binding Module.
//!
//! One binding module covering a set of classes. Layout, in order:
//!
//! 1. the module directive and interface includes for every class;
//! 2. predeclarations, first-seen order;
//! 3. enumeration includes, sorted;
//! 4. one declaration per class: its literal override, or a stub that keeps
//!    the binding layer from constructing or destroying the native object;
//! 5. trailing includes of the root params header and every interface.

use crate::common::error::Result;
use crate::emit::enums::enum_header_path;
use crate::emit::interface::interface_path;
use crate::model::class::ConfigClass;
use crate::registry::{collect, Orchestrator};

/// Name of the aggregate binding module.
pub const MODULE_NAME: &str = "params";

/// Hand-written params header of the root class.
pub const ROOT_PARAMS_HEADER: &str = "sim/sim_object_params.hh";

/// Renders the aggregate binding module for `names` and their ancestors.
///
/// # Errors
///
/// Returns `GenError::UnknownClass` if a name is not registered.
pub fn render_aggregate<S: AsRef<str>>(orch: &Orchestrator, names: &[S]) -> Result<String> {
    let ordered = orch.order(names)?;
    let collected = collect(&ordered);

    let mut code = format!("%module {}\n\n", MODULE_NAME);

    code.push_str("%{\n");
    for class in &ordered {
        code.push_str(&format!("#include \"{}\"\n", interface_path(&class.name)));
    }
    code.push_str("%}\n\n");

    for pd in &collected.predecls {
        code.push_str(pd);
        code.push('\n');
    }
    for e in &collected.enums {
        code.push_str(&format!("%include \"{}\"\n", enum_header_path(e)));
    }
    code.push('\n');

    for &class in &ordered {
        match &class.custom_decl {
            Some(lines) => {
                for line in lines {
                    code.push_str(line);
                    code.push('\n');
                }
            }
            None => code.push_str(&stub(orch, class)?),
        }
        code.push('\n');
    }

    code.push_str(&format!("%include \"{}\"\n", ROOT_PARAMS_HEADER));
    for class in &ordered {
        code.push_str(&format!("%include \"{}\"\n", interface_path(&class.name)));
    }
    Ok(code)
}

fn stub(orch: &Orchestrator, class: &ConfigClass) -> Result<String> {
    let base = match class.parent.as_deref() {
        Some(parent) => Some(orch.class(parent)?.qualified_cxx()),
        None => None,
    };

    let mut code = String::from("// stop swig from creating/wrapping default ctor/dtor\n");
    code.push_str(&format!("%nodefault {};\n", class.cxx_class));
    match base {
        Some(base) => code.push_str(&format!("class {} : public {} {{}};\n", class.cxx_class, base)),
        None => code.push_str(&format!("class {} {{}};\n", class.cxx_class)),
    }

    Ok(match &class.namespace {
        Some(ns) => format!("namespace {} {{\n{}}}\n", ns, code),
        None => code,
    })
}
