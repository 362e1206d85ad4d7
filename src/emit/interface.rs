//! Interface Emitter.
//!
//! Renders the parameter interface header of one configuration class:
//! a `<Name>Params` struct deriving from the parent's, with a factory for
//! concrete classes and one field per local parameter.

use crate::common::error::Result;
use crate::model::class::ConfigClass;
use crate::registry::Orchestrator;
use std::collections::BTreeSet;

/// Directory interface headers are emitted under.
pub const PARAMS_DIR: &str = "params";

/// Include path of a class's interface header.
pub fn interface_path(class: &str) -> String {
    format!("{}/{}.hh", PARAMS_DIR, class)
}

/// Renders the interface header of `name`.
///
/// # Errors
///
/// Returns `GenError::UnknownClass` if `name`, or a class one of its
/// parameters refers to, is not registered.
pub fn render_interface(orch: &Orchestrator, name: &str) -> Result<String> {
    let class = orch.class(name)?;
    let guard = format!("__PARAMS__{}__", class.name);

    let mut includes = BTreeSet::new();
    let mut forwards = BTreeSet::new();
    let mut fields = Vec::with_capacity(class.params.len());
    for param in &class.params {
        includes.extend(param.ptype.cxx_includes());
        let ty = match param.ptype.object_name() {
            Some(o) => {
                let target = orch.class(o)?;
                forwards.insert(forward_decl(target));
                let qualified = target.qualified_cxx();
                param.ptype.cxx_type_with(&|_| qualified.clone())
            }
            None => param.ptype.cxx_type(),
        };
        fields.push(format!("    {} {};\n", ty, param.name));
    }
    if class.parent.is_none() {
        includes.insert("<string>".to_string());
    }
    if !class.is_abstract {
        forwards.insert(forward_decl(class));
    }

    let mut code = String::new();
    code.push_str(&format!("#ifndef {}\n", guard));
    code.push_str(&format!("#define {}\n\n", guard));

    if let Some(parent) = &class.parent {
        code.push_str(&format!("#include \"{}\"\n", interface_path(parent)));
    }
    for include in &includes {
        code.push_str(&format!("#include {}\n", include));
    }
    if class.parent.is_some() || !includes.is_empty() {
        code.push('\n');
    }

    for forward in &forwards {
        code.push_str(forward);
    }
    if !forwards.is_empty() {
        code.push('\n');
    }

    code.push_str(&format!("struct {}", class.params_struct()));
    match &class.parent {
        Some(parent) => code.push_str(&format!("\n    : public {}Params\n{{\n", parent)),
        None => code.push_str(&format!(
            "\n{{\n    virtual ~{}() {{}}\n\n    std::string name;\n",
            class.params_struct()
        )),
    }
    if !class.is_abstract {
        code.push_str(&format!("    {} *create();\n", class.qualified_cxx()));
    }
    for field in &fields {
        code.push_str(field);
    }
    code.push_str("};\n\n");
    code.push_str(&format!("#endif // {}\n", guard));
    Ok(code)
}

fn forward_decl(class: &ConfigClass) -> String {
    match &class.namespace {
        Some(ns) => format!("namespace {} {{ class {}; }}\n", ns, class.cxx_class),
        None => format!("class {};\n", class.cxx_class),
    }
}
