//! Foreign-Binding Emitters.
//!
//! Per-type binding declarations and the initializer that chains every
//! binding sub-module's init entry point.

use crate::common::error::Result;
use crate::registry::Orchestrator;

/// Renders the binding declaration of a registered parameter type.
///
/// # Errors
///
/// Returns `GenError::UnknownParamType` if `name` is not registered.
pub fn render_param_binding(orch: &Orchestrator, name: &str) -> Result<String> {
    let ptype = orch.param_type(name)?;
    let mut code = String::new();
    for line in ptype.binding_decl() {
        code.push_str(&line);
        code.push('\n');
    }
    Ok(code)
}

/// Renders the binding initializer for `modules`, called in the given order.
pub fn render_binding_init<S: AsRef<str>>(modules: &[S]) -> String {
    let mut code = String::from("extern \"C\" {\n");
    for module in modules {
        code.push_str(&format!("    void init_{}();\n", module.as_ref()));
    }
    code.push_str("}\n\n");
    code.push_str("void init_swig() {\n");
    for module in modules {
        code.push_str(&format!("    init_{}();\n", module.as_ref()));
    }
    code.push_str("}\n");
    code
}
