//! Enumeration Emitters.
//!
//! Each enumeration produces a declaration header (the `enum` itself and the
//! extern string table) and a definition source holding the string table.

use crate::common::error::Result;
use crate::registry::Orchestrator;

/// Directory enumeration files are emitted under.
pub const ENUMS_DIR: &str = "enums";

/// Include path of an enumeration's declaration header.
pub fn enum_header_path(name: &str) -> String {
    format!("{}/{}.hh", ENUMS_DIR, name)
}

/// Renders the string-table definition of enumeration `name`.
///
/// # Errors
///
/// Returns `GenError::UnknownEnum` if `name` is not registered.
pub fn render_enum_def(orch: &Orchestrator, name: &str) -> Result<String> {
    let e = orch.enumeration(name)?;
    let mut code = format!("#include \"{}\"\n\n", enum_header_path(&e.name));
    code.push_str("namespace Enums {\n");
    code.push_str(&format!(
        "    const char *{}[{}] =\n    {{\n",
        e.strings_symbol(),
        e.count_symbol()
    ));
    for value in &e.values {
        code.push_str(&format!("        \"{}\",\n", value.name));
    }
    code.push_str("    };\n");
    code.push_str("/* namespace Enums */ }\n");
    Ok(code)
}

/// Renders the declaration header of enumeration `name`.
///
/// # Errors
///
/// Returns `GenError::UnknownEnum` if `name` is not registered.
pub fn render_enum_decl(orch: &Orchestrator, name: &str) -> Result<String> {
    let e = orch.enumeration(name)?;
    let guard = format!("__ENUM__{}__", e.name);
    let mut code = format!("#ifndef {}\n#define {}\n\n", guard, guard);
    code.push_str("namespace Enums {\n");
    code.push_str(&format!("    enum {} {{\n", e.name));
    for value in &e.values {
        code.push_str(&format!("        {} = {},\n", value.name, value.value));
    }
    code.push_str(&format!("        {} = {}\n", e.count_symbol(), e.values.len()));
    code.push_str("    };\n");
    code.push_str(&format!(
        "extern const char *{}[{}];\n",
        e.strings_symbol(),
        e.count_symbol()
    ));
    code.push_str("}\n\n");
    code.push_str(&format!("#endif // {}\n", guard));
    Ok(code)
}
