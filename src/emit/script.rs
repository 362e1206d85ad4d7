//! Scripting Support Modules.
//!
//! Small scripting-layer modules generated next to the binding artifacts:
//! the build environment, the embedded-file info module, and the init module
//! of the aggregate object namespace.

use crate::common::env::{BuildEnv, EnvValue};
use crate::emit::script_string;

/// Renders the build-environment module, keys in sorted order.
pub fn render_build_env(env: &BuildEnv) -> String {
    let mut code = String::from("build_env = {\n");
    for (key, value) in env.iter() {
        let value = match value {
            EnvValue::Bool(true) => "True".to_string(),
            EnvValue::Bool(false) => "False".to_string(),
            EnvValue::Int(i) => i.to_string(),
            EnvValue::Str(s) => script_string(s),
        };
        code.push_str(&format!("    {} : {},\n", script_string(key), value));
    }
    code.push_str("}\n");
    code
}

/// Renders the info module: one string variable per embedded file.
///
/// # Arguments
///
/// * `files` - `(variable name, file contents)` pairs, emitted in the order given.
pub fn render_info(files: &[(&str, &str)]) -> String {
    let mut code = String::new();
    for (name, contents) in files {
        code.push_str(&format!("{} = {}\n", name, script_string(contents)));
    }
    code
}

/// Renders the init module of the aggregate object namespace.
pub fn render_objects_init<S: AsRef<str>>(modules: &[S]) -> String {
    let mut code = String::from("from params import *\n");
    for module in modules {
        code.push_str(&format!("from {} import *\n", module.as_ref()));
    }
    code
}
