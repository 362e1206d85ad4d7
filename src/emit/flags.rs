//! Debug-Flag Tables.
//!
//! Three renderings of one ordered flag list: a scripting module, a native
//! source with the string and compound-member tables, and the native header
//! numbering every flag. Simple flags come first in declaration order, then
//! the implicit `All` compound, then the declared compounds.

use crate::common::error::{GenError, Result};
use crate::model::flags::TraceFlag;
use crate::emit::script_string;
use std::collections::HashSet;

/// Compound flag implicitly covering every simple flag.
pub const ALL_FLAG: &str = "All";

/// Terminator of each compound member array.
pub const MEMBER_SENTINEL: &str = "(Flags)-1";

/// Checks that a flag list can be rendered.
///
/// # Errors
///
/// Returns `GenError::InvalidFlags` if a name repeats, a flag is named
/// `All`, or a compound lists something other than a simple flag.
pub fn validate_flags(flags: &[TraceFlag]) -> Result<()> {
    let mut names = HashSet::new();
    for flag in flags {
        if flag.name == ALL_FLAG {
            return Err(GenError::InvalidFlags(format!(
                "'{}' is reserved",
                ALL_FLAG
            )));
        }
        if !names.insert(flag.name.as_str()) {
            return Err(GenError::InvalidFlags(format!(
                "flag '{}' declared twice",
                flag.name
            )));
        }
    }
    let simple: HashSet<&str> = simple_flags(flags).collect();
    for flag in flags.iter().filter(|f| f.is_compound) {
        if let Some(m) = flag.members.iter().find(|m| !simple.contains(m.as_str())) {
            return Err(GenError::InvalidFlags(format!(
                "compound flag '{}' lists '{}', which is not a simple flag",
                flag.name, m
            )));
        }
    }
    Ok(())
}

fn simple_flags(flags: &[TraceFlag]) -> impl Iterator<Item = &str> {
    flags
        .iter()
        .filter(|f| !f.is_compound)
        .map(|f| f.name.as_str())
}

fn compound_flags(flags: &[TraceFlag]) -> impl Iterator<Item = &TraceFlag> {
    flags.iter().filter(|f| f.is_compound)
}

fn script_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = items.map(script_string).collect();
    format!("[{}]", quoted.join(", "))
}

/// Renders the scripting module describing every flag.
pub fn render_flags_script(flags: &[TraceFlag]) -> Result<String> {
    validate_flags(flags)?;

    let mut code = String::from("baseFlags = [\n");
    for name in simple_flags(flags) {
        code.push_str(&format!("    {},\n", script_string(name)));
    }
    code.push_str("]\n\n");

    code.push_str("compoundFlags = [\n");
    code.push_str(&format!("    {},\n", script_string(ALL_FLAG)));
    for flag in compound_flags(flags) {
        code.push_str(&format!("    {},\n", script_string(&flag.name)));
    }
    code.push_str("]\n\n");

    code.push_str("allFlags = frozenset(baseFlags + compoundFlags)\n\n");

    code.push_str("compoundFlagMap = {\n");
    code.push_str(&format!(
        "    {} : {},\n",
        script_string(ALL_FLAG),
        script_list(simple_flags(flags))
    ));
    for flag in compound_flags(flags) {
        code.push_str(&format!(
            "    {} : {},\n",
            script_string(&flag.name),
            script_list(flag.members.iter().map(String::as_str))
        ));
    }
    code.push_str("}\n\n");

    code.push_str("flagDescriptions = {\n");
    code.push_str(&format!(
        "    {} : {},\n",
        script_string(ALL_FLAG),
        script_string("All flags")
    ));
    for flag in flags {
        code.push_str(&format!(
            "    {} : {},\n",
            script_string(&flag.name),
            script_string(&flag.description)
        ));
    }
    code.push_str("}\n");
    Ok(code)
}

/// Renders the native source holding the flag string and member tables.
pub fn render_flags_source(flags: &[TraceFlag]) -> Result<String> {
    validate_flags(flags)?;

    let mut code = String::from(
        "/*\n * DO NOT EDIT THIS FILE! Automatically generated\n */\n\n\
         #include \"base/traceflags.hh\"\n\n\
         using namespace Trace;\n\n\
         const char *Trace::flagStrings[] =\n{\n",
    );
    let mut count = 0;
    for name in simple_flags(flags) {
        code.push_str(&format!("    \"{}\",\n", name));
        count += 1;
    }
    code.push_str(&format!("    \"{}\",\n", ALL_FLAG));
    count += 1;
    for flag in compound_flags(flags) {
        code.push_str(&format!("    \"{}\",\n", flag.name));
        count += 1;
    }
    code.push_str("};\n\n");
    code.push_str(&format!("const int Trace::numFlagStrings = {};\n\n", count));

    code.push_str(&member_array(ALL_FLAG, simple_flags(flags)));
    for flag in compound_flags(flags) {
        code.push_str(&member_array(
            &flag.name,
            flag.members.iter().map(String::as_str),
        ));
    }

    code.push_str("const Flags *Trace::compoundFlags[] =\n{\n");
    code.push_str(&format!("    {}Map,\n", ALL_FLAG));
    for flag in compound_flags(flags) {
        code.push_str(&format!("    {}Map,\n", flag.name));
    }
    code.push_str("};\n");
    Ok(code)
}

fn member_array<'a>(name: &str, members: impl Iterator<Item = &'a str>) -> String {
    let mut code = format!("static const Flags {}Map[] = {{\n", name);
    for member in members {
        code.push_str(&format!("    {},\n", member));
    }
    code.push_str(&format!("    {}\n}};\n\n", MEMBER_SENTINEL));
    code
}

/// Renders the native header numbering every flag.
pub fn render_flags_header(flags: &[TraceFlag]) -> Result<String> {
    validate_flags(flags)?;

    let mut code = String::from(
        "/*\n * DO NOT EDIT THIS FILE!\n *\n * Automatically generated from the trace flag list\n */\n\n\
         #ifndef __BASE_TRACE_FLAGS_HH__\n\
         #define __BASE_TRACE_FLAGS_HH__\n\n\
         namespace Trace {\n\n\
         enum Flags {\n",
    );

    let mut idx = 0usize;
    for name in simple_flags(flags) {
        code.push_str(&format!("    {} = {},\n", name, idx));
        idx += 1;
    }
    let num_flags = idx;
    code.push_str(&format!("    NumFlags = {},\n", num_flags));

    code.push_str(
        "\n// The remaining enum values are *not* valid indices for Trace::flags.\n\
         // They are \"compound\" flags, which correspond to sets of base\n\
         // flags, and are used by changeFlag.\n",
    );
    code.push_str(&format!("    {} = {},\n", ALL_FLAG, idx));
    idx += 1;
    for flag in compound_flags(flags) {
        code.push_str(&format!("    {} = {},\n", flag.name, idx));
        idx += 1;
    }
    code.push_str(&format!("    NumCompoundFlags = {}\n", idx - num_flags));

    code.push_str(
        "}; // enum Flags\n\n\
         // Array of strings for SimpleEnumParam\n\
         extern const char *flagStrings[];\n\
         extern const int numFlagStrings;\n\n\
         // Array of array pointers: for each compound flag, gives the list of\n\
         // base flags to set.  Individual flag arrays are terminated by -1.\n\
         extern const Flags *compoundFlags[];\n\n\
         /* namespace Trace */ }\n\n\
         #endif // __BASE_TRACE_FLAGS_HH__\n",
    );
    Ok(code)
}
