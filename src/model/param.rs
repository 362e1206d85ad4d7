//! Typed Parameters.
//!
//! A parameter's type is written in manifests as a plain name (`Tick`,
//! `MemoryMode`, `BaseCPU`) or as a vector of one (`Vector<BaseCPU>`). Names
//! are resolved once discovery has finished: builtin scalars first, then
//! registered enumerations; anything else names a configuration class, which
//! the orchestrator requires to be registered.

/// Builtin scalar parameter types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool,
    Int,
    Unsigned,
    Int64,
    UInt64,
    Float,
    String,
    Tick,
    Counter,
    Addr,
    Latency,
    Frequency,
    MemorySize,
    Percent,
    Cycles,
}

const STDINT: &str = "%import \"stdint.i\"";
const BASE_TYPES: &str = "%import \"base/types.hh\"";
const STD_STRING: &str = "%include \"std_string.i\"";
const STD_VECTOR: &str = "%include \"std_vector.i\"";

impl Scalar {
    /// Resolves a builtin type name.
    pub fn from_name(name: &str) -> Option<Self> {
        let scalar = match name {
            "Bool" => Scalar::Bool,
            "Int" => Scalar::Int,
            "Unsigned" => Scalar::Unsigned,
            "Int64" => Scalar::Int64,
            "UInt64" => Scalar::UInt64,
            "Float" => Scalar::Float,
            "String" => Scalar::String,
            "Tick" => Scalar::Tick,
            "Counter" => Scalar::Counter,
            "Addr" => Scalar::Addr,
            "Latency" => Scalar::Latency,
            "Frequency" => Scalar::Frequency,
            "MemorySize" => Scalar::MemorySize,
            "Percent" => Scalar::Percent,
            "Cycles" => Scalar::Cycles,
            _ => return None,
        };
        Some(scalar)
    }

    /// Native type the scalar maps to.
    pub fn cxx_type(self) -> &'static str {
        match self {
            Scalar::Bool => "bool",
            Scalar::Int | Scalar::Percent => "int",
            Scalar::Unsigned => "unsigned",
            Scalar::Int64 => "int64_t",
            Scalar::UInt64 | Scalar::MemorySize => "uint64_t",
            Scalar::Float => "double",
            Scalar::String => "std::string",
            Scalar::Tick | Scalar::Latency | Scalar::Frequency => "Tick",
            Scalar::Counter => "Counter",
            Scalar::Addr => "Addr",
            Scalar::Cycles => "Cycles",
        }
    }

    fn predecls(self) -> &'static [&'static str] {
        match self {
            Scalar::Int64 | Scalar::UInt64 | Scalar::MemorySize => &[STDINT],
            Scalar::Tick
            | Scalar::Counter
            | Scalar::Addr
            | Scalar::Latency
            | Scalar::Frequency
            | Scalar::Cycles => &[STDINT, BASE_TYPES],
            Scalar::String => &[STD_STRING],
            Scalar::Bool | Scalar::Int | Scalar::Unsigned | Scalar::Float | Scalar::Percent => &[],
        }
    }

    fn includes(self) -> &'static [&'static str] {
        match self {
            Scalar::Int64 | Scalar::UInt64 | Scalar::MemorySize => &["<stdint.h>"],
            Scalar::Tick
            | Scalar::Counter
            | Scalar::Addr
            | Scalar::Latency
            | Scalar::Frequency
            | Scalar::Cycles => &["\"base/types.hh\""],
            Scalar::String => &["<string>"],
            Scalar::Bool | Scalar::Int | Scalar::Unsigned | Scalar::Float | Scalar::Percent => &[],
        }
    }
}

/// Resolved shape of a parameter type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// Builtin scalar.
    Scalar(Scalar),
    /// Registered enumeration, by name.
    Enum(String),
    /// Reference to a configuration class, by name.
    Object(String),
    /// Vector of a non-vector kind.
    Vector(Box<ParamKind>),
}

impl ParamKind {
    fn parse_element(text: &str, is_enum: &dyn Fn(&str) -> bool) -> Option<Self> {
        if !is_type_name(text) {
            return None;
        }
        if let Some(scalar) = Scalar::from_name(text) {
            return Some(ParamKind::Scalar(scalar));
        }
        if is_enum(text) {
            Some(ParamKind::Enum(text.to_string()))
        } else {
            Some(ParamKind::Object(text.to_string()))
        }
    }

    fn cxx_type(&self, qualify: &dyn Fn(&str) -> String) -> String {
        match self {
            ParamKind::Scalar(s) => s.cxx_type().to_string(),
            ParamKind::Enum(e) => format!("Enums::{}", e),
            ParamKind::Object(o) => format!("{} *", qualify(o)),
            ParamKind::Vector(inner) => format!("std::vector< {} >", inner.cxx_type(qualify)),
        }
    }
}

/// A parameter type: the name as written plus its resolved kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamType {
    name: String,
    kind: ParamKind,
}

impl ParamType {
    /// Parses a type string.
    ///
    /// # Arguments
    ///
    /// * `text` - The type as written in a manifest.
    /// * `is_enum` - Reports whether a name is a registered enumeration.
    ///
    /// # Returns
    ///
    /// `None` if the text is not a type name or a vector of one.
    pub fn parse(text: &str, is_enum: &dyn Fn(&str) -> bool) -> Option<Self> {
        let text = text.trim();
        match text
            .strip_prefix("Vector<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Some(inner) => {
                let inner = inner.trim();
                let element = ParamKind::parse_element(inner, is_enum)?;
                Some(Self {
                    name: format!("Vector<{}>", inner),
                    kind: ParamKind::Vector(Box::new(element)),
                })
            }
            None => Some(Self {
                name: text.to_string(),
                kind: ParamKind::parse_element(text, is_enum)?,
            }),
        }
    }

    /// Type name, normalised (`Vector<T>` has no inner whitespace).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved kind.
    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    /// Whether the type needs a foreign-binding declaration of its own.
    pub fn needs_binding(&self) -> bool {
        matches!(self.kind, ParamKind::Vector(_))
    }

    /// Enumeration this type refers to, directly or as a vector element.
    pub fn enum_name(&self) -> Option<&str> {
        match &self.kind {
            ParamKind::Enum(e) => Some(e),
            ParamKind::Vector(inner) => match inner.as_ref() {
                ParamKind::Enum(e) => Some(e),
                _ => None,
            },
            _ => None,
        }
    }

    /// Configuration class this type refers to, directly or as a vector element.
    pub fn object_name(&self) -> Option<&str> {
        match &self.kind {
            ParamKind::Object(o) => Some(o),
            ParamKind::Vector(inner) => match inner.as_ref() {
                ParamKind::Object(o) => Some(o),
                _ => None,
            },
            _ => None,
        }
    }

    /// Native type of a field holding this parameter.
    pub fn cxx_type(&self) -> String {
        self.kind.cxx_type(&|o| o.to_string())
    }

    /// Native type with object references spelled by `qualify`.
    pub fn cxx_type_with(&self, qualify: &dyn Fn(&str) -> String) -> String {
        self.kind.cxx_type(qualify)
    }

    /// Predeclarations the binding module needs before this type is usable.
    pub fn predecls(&self) -> Vec<String> {
        fn element(kind: &ParamKind, out: &mut Vec<String>) {
            match kind {
                ParamKind::Scalar(s) => out.extend(s.predecls().iter().map(|p| p.to_string())),
                ParamKind::Enum(_) => {}
                ParamKind::Object(o) => out.push(format!("class {};", o)),
                ParamKind::Vector(inner) => {
                    element(inner, out);
                    out.push(STD_VECTOR.to_string());
                }
            }
        }
        let mut out = Vec::new();
        element(&self.kind, &mut out);
        out
    }

    /// Header includes an interface using this type needs.
    pub fn cxx_includes(&self) -> Vec<String> {
        fn element(kind: &ParamKind, out: &mut Vec<String>) {
            match kind {
                ParamKind::Scalar(s) => out.extend(s.includes().iter().map(|i| i.to_string())),
                ParamKind::Enum(e) => out.push(format!("\"enums/{}.hh\"", e)),
                ParamKind::Object(_) => {}
                ParamKind::Vector(inner) => {
                    out.push("<vector>".to_string());
                    element(inner, out);
                }
            }
        }
        let mut out = Vec::new();
        element(&self.kind, &mut out);
        out
    }

    /// Identifier-safe name of the type (`Vector<BaseCPU>` is `vector_BaseCPU`).
    ///
    /// Built from the name as written, so types sharing a native type
    /// (`Vector<Int>`, `Vector<Percent>`) keep distinct tags.
    pub fn tag(&self) -> String {
        match self
            .name
            .strip_prefix("Vector<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Some(inner) => format!("vector_{}", inner),
            None => self.name.clone(),
        }
    }

    /// Foreign-binding declaration lines. Empty unless `needs_binding()`.
    pub fn binding_decl(&self) -> Vec<String> {
        if !self.needs_binding() {
            return Vec::new();
        }
        vec![
            STD_VECTOR.to_string(),
            format!("%template({}) {};", self.tag(), self.cxx_type()),
        ]
    }
}

/// A typed parameter attached to a configuration class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ptype: ParamType,
    /// Human-readable description.
    pub desc: String,
    /// Default value as written, if any.
    pub default: Option<String>,
}

fn is_type_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
