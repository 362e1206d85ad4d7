//! Generation Errors.
//!
//! Every failure in this crate is fatal to the generation step: the external
//! build scheduler discards partial output and re-runs the step. The only
//! best-effort path (build provenance) never produces a `GenError`.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal error raised while discovering classes or rendering artifacts.
#[derive(Debug, Error)]
pub enum GenError {
    /// A requested configuration class could not be resolved by the loader.
    #[error("unresolved configuration class '{0}'")]
    UnresolvedClass(String),

    /// A module imported by a manifest could not be resolved.
    #[error("module '{module}' imported by '{importer}' could not be resolved")]
    UnresolvedImport { module: String, importer: String },

    /// The base runtime module is missing or does not declare the root class.
    #[error("base runtime module '{module}' must declare root class '{root}'")]
    MissingRoot { module: String, root: String },

    /// A class names a parent that no module declares.
    #[error("class '{class}' derives from unknown class '{parent}'")]
    UnknownParent { class: String, parent: String },

    /// Following parent links from a class leads back to it.
    #[error("inheritance cycle through class '{0}'")]
    InheritanceCycle(String),

    /// Two modules declare a class with the same name.
    #[error("class '{name}' declared by both '{first}' and '{second}'")]
    DuplicateClass {
        name: String,
        first: String,
        second: String,
    },

    /// Two modules declare an enumeration with the same name.
    #[error("enumeration '{0}' declared more than once")]
    DuplicateEnum(String),

    /// An enumeration declares the same value name twice.
    #[error("enumeration '{enumeration}' repeats value '{value}'")]
    DuplicateEnumValue { enumeration: String, value: String },

    /// The environment table contains a key or value that cannot be represented.
    #[error("malformed build environment: {0}")]
    MalformedEnv(String),

    /// A parameter guard references a key absent from the environment.
    #[error("parameter '{param}' of '{class}' is guarded by unknown environment key '{key}'")]
    UnknownEnvKey {
        class: String,
        param: String,
        key: String,
    },

    /// A parameter type string could not be parsed.
    #[error("invalid parameter type '{ty}' for '{class}.{param}'")]
    InvalidParamType {
        class: String,
        param: String,
        ty: String,
    },

    /// A parameter type names a class that no module declares.
    #[error("parameter '{param}' of '{class}' has type '{ty}' naming an unknown class")]
    UnknownParamClass {
        class: String,
        param: String,
        ty: String,
    },

    /// A manifest failed to parse.
    #[error("failed to parse manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The build configuration failed to parse.
    #[error("failed to parse build configuration {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An emitter was handed a class name the orchestrator never registered.
    #[error("no configuration class named '{0}' is registered")]
    UnknownClass(String),

    /// An emitter was handed an enumeration name the orchestrator never registered.
    #[error("no enumeration named '{0}' is registered")]
    UnknownEnum(String),

    /// An emitter was handed a parameter type the orchestrator never registered.
    #[error("no binding-eligible parameter type named '{0}' is registered")]
    UnknownParamType(String),

    /// The trace flag list is inconsistent.
    #[error("invalid trace flag list: {0}")]
    InvalidFlags(String),

    /// A scripting source is not valid UTF-8.
    #[error("scripting source {0} is not valid UTF-8")]
    InvalidSource(PathBuf),

    /// Packaging was asked for a compiled file with no source descriptor.
    #[error("no source descriptor produces compiled file {0}")]
    UnknownCompiled(PathBuf),

    /// Two source descriptors produce the same compiled file.
    #[error("compiled file {0} is produced by more than one source")]
    DuplicateCompiled(PathBuf),

    /// Writing the bundle archive failed.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Reading a source or writing an artifact failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, GenError>;
