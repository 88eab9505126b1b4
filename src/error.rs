//! Error taxonomy: one enum per pipeline stage plus an umbrella [`Error`].
//!
//! Every variant is fatal. Nothing in the pipeline retries or recovers: a
//! partial set of generated descriptors is worse than none.
use std::path::PathBuf;

use thiserror::Error;

// ————————————————————————————————————————————————————————————————————————————
// LOADER
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read registry `{source_name}`: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed protobuf registry payload `{source_name}`: {source}")]
    MalformedProto {
        source_name: String,
        #[source]
        source: protobuf::Error,
    },

    #[error("malformed JSON registry payload `{source_name}`: {message}")]
    MalformedJson { source_name: String, message: String },

    #[error("invalid registry pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    #[error("registry pattern matched no files: {0}")]
    NoMatches(String),

    #[error("no registry inputs given")]
    NoSources,

    #[error("operator `{0}` not found in the registry")]
    OperatorNotFound(String),
}

// ————————————————————————————————————————————————————————————————————————————
// SYNTHESIS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("operator `{op}`: attribute `{attr}` has unknown type `{ty}`")]
    UnknownAttributeType { op: String, attr: String, ty: String },

    #[error("operator `{op}`: argument `{arg}` sets both number_attr and type_list_attr")]
    ConflictingCardinality { op: String, arg: String },

    #[error("operator `{op}`: argument `{arg}` refers to undeclared attribute `{attr}`")]
    UnknownCountAttribute { op: String, arg: String, attr: String },

    #[error("operators `{first}` and `{second}` both map to struct name `{struct_name}`")]
    StructNameCollision {
        struct_name: String,
        first: String,
        second: String,
    },

    #[error("operator `{op}`: `{first}` and `{second}` both map to enumerator `{ident}`")]
    EnumeratorCollision {
        op: String,
        ident: String,
        first: String,
        second: String,
    },
}

// ————————————————————————————————————————————————————————————————————————————
// EMITTER / OUTPUT
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("failed to write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to replace `{}`: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

// ————————————————————————————————————————————————————————————————————————————
// CONFIG
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config `{}`: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("namespace `{0}` is not a valid identifier")]
    InvalidNamespace(String),

    #[error("at least one namespace is required")]
    NoNamespaces,

    #[error("`{0}` must not be empty")]
    EmptyFileName(&'static str),

    #[error("declarations and definitions would both be written to `{0}`")]
    SameOutputFile(String),

    #[error("`{field}` would break the generated source: {value:?}")]
    UnsafeBannerText { field: &'static str, value: String },
}

// ————————————————————————————————————————————————————————————————————————————
// UMBRELLA
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Emitter(#[from] EmitterError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
