//! Schema loading: fetch serialized `OpList` payloads and decode them into
//! [`OperatorSchema`]s, preserving registry order.
//!
//! Payloads come either as the registry's native binary protobuf message or
//! as its protobuf-JSON mapping; see [`proto`] and [`json`].
pub mod json;
pub mod proto;
mod protos;

use std::path::{Path, PathBuf};

use crate::error::LoaderError;
use crate::schema::OperatorSchema;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Proto,
    Json,
}

/// Raw bytes handed out by a registry plus how to read them.
#[derive(Debug, Clone)]
pub struct RegistryPayload {
    pub bytes: Vec<u8>,
    pub format: PayloadFormat,
}

/// Anything that can hand out a serialized operator list.
pub trait RegistrySource {
    /// Human-readable origin, used in diagnostics.
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<RegistryPayload, LoaderError>;
}

/// A registry dump on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
    pub format: Option<PayloadFormat>, // `None` → guess from extension
}

/// A payload already in memory (embedders, tests).
#[derive(Debug, Clone)]
pub struct InMemorySource {
    pub name: String,
    pub payload: RegistryPayload,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl PayloadFormat {
    /// `.json` is JSON, everything else is treated as binary protobuf.
    pub fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PayloadFormat::Json,
            _ => PayloadFormat::Proto,
        }
    }
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), format: None }
    }

    pub fn with_format(mut self, format: Option<PayloadFormat>) -> Self {
        self.format = format;
        self
    }
}

impl RegistrySource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<RegistryPayload, LoaderError> {
        let bytes = std::fs::read(&self.path).map_err(|source| LoaderError::Read {
            source_name: self.describe(),
            source,
        })?;
        let format = self.format.unwrap_or_else(|| PayloadFormat::from_extension(&self.path));
        Ok(RegistryPayload { bytes, format })
    }
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, format: PayloadFormat, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            payload: RegistryPayload { bytes: bytes.into(), format },
        }
    }
}

impl RegistrySource for InMemorySource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> Result<RegistryPayload, LoaderError> {
        Ok(self.payload.clone())
    }
}

/// Decode one payload into schemas, registry order preserved.
pub fn decode(source_name: &str, payload: &RegistryPayload) -> Result<Vec<OperatorSchema>, LoaderError> {
    match payload.format {
        PayloadFormat::Proto => proto::decode_op_list(source_name, &payload.bytes),
        PayloadFormat::Json => json::decode_op_list(source_name, &payload.bytes),
    }
}

/// Load every source in order and concatenate their operators.
///
/// With `op_name`, only the exactly matching operator is returned; a name
/// that matches nothing is an error rather than an empty result.
pub fn load_schemas(
    sources: &[Box<dyn RegistrySource>],
    op_name: Option<&str>,
) -> Result<Vec<OperatorSchema>, LoaderError> {
    if sources.is_empty() {
        return Err(LoaderError::NoSources);
    }
    let mut schemas = Vec::new();
    for source in sources {
        let name = source.describe();
        let payload = source.fetch()?;
        let ops = decode(&name, &payload)?;
        tracing::debug!(source = %name, format = ?payload.format, count = ops.len(), "decoded registry");
        schemas.extend(ops);
    }
    match op_name.filter(|n| !n.is_empty()) {
        None => Ok(schemas),
        Some(wanted) => {
            schemas.retain(|op| op.name == wanted);
            if schemas.is_empty() {
                return Err(LoaderError::OperatorNotFound(wanted.to_string()));
            }
            Ok(schemas)
        }
    }
}

/// Expand CLI inputs (literal paths or quoted glob patterns) into paths.
/// Glob matches come back sorted, so the result is deterministic.
pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, LoaderError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let entries = glob::glob(pattern).map_err(|e| LoaderError::Pattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            let mut matched_any = false;
            for entry in entries {
                let path = entry.map_err(|e| LoaderError::Pattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
                matched_any = true;
                out.push(path);
            }
            if !matched_any {
                return Err(LoaderError::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //
