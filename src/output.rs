//! Writing generated sources to disk.
//!
//! Each file is staged in a temporary file next to its destination and then
//! renamed over it, so readers see either the old or the new content.
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::codegen::GeneratedSources;
use crate::config::GeneratorConfig;
use crate::error::EmitterError;

/// Outcome of comparing generated text with what is on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    UpToDate,
    Stale(Vec<PathBuf>),
}

pub fn write_sources(sources: &GeneratedSources, config: &GeneratorConfig) -> Result<(), EmitterError> {
    for (path, text) in targets(sources, config) {
        write_atomically(&path, text)?;
        tracing::info!(path = %path.display(), bytes = text.len(), "wrote generated source");
    }
    Ok(())
}

/// Compare without writing. Missing or unreadable files count as stale.
pub fn check_sources(sources: &GeneratedSources, config: &GeneratorConfig) -> Freshness {
    let stale: Vec<PathBuf> = targets(sources, config)
        .into_iter()
        .filter(|(path, text)| match std::fs::read_to_string(path) {
            Ok(current) => current != *text,
            Err(_) => true,
        })
        .map(|(path, _)| path)
        .collect();
    if stale.is_empty() { Freshness::UpToDate } else { Freshness::Stale(stale) }
}

fn targets<'a>(sources: &'a GeneratedSources, config: &GeneratorConfig) -> [(PathBuf, &'a str); 2] {
    [
        (config.declarations_path(), sources.declarations.as_str()),
        (config.definitions_path(), sources.definitions.as_str()),
    ]
}

fn write_atomically(path: &Path, text: &str) -> Result<(), EmitterError> {
    let io_err = |source| EmitterError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
    staged.write_all(text.as_bytes()).map_err(io_err)?;
    staged.as_file().sync_all().map_err(io_err)?;
    staged.persist(path).map_err(|source| EmitterError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

// ------------------------------- Tests ------------------------------------ //
