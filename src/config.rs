//! Generator settings: where the files go and what surrounds the structs.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::naming::is_identifier;

/// Everything about the output that isn't derived from the registry.
///
/// Defaults reproduce the layout the DirectML runtime adapter expects. A JSON
/// file passed with `--config` may override any subset of the fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory receiving both files, relative to the invocation directory.
    pub out_dir: PathBuf,
    pub declarations_file: String,
    pub definitions_file: String,
    /// Outermost first.
    pub namespaces: Vec<String>,
    /// Header included by the definitions file.
    pub aggregate_include: String,
    pub copyright_holder: String,
    /// Named in the "do not edit" warning.
    pub generator_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("tfdml/runtime_adapter"),
            declarations_file: "op_defs_core.h".to_string(),
            definitions_file: "op_defs_core.cc".to_string(),
            namespaces: vec!["tfdml".to_string(), "ops".to_string()],
            aggregate_include: "tfdml/runtime_adapter/op_defs.h".to_string(),
            copyright_holder: "Microsoft Corporation".to_string(),
            generator_name: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Read a JSON config file; absent fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = crate::path_de::from_str_with_path(&source).map_err(|message| {
            ConfigError::Parse { path: path.to_path_buf(), message }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespaces.is_empty() {
            return Err(ConfigError::NoNamespaces);
        }
        if let Some(bad) = self.namespaces.iter().find(|ns| !is_identifier(ns)) {
            return Err(ConfigError::InvalidNamespace(bad.clone()));
        }

        for (field, name) in [
            ("declarations_file", &self.declarations_file),
            ("definitions_file", &self.definitions_file),
        ] {
            if name.is_empty() {
                return Err(ConfigError::EmptyFileName(field));
            }
        }
        // the second write would silently replace the first
        if self.declarations_file == self.definitions_file {
            return Err(ConfigError::SameOutputFile(self.declarations_file.clone()));
        }

        for (field, value) in [
            ("copyright_holder", &self.copyright_holder),
            ("generator_name", &self.generator_name),
            ("aggregate_include", &self.aggregate_include),
        ] {
            if value.contains("*/") || value.chars().any(char::is_control) {
                return Err(ConfigError::UnsafeBannerText { field, value: value.clone() });
            }
        }
        Ok(())
    }

    pub fn declarations_path(&self) -> PathBuf {
        self.out_dir.join(&self.declarations_file)
    }

    pub fn definitions_path(&self) -> PathBuf {
        self.out_dir.join(&self.definitions_file)
    }
}

// ------------------------------- Tests ------------------------------------ //
