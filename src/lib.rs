//! Generate C++ operator descriptor structs from an operator registry.
//!
//! Pipeline: [`registry`] (load) → [`lower`] (synthesize) → [`codegen`]
//! (emit) → [`output`] (write). Every stage is deterministic and any failure
//! aborts the whole run.
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod ir;
pub mod logging;
pub mod lower;
pub mod naming;
pub mod output;
pub mod path_de;
pub mod registry;
pub mod schema;

pub use codegen::GeneratedSources;
pub use config::GeneratorConfig;
pub use error::{Error, Result};

/// Synthesize and emit an already-loaded registry.
pub fn generate(schemas: &[schema::OperatorSchema], config: &GeneratorConfig) -> Result<GeneratedSources> {
    let descriptors = lower::synthesize_all(schemas)?;
    Ok(codegen::emit(&descriptors, config))
}

/// Load, synthesize and emit. Nothing is written.
pub fn generate_from_sources(
    sources: &[Box<dyn registry::RegistrySource>],
    op_name: Option<&str>,
    config: &GeneratorConfig,
) -> Result<GeneratedSources> {
    let schemas = registry::load_schemas(sources, op_name)?;
    tracing::info!(operators = schemas.len(), "loaded operator schemas");
    generate(&schemas, config)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::registry::{FileSource, RegistrySource};

    fn golden(case: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("dev-test-runner/golden").join(case)
    }

    fn regenerate(case: &str, op_name: Option<&str>) -> GeneratedSources {
        let sources: Vec<Box<dyn RegistrySource>> =
            vec![Box::new(FileSource::new(golden(case).join("registry.json")))];
        generate_from_sources(&sources, op_name, &GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn core_subset_matches_golden_files() {
        let out = regenerate("core_subset", None);
        let dir = golden("core_subset");
        assert_eq!(out.declarations, std::fs::read_to_string(dir.join("op_defs_core.h")).unwrap());
        assert_eq!(out.definitions, std::fs::read_to_string(dir.join("op_defs_core.cc")).unwrap());
    }

    #[test]
    fn single_op_filter_matches_golden_files() {
        let out = regenerate("single_op", Some("StringFormat"));
        let dir = golden("single_op");
        assert_eq!(out.declarations, std::fs::read_to_string(dir.join("op_defs_core.h")).unwrap());
        assert_eq!(out.declarations.matches("\nstruct ").count(), 1);
    }

    #[test]
    fn keyword_operator_emits_compilable_struct_name() {
        let out = generate(&[schema::OperatorSchema::new("delete")], &GeneratorConfig::default()).unwrap();
        assert!(out.declarations.contains("struct delete_\n{\n"), "{}", out.declarations);
        assert!(out.declarations.contains(r#"name = "delete";"#));
        assert!(!out.declarations.contains("struct delete\n"));
    }

    #[test]
    fn regenerating_is_byte_identical() {
        assert_eq!(regenerate("core_subset", None), regenerate("core_subset", None));
    }
}
