//! Driver: registry → op_defs_core.{h,cc}
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};

use crate::config::GeneratorConfig;
use crate::output::{self, Freshness};
use crate::registry::{self, FileSource, PayloadFormat, RegistrySource};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate C++ operator descriptor structs from an operator registry dump
#[derive(Parser, Debug)]
#[command(name = "op-defs-gen", version)]
pub struct CommandLineInterface {
    /// name of a single op to generate (testing only); empty generates all
    #[arg(long = "op_name", short = 'n', default_value = "")]
    op_name: String,

    /// serialized OpList payloads; literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    registry: Vec<String>,

    /// payload encoding; `auto` picks JSON for `.json` files and protobuf otherwise
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// output directory (overrides the config file)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// JSON file overriding generator settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// compare with the files on disk instead of writing; fails if they differ
    #[arg(long, default_value_t = false)]
    check: bool,

    /// more logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FormatArg {
    Auto,
    Proto,
    Json,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl FormatArg {
    fn forced(self) -> Option<PayloadFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Proto => Some(PayloadFormat::Proto),
            FormatArg::Json => Some(PayloadFormat::Json),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let config = self.resolve_config()?;
        let sources = self.sources()?;
        let op_name = Some(self.op_name.as_str()).filter(|n| !n.is_empty());

        let generated = crate::generate_from_sources(&sources, op_name, &config)
            .context("generation aborted, no files were written")?;

        if self.check {
            match output::check_sources(&generated, &config) {
                Freshness::UpToDate => {
                    tracing::info!("generated sources are up to date");
                }
                Freshness::Stale(paths) => {
                    let list = paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ");
                    bail!("generated sources are out of date: {list}");
                }
            }
        } else {
            output::write_sources(&generated, &config)?;
        }
        Ok(())
    }

    fn resolve_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        config.validate()?;
        Ok(config)
    }

    fn sources(&self) -> anyhow::Result<Vec<Box<dyn RegistrySource>>> {
        let paths = registry::resolve_file_path_patterns(&self.registry)?;
        Ok(paths
            .into_iter()
            .map(|path| Box::new(FileSource::new(path).with_format(self.format.forced())) as Box<dyn RegistrySource>)
            .collect())
    }
}

// ------------------------------- Tests ------------------------------------ //
