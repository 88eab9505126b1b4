//! Golden-file regression runner for the generator.
//!
//! Each case is a directory holding `case.json` and the expected
//! `op_defs_core.h` / `op_defs_core.cc`. Cases are regenerated in memory and
//! compared byte for byte.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use serde::Deserialize;

use dev_test_runner::should_skip_test;
use op_defs_gen::GeneratorConfig;
use op_defs_gen::registry::{FileSource, RegistrySource};

/// regenerate golden cases and compare with the checked-in expectations
#[derive(Parser, Debug)]
struct Args {
    /// directory containing one sub-directory per case
    #[arg(long, default_value = "dev-test-runner/golden")]
    golden_dir: PathBuf,

    /// skip cases whose name matches this regex (anchored at the start)
    #[arg(long)]
    skip: Option<String>,

    /// overwrite expectations with the current output
    #[arg(long, default_value_t = false)]
    bless: bool,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct Case {
    /// Relative to the case directory.
    registry: PathBuf,
    #[serde(default)]
    op_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Passed,
    Failed,
    Skipped,
    Blessed,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    let mut case_dirs = find_cases(&args.golden_dir)?;
    case_dirs.sort();

    let mut counts = [0usize; 4];
    for dir in &case_dirs {
        let name = dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let outcome = match &args.skip {
            Some(pattern) if should_skip_test(pattern, &[name.as_str()])? => Outcome::Skipped,
            _ => run_case(dir, args.bless).with_context(|| format!("case {name}"))?,
        };
        let label = match outcome {
            Outcome::Passed => "ok".green(),
            Outcome::Failed => "FAILED".red().bold(),
            Outcome::Skipped => "skipped".yellow(),
            Outcome::Blessed => "blessed".cyan(),
        };
        println!("{name:<40} {label}");
        counts[outcome as usize] += 1;
    }

    println!();
    println!(
        "{} passed, {} failed, {} skipped, {} blessed",
        counts[Outcome::Passed as usize],
        counts[Outcome::Failed as usize],
        counts[Outcome::Skipped as usize],
        counts[Outcome::Blessed as usize],
    );
    Ok(counts[Outcome::Failed as usize] == 0)
}

/// Sub-directories holding a `case.json`. An unreadable entry fails the run
/// instead of dropping the case.
fn find_cases(golden_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut case_dirs = Vec::new();
    for entry in std::fs::read_dir(golden_dir).with_context(|| format!("reading {}", golden_dir.display()))? {
        let path = entry.with_context(|| format!("reading {}", golden_dir.display()))?.path();
        if path.join("case.json").is_file() {
            case_dirs.push(path);
        }
    }
    Ok(case_dirs)
}

fn run_case(dir: &Path, bless: bool) -> Result<Outcome> {
    let case_src = std::fs::read_to_string(dir.join("case.json"))?;
    let case: Case = op_defs_gen::path_de::from_str_with_path(&case_src).map_err(anyhow::Error::msg)?;

    let config = GeneratorConfig { out_dir: dir.to_path_buf(), ..GeneratorConfig::default() };
    let sources: Vec<Box<dyn RegistrySource>> = vec![Box::new(FileSource::new(dir.join(&case.registry)))];
    let generated = op_defs_gen::generate_from_sources(&sources, case.op_name.as_deref(), &config)?;

    if bless {
        op_defs_gen::output::write_sources(&generated, &config)?;
        return Ok(Outcome::Blessed);
    }
    match op_defs_gen::output::check_sources(&generated, &config) {
        op_defs_gen::output::Freshness::UpToDate => Ok(Outcome::Passed),
        op_defs_gen::output::Freshness::Stale(paths) => {
            for path in paths {
                eprintln!("  mismatch: {}", path.display());
            }
            Ok(Outcome::Failed)
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_directories_with_a_case_file_are_cases() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("with_case")).unwrap();
        std::fs::write(dir.path().join("with_case/case.json"), "{}").unwrap();
        std::fs::create_dir(dir.path().join("scratch")).unwrap();

        let cases = find_cases(dir.path()).unwrap();
        assert_eq!(cases, [dir.path().join("with_case")]);
    }

    #[test]
    fn unreadable_golden_dir_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = find_cases(&missing).unwrap_err();
        assert!(err.to_string().contains("nope"), "{err}");
    }
}
