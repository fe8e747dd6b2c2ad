//! GOCAD mesh QC command-line tool
//!
//! Runs the full check suite over a batch of `.ts` files and prints a summary
//! table followed by the detail report, or the whole batch as JSON.
//!
//! Exit status: 0 when every file is valid, 1 when any file is invalid,
//! 2 when the configuration cannot be used.

#![forbid(unsafe_code)]

use clap::Parser;
use gocad_qc::{BatchReport, KeywordConfig, MeshFileSpec, analyze_batch};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the QC run
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mesh files to check
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Naming prefix for a file's objects, e.g. faults.ts=FLT
    #[arg(long, value_name = "FILE=PREFIX", value_parser = parse_assignment)]
    prefix: Vec<(String, String)>,

    /// Identifier table for a file, e.g. faults.ts=faults.csv
    #[arg(long, value_name = "FILE=CSV", value_parser = parse_assignment)]
    table: Vec<(String, String)>,

    /// JSON file with keyword vocabularies (defaults to the built-in set)
    #[arg(short, long, value_name = "CONFIG.json")]
    keywords: Option<PathBuf>,

    /// Warn about special keywords whose value breaks its rule
    #[arg(long)]
    check_special_values: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_assignment(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((file, assigned)) if !file.is_empty() && !assigned.is_empty() => {
            Ok((file.to_string(), assigned.to_string()))
        }
        _ => Err(format!("expected FILE=VALUE, got '{}'", value)),
    }
}

/// Look up a per-file assignment by path as given or by file name
fn assigned<'a>(assignments: &'a HashMap<String, String>, path: &Path) -> Option<&'a str> {
    let by_path = assignments.get(path.to_string_lossy().as_ref());
    let by_name = || {
        path.file_name()
            .and_then(|n| assignments.get(n.to_string_lossy().as_ref()))
    };
    by_path.or_else(by_name).map(String::as_str)
}

fn build_specs(args: &Args) -> gocad_qc::Result<Vec<MeshFileSpec>> {
    let prefixes: HashMap<String, String> = args.prefix.iter().cloned().collect();
    let tables: HashMap<String, String> = args.table.iter().cloned().collect();

    args.files
        .iter()
        .map(|path| {
            let mut spec = MeshFileSpec::new(path.clone());
            if let Some(prefix) = assigned(&prefixes, path) {
                spec = spec.with_prefix(prefix)?;
            }
            if let Some(table) = assigned(&tables, path) {
                spec = spec.with_identifier_table(table);
            }
            Ok(spec)
        })
        .collect()
}

fn load_config(args: &Args) -> gocad_qc::Result<KeywordConfig> {
    let config = match &args.keywords {
        Some(path) => KeywordConfig::from_json_path(path)?,
        None => KeywordConfig::default(),
    };
    let checks = config.check_special_values || args.check_special_values;
    let config = config.with_special_value_checks(checks);
    config.validate()?;
    Ok(config)
}

fn print_report(batch: &BatchReport, json: bool) -> gocad_qc::Result<()> {
    if json {
        println!("{}", batch.to_json()?);
        return Ok(());
    }

    println!("{}", batch.summary_table());
    let identifiers = batch.identifier_summary();
    if !identifiers.is_empty() {
        for line in identifiers {
            println!("{}", line);
        }
        println!();
    }
    print!("{}", batch.detail_report());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (config, specs) = match load_config(&args).and_then(|c| Ok((c, build_specs(&args)?))) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("gocad-qc: {}", e);
            return ExitCode::from(2);
        }
    };
    debug!("Checking {} file(s)", specs.len());

    let batch = analyze_batch(&specs, &config);
    if let Err(e) = print_report(&batch, args.json) {
        eprintln!("gocad-qc: {}", e);
        return ExitCode::from(2);
    }

    if batch.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
