use anyhow::{Context, Result};
use clap::Parser;
use modgen::config::loader;
use modgen::log_collector::{level_for_verbosity, LogCollector};
use modgen::{ConsistencyMode, GeneratorSettings, GraphMode};
use std::path::PathBuf;

/// Generate source code for fake kernel modules.
///
/// Dependencies between the modules are defined by the functions each one
/// exports and calls. Writes one `<prefix>-<name>.c` per module and a
/// recipe file with one `obj-m += <prefix>-<name>.o` line per module.
///
/// Examples:
///
///   modgen
/// generates the default SCSI/NVMe/dm module set in the current directory
///
///   modgen other
/// same, but qla2xxx exports qlt_stop_phase2 as a void(int) function
#[derive(Parser, Debug)]
#[clap(author, version, about, verbatim_doc_comment)]
struct Args {
    /// Generation mode; "other" selects the alternate qla2xxx pair
    #[clap(index = 1)]
    mode: Option<String>,

    /// Directory to write the generated files to
    #[clap(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML settings file (prefix, recipe file, custom module graph)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Warn about calls without a provider before generating
    #[clap(long)]
    check: bool,

    /// Like --check, but fail without writing anything on findings
    #[clap(long)]
    strict: bool,

    /// Print the generated file list as JSON
    #[clap(long)]
    json: bool,

    /// Enable verbose output (repeat for more)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = LogCollector::new(level_for_verbosity(args.verbose)).install() {
        eprintln!("Failed to set up logging: {}", e);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => loader::load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GeneratorSettings::default(),
    };
    if let Some(dir) = args.output_dir {
        settings.output_dir = dir;
    }

    let mode = GraphMode::from_arg(args.mode.as_deref());
    let consistency = if args.strict {
        ConsistencyMode::Strict
    } else if args.check {
        ConsistencyMode::Warn
    } else {
        ConsistencyMode::Skip
    };

    let report = modgen::orchestrator::run(&settings, mode, consistency)
        .context("generating module sources")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
