#![warn(missing_docs)]
//! Perflab CLI Library
//!
//! The command-line front end for the experiment suites. Call
//! [`run`] from a binary that links the suites; the registered experiments
//! are discovered automatically.
//!
//! # Example
//!
//! ```ignore
//! fn main() {
//!     if let Err(e) = perflab_cli::run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

mod config;
mod executor;
mod planner;

pub use config::{OutputConfig, PerflabConfig};
pub use executor::{build_report_meta, run_plan};
pub use planner::{build_plan, ExecutionPlan};

use anyhow::Context;
use clap::{Parser, Subcommand};
use perflab_core::{pin_to_cpu, registered_experiments, Sink, Suite};
use perflab_report::{format_human_output, generate_json_report, OutputFormat};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;

/// Perflab CLI arguments
#[derive(Parser, Debug)]
#[command(name = "perflab")]
#[command(author, version, about = "Perflab - thread lifecycle and cache behavior experiments")]
pub struct Cli {
    /// Suite to run, or `list` to print the plan
    #[command(subcommand)]
    pub command: Commands,

    /// Filter experiments by regex pattern on their id
    #[arg(long, default_value = ".*")]
    pub filter: String,

    /// Output format: human, json (defaults to perflab.toml, then human)
    #[arg(long)]
    pub format: Option<String>,

    /// Report file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pin the main thread to this CPU before running
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the thread lifecycle suite (creation, sleep, interrupt, join)
    Threads,
    /// Run the cache behavior suite (repeated access, false sharing, locality)
    Memory,
    /// List registered experiments
    List,
}

/// Run the Perflab CLI. This is the main entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Perflab CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("perflab=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("perflab=info")
            .init();
    }

    // Discover perflab.toml configuration (CLI flags override)
    let config = PerflabConfig::discover().unwrap_or_default();

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .unwrap_or(OutputFormat::Human);

    let filter = Regex::new(&cli.filter)
        .with_context(|| format!("invalid filter pattern: {}", cli.filter))?;

    match cli.command {
        Commands::List => list_experiments(&filter),
        Commands::Threads => run_suite(Suite::Threads, &cli, &config, format, &filter),
        Commands::Memory => run_suite(Suite::Memory, &cli, &config, format, &filter),
    }
}

fn list_experiments(filter: &Regex) -> anyhow::Result<()> {
    println!("Perflab Plan:");

    let plan = build_plan(registered_experiments(), None, Some(filter));

    let mut suites: std::collections::BTreeMap<&str, Vec<&perflab_core::ExperimentDef>> =
        std::collections::BTreeMap::new();
    for def in &plan.experiments {
        suites.entry(def.suite.as_str()).or_default().push(*def);
    }

    let mut total = 0;
    for (suite, defs) in &suites {
        println!("├── suite: {}", suite);
        for def in defs {
            println!("│   ├── {} ({})", def.id, def.summary);
            total += 1;
        }
    }

    println!("{} experiments found.", total);
    Ok(())
}

fn run_suite(
    suite: Suite,
    cli: &Cli,
    config: &PerflabConfig,
    format: OutputFormat,
    filter: &Regex,
) -> anyhow::Result<()> {
    if let Some(cpu) = cli.pin_cpu {
        if let Err(err) = pin_to_cpu(cpu) {
            tracing::warn!(%err, cpu, "failed to pin main thread");
        }
    }

    let plan = build_plan(registered_experiments(), Some(suite), Some(filter));
    if plan.experiments.is_empty() {
        println!("No experiments found.");
        return Ok(());
    }

    println!(
        "Running {} {} experiments...\n",
        plan.experiments.len(),
        suite
    );

    let report = run_plan(&plan, &Sink::stdout(), &config.experiments);

    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Human => format_human_output(&report),
    };

    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("cannot create report file {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}
