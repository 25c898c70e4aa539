mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use args::{InitArgs, LineageArgs, RunArgs};
use commands::{init, lineage, regions, run};

/// Sickle: a sickle-cell allele population simulator
///
/// This tool follows how the sickle hemoglobin allele spreads or fades in a
/// population through mutation, reproduction, mortality and drift.
#[derive(Parser, Debug)]
#[command(name = "sickle")]
#[command(author, version, about = "Simulates the sickle-cell allele in a population over time", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a simulation configuration file.
    ///
    /// Sets up the parameters for a run (population size, rates, region)
    /// but does not run it yet.
    Init(Box<InitArgs>),

    /// Run a simulation.
    ///
    /// Ticks are paced on the configured clock unless --fast is given.
    Run(Box<RunArgs>),

    /// Run a simulation, then print the family tree of a root ancestor.
    Lineage(Box<LineageArgs>),

    /// List the region presets.
    Regions,
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init(args) => init::init_simulation(&args)?,
        Commands::Run(args) => run::run_simulation(&args)?,
        Commands::Lineage(args) => lineage::show_lineage(&args)?,
        Commands::Regions => regions::list_regions()?,
    }

    Ok(())
}
