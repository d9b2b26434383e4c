//! `ruido` — command-line host for the effects engine.
//!
//! The binary owns everything the DSP core refuses to: argument parsing,
//! file formats, the per-block host loop, and the control channel. The
//! engine itself only ever sees one normalized sample at a time.

mod commands;
mod control;
mod preset;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ruido")]
#[command(author, version, about = "Single-sample-latency audio effects engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available effects
    Effects(commands::effects::EffectsArgs),

    /// Show the parameters an effect derives from given pot values
    Describe(commands::describe::DescribeArgs),

    /// Process an audio file through one effect
    Process(commands::process::ProcessArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Effects(args) => commands::effects::run(&args),
        Commands::Describe(args) => commands::describe::run(&args),
        Commands::Process(args) => commands::process::run(args),
    }
}
