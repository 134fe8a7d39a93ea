//! Phaser CLI - process files, run live, and manage presets.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phaser")]
#[command(author, version, about = "All-pass cascade phaser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the phaser
    Process(commands::process::ProcessArgs),

    /// Run the phaser on live audio
    Realtime(commands::realtime::RealtimeArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),

    /// List the phaser's parameters and their ranges
    Params(commands::params::ParamsArgs),

    /// List, show, and save presets
    Presets(commands::presets::PresetsArgs),

    /// List audio devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Realtime(args) => commands::realtime::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Params(args) => commands::params::run(&args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
