//! Cinder CLI - Command-line interface for Cinder particle scripts

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, format, list, simulate};

#[derive(Parser)]
#[command(name = "cinder")]
#[command(about = "Load, check and rewrite legacy particle scripts", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script file and report its systems and warnings
    Check {
        /// Path to script file
        file: String,
    },

    /// Rewrite a script file in canonical form
    Format {
        /// Path to script file
        file: String,

        /// Output path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List particle systems with their emitters and affectors
    List {
        /// Path to script file
        file: String,
    },

    /// Run the reference emission loop for one particle system
    Simulate {
        /// Path to script file
        file: String,

        /// Particle system name
        #[arg(long)]
        system: String,

        /// Simulated seconds
        #[arg(long, default_value = "5")]
        seconds: f32,

        /// Step size in seconds
        #[arg(long, default_value = "0.05")]
        step: f32,

        /// Random seed
        #[arg(long, default_value = "1")]
        seed: u32,

        /// Activation config file (TOML)
        #[arg(long)]
        config: Option<String>,
    },
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.verbose)),
    )
    .init();

    match cli.command {
        Commands::Check { file } => check::run(&file),
        Commands::Format { file, output } => format::run(&file, output.as_deref()),
        Commands::List { file } => list::run(&file),
        Commands::Simulate {
            file,
            system,
            seconds,
            step,
            seed,
            config,
        } => simulate::run(simulate::SimulateArgs {
            file,
            system,
            seconds,
            step,
            seed,
            config,
        }),
    }
}
