mod commands;
mod summary;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maskclean", version, about = "Remove small bright regions from mask images")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a single mask image (PNG/TIFF)
    Clean(commands::clean::CleanArgs),
    /// Clean every frame of an 8-bit mono SER clip
    Clip(commands::clip::ClipArgs),
    /// Show SER clip metadata
    Info(commands::info::InfoArgs),
    /// Print or save the default cleaner config as TOML
    Config(commands::config::ConfigArgs),
}

impl Commands {
    fn run(&self) -> Result<()> {
        match self {
            Self::Clean(args) => commands::clean::run(args),
            Self::Clip(args) => commands::clip::run(args),
            Self::Info(args) => commands::info::run(args),
            Self::Config(args) => commands::config::run(args),
        }
    }
}

fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .init();
    cli.command.run()
}
