//! SARadio - Playlists de radio façon San Andreas
//!
//! # Commandes
//!
//! - `saradio stations` - Liste les stations du catalogue
//! - `saradio generate <station>` - Génère une playlist et l'exporte en M3U
//!   (ou en JSON, ou en URLs live)
//! - `saradio queue <station>` - Ouvre une session et parcourt la file de
//!   lecture
//!
//! La configuration est lue dans `~/.saradio/config.yaml` (ou dans le
//! répertoire désigné par `SARADIO_CONFIG`).

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sarconfig::get_config;
use tracing_subscriber::EnvFilter;

/// SARadio - Radio playlist generator
#[derive(Parser)]
#[command(name = "saradio")]
#[command(about = "Generate San Andreas style radio playlists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stations of the catalog
    Stations,

    /// Generate one playlist pass for a station
    Generate(commands::GenerateArgs),

    /// Open a listening session and walk its queue
    Queue(commands::QueueArgs),
}

/// Initialise le logging : `RUST_LOG` prime sur `host.logger.min_level`
fn init_logging(min_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(min_level.to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = get_config();
    init_logging(&config.get_log_min_level()?);

    match cli.command {
        Commands::Stations => commands::stations(&config),
        Commands::Generate(args) => commands::generate(&config, args),
        Commands::Queue(args) => commands::queue(&config, args),
    }
}
