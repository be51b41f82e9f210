//! VNL - headless playlist player
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vnl_cli::{config::AppConfig, LoggingSettings, PlayArgs};

#[derive(Parser)]
#[command(name = "vnl")]
#[command(about = "Headless shuffle player for playlists", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VNL_CONFIG_FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shuffle-play tracks; commands are read from stdin, events printed to stdout
    Play(PlayArgs),
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    init_tracing(&config.logging);

    match cli.command {
        Commands::Play(args) => {
            vnl_cli::run_play(config, args).await?;
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingSettings) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(logging.ansi),
        )
        .init();
}
