use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use client_core::{DiscoveryController, GeminiContentService};
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod session;
mod view;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use session::Session;

/// Discover a lesser-known mathematician.
#[derive(Parser, Debug)]
struct Args {
    /// Optional TOML file with api_key, api_base_url, text_model, image_model.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    api_base_url: Option<String>,
    /// Generate a single mathematician and exit.
    #[arg(long)]
    once: bool,
    /// Write inline AI tributes into this directory.
    #[arg(long)]
    save_renditions: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(api_base_url) = args.api_base_url {
        settings.api_base_url = api_base_url;
    }

    let controller = DiscoveryController::new(GeminiContentService::new(settings.gemini_config()));
    let mut session = Session::new(controller, args.save_renditions);

    if args.once {
        session.run_once().await
    } else {
        session.run_interactive().await
    }
}
