use anyhow::Result;
use clap::Parser;
use job_assistant::{start_web_server, AppConfig};
use std::path::PathBuf;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "hiresignal", about = "Job application assistant API server")]
struct Cli {
    /// Port the API listens on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Base directory for the store, fetched pages, and templates.
    /// Defaults to the current directory (or /app in production).
    #[arg(long)]
    base_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(
            "job_assistant=info,hiresignal=info,rocket::server=off",
        )))
        .init();

    let cli = Cli::parse();

    let base_dir = AppConfig::resolve_base_dir(cli.base_dir)?;
    let config = AppConfig::load(base_dir)?;

    info!("Starting HireSignal job application assistant");
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Base directory: {}", config.base_dir.display());
    info!("Server: http://0.0.0.0:{}", cli.port);

    start_web_server(config, cli.port).await
}
