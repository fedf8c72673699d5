//! Entry point for the `sast` binary.

use clap::Parser;
use sast_cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = sast_cli::run(cli).await {
        tracing::error!(error = %e, "analysis failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
