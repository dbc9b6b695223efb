//! mork-abook CLI binary.

use anyhow::Result;
use mork_abook::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the mork-abook CLI.
///
/// A current_thread runtime is enough: the only I/O is reading one file.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=mork=trace,mork_abook=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mork_abook=info,mork=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting mork-abook");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("mork-abook completed successfully");
    Ok(())
}
