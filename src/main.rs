//! Repository word statistics
//!
//! Reads `./config.json`, analyzes every repository it lists and writes the
//! ranked report to `./results.json`.

use tracing_subscriber::EnvFilter;

use grepstats::config::Settings;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    grepstats::analysis::run(&settings).await?;
    Ok(())
}
