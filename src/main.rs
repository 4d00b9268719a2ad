//! uma-planner command-line entry point.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{resolve_config, run, Cli};

/// Install the stderr subscriber. `RUST_LOG` wins over the configured filter.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging(&config.log_filter);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &config, &mut out).await
}
