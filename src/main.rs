use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wardwatch::application::config::AppConfig;
use wardwatch::application::services::Session;
use wardwatch::domain::ports::Clock;
use wardwatch::infrastructure::ai::create_agent_transport;
use wardwatch::infrastructure::clock::{FixedClock, SystemClock};
use wardwatch::presentation::cli::app::{Cli, Commands};
use wardwatch::presentation::cli::commands::classify::run_classify;
use wardwatch::presentation::cli::commands::session::run_session;

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = if let Some(ref path) = cli.config {
        AppConfig::load_or_create(path)?
    } else {
        AppConfig::load()?
    };

    // Manual DI: main.rs is the only place that knows concrete types
    let transport = create_agent_transport(&config.agent);
    let clock: Arc<dyn Clock> = match config.general.reference_time {
        Some(instant) => {
            tracing::info!(%instant, "clock pinned to reference time");
            Arc::new(FixedClock(instant))
        }
        None => Arc::new(SystemClock),
    };
    let session =
        Session::from_config(&config, transport, clock).context("Failed to start session")?;

    match cli.command {
        Some(Commands::Classify { event, json }) => run_classify(&session, event, json).await?,
        Some(Commands::Session) | None => run_session(&session).await?,
    }

    Ok(())
}
