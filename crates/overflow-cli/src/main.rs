mod config;

use overflow_board::{StdTerminal, TracingSink, run_session};
use overflow_db::Store;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DEFAULT_LOG_FILTER};

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_tracing(&config)?;

    // Fresh board every run
    let store = Store::open_in_memory()?;

    let mut terminal = StdTerminal::stdio(config.clear_screen);
    run_session(&store, &TracingSink, &mut terminal)?;

    info!("Session ended");
    Ok(())
}

/// Logs go to stderr so they never interleave with the menus on stdout.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = match &config.log_filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
