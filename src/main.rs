mod cli;
mod config;
mod market_data;
mod metrics;
mod poller;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::Config;
use crate::market_data::adapters::magiceden::MagicEdenClient;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    if config.metrics_enabled {
        metrics::init_metrics_server();
    }

    info!(
        collections = ?cli.collections,
        interval_secs = config.poll_interval.as_secs(),
        "floorwatch starting"
    );

    let client = MagicEdenClient::new(&config.base_url, config.http_timeout)?;

    let poller_handle = tokio::spawn(poller::run_poller(
        client,
        cli.collections,
        config.top_limit,
        config.poll_interval,
    ));

    tokio::select! {
        res = poller_handle => {
            match res {
                Ok(Ok(())) => warn!("poller exited"),
                Ok(Err(err)) => warn!(error = %err, "poller returned error"),
                Err(err) => warn!(error = %err, "poller task panicked"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("received Ctrl-C, shutting down");
        }
    }

    Ok(())
}
