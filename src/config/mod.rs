use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_BASE_URL: &str = "https://api-mainnet.magiceden.dev";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;
const DEFAULT_TOP_LIMIT: usize = 10;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, loaded once at startup. Collections to watch
/// come from the CLI; everything here comes from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Idle time between polling cycles.
    pub poll_interval: Duration,
    /// Marketplace API root, without trailing slash.
    pub base_url: String,
    /// Leaderboard rows requested per cycle.
    pub top_limit: usize,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// When set, the Prometheus exporter is installed on :9000.
    pub metrics_enabled: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // dotenvy loads .env, but doesn't override already-set env vars
        dotenvy::dotenv().ok();

        let poll_interval = Duration::from_secs(env_parse(
            "FLOORWATCH_POLL_INTERVAL_SECS",
            DEFAULT_POLL_INTERVAL_SECS,
        )?);
        let base_url = std::env::var("FLOORWATCH_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let top_limit = env_parse("FLOORWATCH_TOP_LIMIT", DEFAULT_TOP_LIMIT)?;
        let http_timeout = Duration::from_secs(env_parse(
            "FLOORWATCH_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);
        let metrics_enabled = matches!(
            std::env::var("FLOORWATCH_METRICS").as_deref(),
            Ok("1") | Ok("true") | Ok("on")
        );

        Ok(Self {
            poll_interval,
            base_url,
            top_limit,
            http_timeout,
            metrics_enabled,
        })
    }
}

/// Parse an env var, falling back to `default` when unset. A set-but-
/// malformed value is a startup error, not a silent fallback.
fn env_parse<T: FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
