use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::market_data::types::{CollectionStats, TopTradedEntry};
use crate::metrics::prometheus::{record_fetch, record_fetch_latency};

/// Magic Eden v2 REST adapter.
///
/// Holds one shared `reqwest::Client`; its connection pool is reused by
/// every concurrent request issued within a polling cycle.
#[derive(Debug, Clone)]
pub struct MagicEdenClient {
    http: Client,
    base_url: String,
}

impl MagicEdenClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Floor price for one collection. `Ok(None)` means the marketplace
    /// reports no floor (null or absent field). Transport errors, HTTP
    /// error statuses and bodies that fail to deserialize are all `Err`;
    /// the poller treats those as soft failures.
    pub async fn floor_price(&self, collection: &str) -> anyhow::Result<Option<f64>> {
        let url = format!("{}/v2/collections/{}/stats", self.base_url, collection);
        let stats: CollectionStats = self
            .get_json("floor_price", &url)
            .await
            .with_context(|| format!("fetching stats for {collection}"))?;

        Ok(stats.floor_price)
    }

    /// Top-traded leaderboard, at most `limit` rows, in API order.
    pub async fn top_traded(&self, limit: usize) -> anyhow::Result<Vec<TopTradedEntry>> {
        let url = format!("{}/v2/collections/top?limit={limit}", self.base_url);
        self.get_json("top_traded", &url)
            .await
            .context("fetching top traded collections")
    }

    /// GET + status check + JSON decode, with fetch metrics per endpoint.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> anyhow::Result<T> {
        let started = Instant::now();

        let result = async {
            let response = self.http.get(url).send().await?.error_for_status()?;
            let body = response.json::<T>().await?;
            anyhow::Ok(body)
        }
        .await;

        record_fetch(endpoint, result.is_ok());
        record_fetch_latency(endpoint, started.elapsed().as_secs_f64() * 1000.0);

        result.with_context(|| format!("GET {url}"))
    }
}
