use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::market_data::adapters::magiceden::MagicEdenClient;
use crate::market_data::types::TopTradedEntry;
use crate::metrics::prometheus::record_cycle;

/// Everything gathered in one polling cycle. Nothing here outlives the
/// cycle that produced it.
#[derive(Debug)]
pub struct CycleReport {
    /// One entry per watched collection, in input order. `None` covers
    /// fetch failure as well as a collection with no floor.
    pub floors: Vec<(String, Option<f64>)>,
    /// Leaderboard rows in API order; empty when the fetch failed.
    pub top_traded: Vec<TopTradedEntry>,
}

/// Run the two fetch stages of one cycle.
///
/// All floor-price requests are issued concurrently and joined: every
/// one completes or fails before the leaderboard fetch starts, and the
/// results come back in input order. Fetch errors are logged and
/// degraded to absent/empty here; they never escape the cycle.
pub async fn poll_once(
    client: &MagicEdenClient,
    collections: &[String],
    top_limit: usize,
) -> CycleReport {
    let fetches = collections.iter().map(|name| async move {
        match client.floor_price(name).await {
            Ok(price) => (name.clone(), price),
            Err(err) => {
                warn!(collection = %name, error = %err, "floor price fetch failed");
                (name.clone(), None)
            }
        }
    });
    let floors = join_all(fetches).await;

    let top_traded = match client.top_traded(top_limit).await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "top traded fetch failed");
            Vec::new()
        }
    };

    CycleReport { floors, top_traded }
}

/// Render one floor-price result the way it is printed each cycle.
pub fn floor_line(name: &str, price: Option<f64>) -> String {
    match price {
        Some(price) => format!("Current floor price for {name}: {price}"),
        None => format!("Failed to fetch data for {name}"),
    }
}

/// Render the leaderboard block: a heading plus one ranked line per
/// entry, or a single failure notice when there is nothing to show.
pub fn render_leaderboard(limit: usize, entries: &[TopTradedEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["Failed to fetch top traded collections".to_string()];
    }

    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(String::new());
    lines.push(format!("Top {limit} Traded Collections on Solana:"));
    lines.extend(
        entries
            .iter()
            .map(|entry| format!("{}: {}", entry.symbol, entry.volume_all_time)),
    );
    lines
}

fn print_report(report: &CycleReport, top_limit: usize) {
    for (name, price) in &report.floors {
        println!("{}", floor_line(name, *price));
    }
    for line in render_leaderboard(top_limit, &report.top_traded) {
        println!("{line}");
    }
}

/// Poll, print, sleep, forever. The loop has no terminal state; it runs
/// until the process is told to stop.
pub async fn run_poller(
    client: MagicEdenClient,
    collections: Vec<String>,
    top_limit: usize,
    poll_interval: Duration,
) -> anyhow::Result<()> {
    info!(
        collections = collections.len(),
        interval_secs = poll_interval.as_secs(),
        "poller started"
    );

    loop {
        println!("\nFetching latest data...");

        let report = poll_once(&client, &collections, top_limit).await;
        print_report(&report, top_limit);
        record_cycle();

        debug!("cycle complete, sleeping");
        sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> MagicEdenClient {
        MagicEdenClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn one_floor_entry_per_collection_in_input_order() {
        let server = MockServer::start().await;
        for (name, price) in [("alpha", 1), ("beta", 2), ("gamma", 3)] {
            Mock::given(method("GET"))
                .and(path(format!("/v2/collections/{name}/stats")))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({ "floorPrice": price })),
                )
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/v2/collections/top"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let report = poll_once(&client, &names(&["alpha", "beta", "gamma"]), 10).await;

        assert_eq!(
            report.floors,
            vec![
                ("alpha".to_string(), Some(1.0)),
                ("beta".to_string(), Some(2.0)),
                ("gamma".to_string(), Some(3.0)),
            ]
        );
    }

    #[tokio::test]
    async fn failed_fetch_degrades_without_disturbing_the_others() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/collections/degods/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "floorPrice": 42 })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/collections/y00ts/stats"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/collections/top"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let report = poll_once(&client, &names(&["degods", "y00ts"]), 10).await;

        let lines: Vec<String> = report
            .floors
            .iter()
            .map(|(name, price)| floor_line(name, *price))
            .collect();
        assert_eq!(lines[0], "Current floor price for degods: 42");
        assert_eq!(lines[1], "Failed to fetch data for y00ts");
    }

    #[tokio::test]
    async fn leaderboard_failure_yields_empty_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/collections/nobody/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "floorPrice": 7 })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/collections/top"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let report = poll_once(&client, &names(&["nobody"]), 10).await;

        assert!(report.top_traded.is_empty());
        assert_eq!(
            render_leaderboard(10, &report.top_traded),
            vec!["Failed to fetch top traded collections".to_string()]
        );
    }

    #[test]
    fn floor_line_formats_whole_numbers_like_the_api_sends_them() {
        assert_eq!(
            floor_line("degods", Some(42.0)),
            "Current floor price for degods: 42"
        );
        assert_eq!(
            floor_line("degods", Some(42.5)),
            "Current floor price for degods: 42.5"
        );
        assert_eq!(floor_line("y00ts", None), "Failed to fetch data for y00ts");
    }

    #[test]
    fn leaderboard_renders_one_line_per_entry() {
        let entries = vec![TopTradedEntry {
            symbol: "SOL1".to_string(),
            volume_all_time: 1000.0,
        }];

        let lines = render_leaderboard(10, &entries);
        assert_eq!(lines[1], "Top 10 Traded Collections on Solana:");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "SOL1: 1000");
    }

    #[test]
    fn leaderboard_renders_n_entries_when_fewer_than_limit() {
        let entries: Vec<TopTradedEntry> = (1..=3)
            .map(|rank| TopTradedEntry {
                symbol: format!("SOL{rank}"),
                volume_all_time: (1000 * rank) as f64,
            })
            .collect();

        let lines = render_leaderboard(10, &entries);
        // heading block plus exactly one ranked line per entry
        assert_eq!(lines.len(), 2 + entries.len());
        assert_eq!(lines[2], "SOL1: 1000");
        assert_eq!(lines[4], "SOL3: 3000");
    }
}
