use serde::Deserialize;

/// Stats payload for one collection, as returned by
/// `GET /v2/collections/{collection}/stats`.
///
/// The endpoint returns more fields (listed count, volumes, ...) but the
/// floor price is the only one consumed; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    /// Lowest current listing price. The API reports `null` (and sometimes
    /// omits the field entirely) for collections with no active listings;
    /// both map to `None`.
    #[serde(default)]
    pub floor_price: Option<f64>,
}

/// One row of the top-traded leaderboard from `GET /v2/collections/top`.
/// Rows keep the API's ordering, assumed descending by volume.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTradedEntry {
    pub symbol: String,
    pub volume_all_time: f64,
}
