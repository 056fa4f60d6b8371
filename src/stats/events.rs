use tokio::sync::oneshot;

use super::{CountryDelta, CountryStat, StatsSummary};

#[derive(Debug)]
pub enum StatEvent {
    /// Count an enrichment against its country
    Record(CountryDelta),
    /// Closest/furthest/average distance
    QuerySummary {
        response_tx: oneshot::Sender<Option<StatsSummary>>,
    },
    /// Every per-country entry
    QueryAll {
        response_tx: oneshot::Sender<Option<Vec<CountryStat>>>,
    },
    /// Number of distinct countries recorded
    QueryCountries { response_tx: oneshot::Sender<usize> },
    /// Drop all entries
    Clear { response_tx: oneshot::Sender<()> },
}
