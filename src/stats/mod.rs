//! Per-country query statistics.

mod events;
mod manager;
mod store;
mod types;

pub use events::StatEvent;
pub use manager::{StatsHandle, StatsManager};
pub use store::CountryStats;
pub use types::{CountryDelta, CountryStat, StatsSummary};
