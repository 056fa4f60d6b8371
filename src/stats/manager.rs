use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use super::{CountryDelta, CountryStat, CountryStats, StatEvent, StatsSummary};
use crate::{config::StatsConfig, StatsError};

/// Single owner of the per-country aggregate.
///
/// Events are applied one at a time, so every operation observes the
/// effects of all operations sent before it.
pub struct StatsManager {
    stats: CountryStats,
    event_rx: mpsc::Receiver<StatEvent>,
}

impl StatsManager {
    pub fn new(config: &StatsConfig) -> (Self, StatsHandle) {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));

        let manager = Self {
            stats: CountryStats::new(),
            event_rx: rx,
        };

        (manager, StatsHandle { tx })
    }

    pub async fn run(&mut self, mut shutdown_rx: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                shutdown = shutdown_rx.changed() => {
                    match shutdown {
                        Ok(_) => {
                            info!("Stats manager shutting down");
                            // Ensure all events are processed before shutting down
                            while let Ok(event) = self.event_rx.try_recv() {
                                self.handle_event(event);
                            }
                            break;
                        }
                        Err(e) => {
                            warn!("Shutdown channel closed: {}", e);
                            break;
                        }
                    }
                }

                event = self.event_rx.recv() => {
                    match event {
                        Some(event) => self.handle_event(event),
                        None => {
                            debug!("All stats handles dropped");
                            break;
                        }
                    }
                }
            }
        }

        info!(
            "Stats manager shutdown complete: {} countries, {} queries",
            self.stats.len(),
            self.stats.total_queries()
        );
    }

    fn handle_event(&mut self, event: StatEvent) {
        match event {
            StatEvent::Record(delta) => {
                debug!(
                    "Recording {} query(ies) from {} at {} km",
                    delta.count, delta.country_code, delta.distance
                );
                self.stats.record(delta);
            }

            StatEvent::QuerySummary { response_tx } => {
                if response_tx.send(self.stats.summarize()).is_err() {
                    warn!("Failed to send stats summary");
                }
            }

            StatEvent::QueryAll { response_tx } => {
                if response_tx.send(self.stats.list_all()).is_err() {
                    warn!("Failed to send full stats");
                }
            }

            StatEvent::QueryCountries { response_tx } => {
                if response_tx.send(self.stats.len()).is_err() {
                    warn!("Failed to send country count");
                }
            }

            StatEvent::Clear { response_tx } => {
                info!("Clearing stats for {} countries", self.stats.len());
                self.stats.clear();
                if response_tx.send(()).is_err() {
                    warn!("Failed to acknowledge stats clear");
                }
            }
        }
    }
}

/// Cloneable access to a running [`StatsManager`]
#[derive(Debug, Clone)]
pub struct StatsHandle {
    tx: mpsc::Sender<StatEvent>,
}

impl StatsHandle {
    pub async fn record(&self, delta: CountryDelta) -> Result<(), StatsError> {
        self.tx
            .send(StatEvent::Record(delta))
            .await
            .map_err(|_| StatsError::ChannelClosed)
    }

    pub async fn summary(&self) -> Result<Option<StatsSummary>, StatsError> {
        self.query("summary", |response_tx| StatEvent::QuerySummary { response_tx })
            .await
    }

    pub async fn list_all(&self) -> Result<Option<Vec<CountryStat>>, StatsError> {
        self.query("full stats", |response_tx| StatEvent::QueryAll { response_tx })
            .await
    }

    pub async fn country_count(&self) -> Result<usize, StatsError> {
        self.query("country count", |response_tx| StatEvent::QueryCountries {
            response_tx,
        })
        .await
    }

    pub async fn clear(&self) -> Result<(), StatsError> {
        self.query("clear", |response_tx| StatEvent::Clear { response_tx })
            .await
    }

    async fn query<T>(
        &self,
        what: &'static str,
        event: impl FnOnce(oneshot::Sender<T>) -> StatEvent,
    ) -> Result<T, StatsError> {
        let (response_tx, response_rx) = oneshot::channel();
        self.tx
            .send(event(response_tx))
            .await
            .map_err(|_| StatsError::ChannelClosed)?;
        response_rx.await.map_err(|_| StatsError::NoReply(what))
    }
}
