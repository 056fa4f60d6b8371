use std::{sync::Arc, time::Duration};

use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::{
    config::ServiceConfig,
    enrichment::EnrichmentPipeline,
    http_api::{router, start_http_server},
    stats::StatsManager,
    upstream::{Fetch, HttpFetcher},
    ServiceError,
};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WhereIpService {
    config: ServiceConfig,
    shutdown: watch::Sender<bool>,
}

impl WhereIpService {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        // Validate the config first
        config.validate()?;

        let (shutdown, _) = watch::channel(false);

        Ok(Self { config, shutdown })
    }

    /// Serve until [`shutdown`](Self::shutdown) is called, using real upstream services
    pub async fn run(&self) -> Result<(), ServiceError> {
        let fetcher = HttpFetcher::new(&self.config.upstream)?;
        self.run_with(Arc::new(fetcher)).await
    }

    pub async fn run_with<F: Fetch>(&self, fetcher: Arc<F>) -> Result<(), ServiceError> {
        let (mut manager, stats) = StatsManager::new(&self.config.stats);
        // Stats outlive the server so in-flight requests can still record
        let (stats_shutdown, stats_shutdown_rx) = watch::channel(false);
        let stats_task = tokio::spawn(async move {
            manager.run(stats_shutdown_rx).await;
        });
        debug!("Spawned stats task: {:?}", stats_task.id());

        let pipeline = Arc::new(EnrichmentPipeline::new(&self.config, fetcher, stats)?);
        let result = start_http_server(
            self.config.http.socket_addr(),
            router(pipeline),
            self.shutdown.subscribe(),
        )
        .await;

        // Stop the stats manager even when the server failed
        stats_shutdown.send_replace(true);

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, stats_task).await {
            Ok(Ok(())) => info!("All tasks completed"),
            Ok(Err(e)) => error!("Stats task failed during shutdown: {}", e),
            Err(_) => error!("Timeout waiting for stats task to complete"),
        }

        result
    }

    /// Graceful shutdown
    pub fn shutdown(&self) {
        info!("Initiating graceful shutdown");
        self.shutdown.send_replace(true);
    }
}
