//! BootstrapSweeper - periodic expiry of provisional tours
//!
//! A single fixed-interval sweep is the sole expiry mechanism, so actual
//! expiry lags the TTL by at most one poll interval. Each pass reads a
//! snapshot of expired rows and handles every row in isolation; one bad
//! record never blocks the rest of the pass.

use chrono::{Duration as ChronoDuration, Utc};
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::bootstrap::BootstrapService;
use crate::core::EngineState;
use crate::store::BootstrapStore;

pub struct BootstrapSweeper {
    state: EngineState,
    shutdown: CancellationToken,
}

impl BootstrapSweeper {
    pub fn new(state: EngineState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    /// Run until shutdown, sweeping once per configured interval.
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.state.config.sweep_interval_secs,
            "BootstrapSweeper started"
        );

        let mut interval =
            tokio::time::interval(Duration::from_secs(self.state.config.sweep_interval_secs));
        interval.tick().await; // skip immediate tick

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("BootstrapSweeper shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.sweep_once().await;
                }
            }
        }

        tracing::info!("BootstrapSweeper stopped");
    }

    /// One sweep pass over all accounts.
    pub async fn sweep_once(&self) {
        let ttl = ChronoDuration::seconds(self.state.config.bootstrap_ttl_secs as i64);
        let cutoff = Utc::now() - ttl;

        let expired = match self.state.bootstraps.list_expired(cutoff).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Expiry scan failed");
                return;
            }
        };
        if expired.is_empty() {
            return;
        }

        tracing::info!(count = expired.len(), "Expiring provisional tours");
        let service = BootstrapService::new(self.state.clone());
        for zone in expired {
            if let Err(e) = service.expire(&zone).await {
                tracing::error!(owner = %zone.owner_id, error = %e, "Failed to expire provisional zone");
            }
        }
    }
}
