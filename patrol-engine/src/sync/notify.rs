//! Best-effort reload fan-out to dependent services
//!
//! After a successful area create or delete, the scanner backend, the alerts
//! backend, and the map frontend each get a no-body GET so they pick up the
//! new configuration. Each call runs as its own task under a short deadline;
//! failures are logged and never fail the reconciliation, since dependents
//! tolerate stale config until the next reload.

use reqwest::Client;
use std::time::Duration;

use crate::core::Config;
use crate::utils::{AppError, AppResult};

/// Header carrying the shared secret on reload calls.
const RELOAD_SECRET_HEADER: &str = "X-Reload-Secret";

struct ReloadTarget {
    service: &'static str,
    url: String,
}

/// Fire-and-forget reload broadcaster
pub struct ReloadNotifier {
    client: Client,
    targets: Vec<ReloadTarget>,
    secret: String,
    deadline: Duration,
}

impl ReloadNotifier {
    /// Build the notifier from configuration. Empty URLs disable a target.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.notify_timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        let mut targets = Vec::new();
        for (service, url) in [
            ("scanner", &config.scanner_reload_url),
            ("alerts", &config.alerts_reload_url),
            ("map", &config.map_reload_url),
        ] {
            if !url.is_empty() {
                targets.push(ReloadTarget {
                    service,
                    url: url.clone(),
                });
            }
        }

        Ok(Self {
            client,
            targets,
            secret: config.reload_secret.clone(),
            deadline: Duration::from_millis(config.notify_timeout_ms),
        })
    }

    /// Notify every configured target, waiting at most one deadline overall.
    ///
    /// Returns once every attempt has settled; outcomes are only logged.
    pub async fn broadcast(&self) {
        let mut handles = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            let client = self.client.clone();
            let url = target.url.clone();
            let service = target.service;
            let secret = self.secret.clone();
            let deadline = self.deadline;

            handles.push(tokio::spawn(async move {
                let request = client.get(&url).header(RELOAD_SECRET_HEADER, secret).send();
                match tokio::time::timeout(deadline, request).await {
                    Ok(Ok(response)) if response.status().is_success() => {
                        tracing::debug!(service, "Reload notification delivered");
                    }
                    Ok(Ok(response)) => {
                        tracing::warn!(service, status = %response.status(), "Reload notification rejected");
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(service, error = %e, "Reload notification failed");
                    }
                    Err(_) => {
                        tracing::warn!(service, "Reload notification timed out");
                    }
                }
            }));
        }

        for handle in handles {
            let _ = handle.await;
        }
    }
}
