//! AreaApiService - HTTP client for the external area registry
//!
//! The registry exposes list, delete, and create only; there is no keyed
//! upsert. Calls carry no automatic retry: a failure surfaces to the caller
//! and the whole reconciliation is retried instead (the protocol is
//! self-correcting).

use reqwest::Client;
use std::time::Duration;

use shared::{AreaListResponse, AreaPayload, AreaSummary};

use crate::core::Config;
use crate::utils::{AppError, AppResult};

/// HTTP client for the area registry
pub struct AreaApiService {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl AreaApiService {
    /// Build the client from configuration (base URL and request timeout).
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.area_api_url.trim_end_matches('/').to_string(),
            page_size: config.area_page_size,
        })
    }

    /// List all remote areas.
    ///
    /// The registry paginates, but a single page at the configured size holds
    /// every area expected here.
    pub async fn list_areas(&self) -> AppResult<Vec<AreaSummary>> {
        let url = format!(
            "{}/areas/?order=ASC&page=0&perPage={}&sortBy=name",
            self.base_url, self.page_size
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(status, body));
        }

        let list: AreaListResponse = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Failed to parse area list: {e}")))?;
        Ok(list.data)
    }

    /// Delete one remote area by id.
    pub async fn delete_area(&self, id: i64) -> AppResult<()> {
        let url = format!("{}/areas/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(status, body));
        }
        Ok(())
    }

    /// Create one remote area.
    pub async fn create_area(&self, payload: &AreaPayload) -> AppResult<()> {
        let url = format!("{}/areas/", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(status, body));
        }
        Ok(())
    }
}
