//! Zone synchronization against the external area registry
//!
//! The registry has no idempotent upsert by name, so reconciliation is a
//! list, delete-if-present, create sequence. Running it twice with the same
//! inputs leaves exactly one matching remote area. A per-name single-flight
//! lock collapses concurrent attempts for the same area within this process.

pub mod notify;
pub mod service;

pub use notify::ReloadNotifier;
pub use service::AreaApiService;

use std::sync::Arc;

use shared::{AreaPayload, LatLon, PokemonMode, QuestMode, SyncAction};

use crate::core::{Config, SyncLocks};
use crate::store::{AccountStore, OwnerContext};
use crate::utils::AppResult;

/// Fixed zone name for the provisional zone's external area.
pub const BOOTSTRAP_ZONE_NAME: &str = "bootstrap";

// Fixed operating parameters carried on every created area.
const AREA_WORKERS: u32 = 1;
const QUEST_HOURS: [u8; 2] = [1, 10];

/// External area name: always `<owner>_<zone>`.
///
/// Earlier deployments created the provisional zone's first area under its
/// raw name instead; reconciliation migrates those records away (see
/// [`ZoneSynchronizer::reconcile`]).
pub fn area_name(owner: &OwnerContext, zone_name: &str) -> String {
    format!("{}_{}", owner.id, zone_name)
}

/// Reconciles one named area against the registry and fans out reloads.
pub struct ZoneSynchronizer {
    api: AreaApiService,
    notifier: ReloadNotifier,
    accounts: Arc<dyn AccountStore>,
    locks: SyncLocks,
}

impl ZoneSynchronizer {
    pub fn from_config(config: &Config, accounts: Arc<dyn AccountStore>) -> AppResult<Self> {
        Ok(Self {
            api: AreaApiService::from_config(config)?,
            notifier: ReloadNotifier::from_config(config)?,
            accounts,
            locks: SyncLocks::new(),
        })
    }

    /// Make the remote area for `zone_name` match the local zone state.
    ///
    /// Protocol: list all areas, delete every record matching the composite
    /// name, create a fresh area from polygon + tour, record the action kind,
    /// then broadcast reloads. List, delete, and create failures abort and
    /// surface the upstream error; reload failures are logged only.
    ///
    /// Bootstrap reconciliations additionally match (and so delete) areas
    /// under the legacy raw name, converging records created before the
    /// composite naming scheme.
    pub async fn reconcile(
        &self,
        owner: &OwnerContext,
        zone_name: &str,
        ring: &[LatLon],
        tour: &[LatLon],
        action: SyncAction,
    ) -> AppResult<()> {
        let name = area_name(owner, zone_name);
        let _guard = self.locks.acquire(&name).await;

        tracing::info!(area = %name, action = action.as_db(), "Reconciling external area");

        self.delete_matching(&name, action == SyncAction::Bootstrap, zone_name)
            .await?;

        let payload = AreaPayload {
            enabled: true,
            geofence: ring.to_vec(),
            pokemon_mode: PokemonMode {
                workers: AREA_WORKERS,
                enable_scout: false,
                invasion: false,
                route: tour.to_vec(),
            },
            enable_quests: true,
            quest_mode: QuestMode {
                hours: QUEST_HOURS,
                route: tour.to_vec(),
            },
            name: name.clone(),
        };
        self.api.create_area(&payload).await?;
        tracing::info!(area = %name, waypoints = tour.len(), "External area created");

        self.notifier.broadcast().await;
        self.accounts.set_last_action(&owner.id, action).await?;
        Ok(())
    }

    /// Tear down the remote area for `zone_name` if it exists.
    ///
    /// Returns whether anything was deleted. Dependents are notified only
    /// when a deletion actually happened.
    pub async fn remove(&self, owner: &OwnerContext, zone_name: &str) -> AppResult<bool> {
        let name = area_name(owner, zone_name);
        let _guard = self.locks.acquire(&name).await;

        let removed = self
            .delete_matching(&name, zone_name == BOOTSTRAP_ZONE_NAME, zone_name)
            .await?;
        if removed {
            tracing::info!(area = %name, "External area removed");
            self.notifier.broadcast().await;
        }
        Ok(removed)
    }

    /// Delete every listed area whose name matches; abort on the first
    /// failed delete. Returns whether at least one record was deleted.
    async fn delete_matching(
        &self,
        name: &str,
        include_legacy: bool,
        legacy_name: &str,
    ) -> AppResult<bool> {
        let areas = self.api.list_areas().await?;
        let mut removed = false;
        for area in areas {
            let matches = area.name == name || (include_legacy && area.name == legacy_name);
            if matches {
                self.api.delete_area(area.id).await?;
                tracing::debug!(area = %area.name, id = area.id, "Deleted stale external area");
                removed = true;
            }
        }
        Ok(removed)
    }
}
