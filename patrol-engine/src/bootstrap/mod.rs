//! Provisional zone ("bootstrap") lifecycle
//!
//! A bootstrap is a time-boxed zone used to collect initial data where no
//! historical points exist yet. Its tour is a regular grid rather than a
//! planned cover, it lives at most one TTL after its last sync, and its
//! polygon survives the tour.

pub mod sweep;

pub use sweep::BootstrapSweeper;

use chrono::Utc;

use shared::{LatLon, ProvisionalZone, SyncAction};

use crate::core::EngineState;
use crate::geo::{area_km2, point_grid, ring_to_polygon};
use crate::store::{BootstrapStore, OwnerContext};
use crate::sync::BOOTSTRAP_ZONE_NAME;
use crate::utils::{AppError, AppResult};

/// Lifecycle operations for the per-account provisional zone.
pub struct BootstrapService {
    state: EngineState,
}

impl BootstrapService {
    pub fn new(state: EngineState) -> Self {
        Self { state }
    }

    /// Build the grid tour for a submitted ring.
    ///
    /// The zone must stay under the area ceiling; grid spacing is one disc
    /// diameter so neighboring positions touch.
    pub fn plan(&self, ring: &[LatLon]) -> AppResult<Vec<LatLon>> {
        let polygon = ring_to_polygon(ring)?;

        let area = area_km2(&polygon);
        let max_area = self.state.config.bootstrap_max_area_km2;
        if area > max_area {
            return Err(AppError::business_rule(format!(
                "zone area {area:.2} km² exceeds the maximum of {max_area:.0} km²"
            )));
        }

        let grid = point_grid(&polygon, self.state.config.grid_spacing_m());
        if grid.is_empty() {
            return Err(AppError::business_rule(
                "no grid positions fall inside the drawn zone",
            ));
        }
        Ok(grid)
    }

    /// Create or refresh the provisional zone: plan the grid tour, reconcile
    /// the external area, then persist with a fresh sync timestamp.
    ///
    /// Re-syncing an active bootstrap replaces the tour and restarts the
    /// time-to-live.
    pub async fn sync(&self, owner: &OwnerContext, ring: Vec<LatLon>) -> AppResult<ProvisionalZone> {
        let tour = self.plan(&ring)?;

        self.state
            .synchronizer
            .reconcile(owner, BOOTSTRAP_ZONE_NAME, &ring, &tour, SyncAction::Bootstrap)
            .await?;

        let zone = ProvisionalZone {
            owner_id: owner.id.clone(),
            ring,
            tour: Some(tour),
            synced_at: Utc::now(),
        };
        self.state.bootstraps.upsert(zone.clone()).await?;
        Ok(zone)
    }

    /// The stored provisional zone, if any.
    pub async fn find(&self, owner: &OwnerContext) -> AppResult<Option<ProvisionalZone>> {
        self.state.bootstraps.find(owner).await
    }

    /// Explicit user action: drop the tour, keep polygon and external state.
    ///
    /// The next full reconciliation corrects the remote side.
    pub async fn clear_tour(&self, owner: &OwnerContext) -> AppResult<()> {
        self.state.bootstraps.clear_tour(&owner.id).await
    }

    /// Expire one provisional zone whose time-to-live has elapsed.
    ///
    /// Local state is the source of truth: the stored tour is cleared first,
    /// and a failed external deletion is logged rather than retried, leaving
    /// the remote side to the next full reconciliation.
    pub async fn expire(&self, zone: &ProvisionalZone) -> AppResult<()> {
        let owner = OwnerContext::new(zone.owner_id.clone());
        self.state.bootstraps.clear_tour(&owner.id).await?;
        tracing::info!(owner = %owner.id, "Provisional tour expired");

        if let Err(e) = self
            .state
            .synchronizer
            .remove(&owner, BOOTSTRAP_ZONE_NAME)
            .await
        {
            tracing::warn!(owner = %owner.id, error = %e, "Failed to remove expired bootstrap area");
        }
        Ok(())
    }
}
