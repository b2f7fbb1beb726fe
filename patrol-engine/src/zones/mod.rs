//! Zone operations: plan, commit, update, delete
//!
//! A zone only ever reaches storage together with a fully covering tour, and
//! every mutation ends in a reconciliation of the matching external area.

use chrono::{Duration, Utc};
use geo::Polygon;

use shared::{LatLon, SamplePoint, SyncAction, Zone, ZoneCreate, ZoneUpdate};

use crate::core::EngineState;
use crate::geo::{bounding_box, points_inside, ring_to_polygon};
use crate::planner::{build_route, Tour};
use crate::store::{AccountStore, OwnerContext, PointSource, ZoneStore};
use crate::utils::{AppError, AppResult};

/// Zone names are stored and also embedded in external area names.
const MAX_NAME_LEN: usize = 200;

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("zone name must not be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "zone name is too long ({} chars, max {MAX_NAME_LEN})",
            name.len()
        )));
    }
    Ok(())
}

/// Planning and lifecycle operations for named zones.
pub struct ZoneService {
    state: EngineState,
}

impl ZoneService {
    pub fn new(state: EngineState) -> Self {
        Self { state }
    }

    /// Points eligible as coverage sources for this polygon: inside the
    /// bounding box, seen within the retention window, then refined by the
    /// exact point-in-polygon test.
    async fn eligible_points(&self, polygon: &Polygon<f64>) -> AppResult<Vec<SamplePoint>> {
        let bbox = bounding_box(polygon)?;
        let seen_since = Utc::now() - Duration::days(self.state.config.point_retention_days);
        let candidates = self.state.points.query(bbox, seen_since).await?;
        Ok(points_inside(polygon, candidates))
    }

    async fn plan_polygon(&self, polygon: &Polygon<f64>) -> AppResult<Tour> {
        let points = self.eligible_points(polygon).await?;
        let tour = build_route(&points, &self.state.config)?;
        tracing::debug!(
            points = points.len(),
            positions = tour.len(),
            length_m = tour.length_m,
            "Planned patrol tour"
        );
        Ok(tour)
    }

    /// Plan a tour for a submitted ring without committing anything.
    pub async fn plan(&self, ring: &[LatLon]) -> AppResult<Tour> {
        let polygon = ring_to_polygon(ring)?;
        self.plan_polygon(&polygon).await
    }

    /// Create a zone: validate, plan, persist, reconcile.
    ///
    /// The record is rolled back if reconciliation fails, so a zone never
    /// exists locally without its external area having been attempted as one
    /// committed step.
    pub async fn create(
        &self,
        owner: &OwnerContext,
        name: &str,
        ring: Vec<LatLon>,
    ) -> AppResult<Zone> {
        validate_name(name)?;
        let polygon = ring_to_polygon(&ring)?;
        let tour = self.plan_polygon(&polygon).await?;

        let zone = self
            .state
            .zones
            .create(
                owner,
                ZoneCreate {
                    name: name.to_string(),
                    ring,
                },
            )
            .await?;

        let result = self
            .state
            .synchronizer
            .reconcile(owner, &zone.name, &zone.ring, &tour.to_ring(), SyncAction::Zone)
            .await;
        if let Err(e) = result {
            let _ = self.state.zones.delete(owner, &zone.id).await;
            return Err(e);
        }
        Ok(zone)
    }

    /// Update geometry and/or name, re-plan, and reconcile.
    ///
    /// A rename leaves a remote area under the old composite name behind;
    /// that stale record is removed before the new one is created. On
    /// reconciliation failure the stored zone reverts to its previous state.
    pub async fn update(
        &self,
        owner: &OwnerContext,
        id: &str,
        data: ZoneUpdate,
    ) -> AppResult<Zone> {
        let existing = self
            .state
            .zones
            .find_by_id(owner, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Zone {id}")))?;

        if let Some(name) = &data.name {
            validate_name(name)?;
        }
        let ring = data.ring.clone().unwrap_or_else(|| existing.ring.clone());
        let polygon = ring_to_polygon(&ring)?;
        let tour = self.plan_polygon(&polygon).await?;

        let updated = self.state.zones.update(owner, id, data).await?;

        let sync_result = async {
            if updated.name != existing.name {
                self.state.synchronizer.remove(owner, &existing.name).await?;
            }
            self.state
                .synchronizer
                .reconcile(
                    owner,
                    &updated.name,
                    &updated.ring,
                    &tour.to_ring(),
                    SyncAction::Zone,
                )
                .await
        }
        .await;

        match sync_result {
            Ok(()) => Ok(updated),
            Err(e) => {
                let revert = ZoneUpdate {
                    name: Some(existing.name),
                    ring: Some(existing.ring),
                };
                let _ = self.state.zones.update(owner, id, revert).await;
                Err(e)
            }
        }
    }

    /// Delete a zone and tear down its external area.
    ///
    /// External teardown runs first: if the registry is unreachable the zone
    /// stays locally and the deletion can simply be retried.
    pub async fn delete(&self, owner: &OwnerContext, id: &str) -> AppResult<bool> {
        let Some(zone) = self.state.zones.find_by_id(owner, id).await? else {
            return Ok(false);
        };
        self.state.synchronizer.remove(owner, &zone.name).await?;
        self.state.zones.delete(owner, id).await
    }

    /// The last reconciliation kind recorded for this account.
    pub async fn last_action(&self, owner: &OwnerContext) -> AppResult<Option<SyncAction>> {
        self.state.accounts.last_action(&owner.id).await
    }
}
