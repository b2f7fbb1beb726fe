//! In-memory store implementations
//!
//! Lock-free maps keyed the way the real storage indexes its tables. Used by
//! the integration tests and by embedders that have no backing store yet.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use shared::{BoundingBox, ProvisionalZone, SamplePoint, SyncAction, Zone, ZoneCreate, ZoneUpdate};

use crate::store::{AccountStore, BootstrapStore, OwnerContext, PointSource, ZoneStore};
use crate::utils::{AppError, AppResult};

/// Zones keyed by id.
#[derive(Debug, Default)]
pub struct MemoryZoneStore {
    zones: DashMap<String, Zone>,
}

impl MemoryZoneStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ZoneStore for MemoryZoneStore {
    async fn create(&self, owner: &OwnerContext, data: ZoneCreate) -> AppResult<Zone> {
        let duplicate = self
            .zones
            .iter()
            .any(|z| z.owner_id == owner.id && z.name == data.name);
        if duplicate {
            return Err(AppError::conflict(format!(
                "zone name '{}' already exists",
                data.name
            )));
        }

        let now = Utc::now();
        let zone = Zone {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner.id.clone(),
            name: data.name,
            ring: data.ring,
            created_at: now,
            updated_at: now,
        };
        self.zones.insert(zone.id.clone(), zone.clone());
        Ok(zone)
    }

    async fn update(&self, owner: &OwnerContext, id: &str, data: ZoneUpdate) -> AppResult<Zone> {
        let mut entry = self
            .zones
            .get_mut(id)
            .filter(|z| z.owner_id == owner.id)
            .ok_or_else(|| AppError::not_found(format!("Zone {id}")))?;

        if let Some(name) = data.name {
            entry.name = name;
        }
        if let Some(ring) = data.ring {
            entry.ring = ring;
        }
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    async fn find_by_id(&self, owner: &OwnerContext, id: &str) -> AppResult<Option<Zone>> {
        Ok(self
            .zones
            .get(id)
            .filter(|z| z.owner_id == owner.id)
            .map(|z| z.value().clone()))
    }

    async fn find_all(&self, owner: &OwnerContext) -> AppResult<Vec<Zone>> {
        Ok(self
            .zones
            .iter()
            .filter(|z| z.owner_id == owner.id)
            .map(|z| z.value().clone())
            .collect())
    }

    async fn delete(&self, owner: &OwnerContext, id: &str) -> AppResult<bool> {
        let owned = self
            .zones
            .get(id)
            .map(|z| z.owner_id == owner.id)
            .unwrap_or(false);
        if !owned {
            return Ok(false);
        }
        Ok(self.zones.remove(id).is_some())
    }
}

/// Provisional zones keyed by owner.
#[derive(Debug, Default)]
pub struct MemoryBootstrapStore {
    zones: DashMap<String, ProvisionalZone>,
}

impl MemoryBootstrapStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BootstrapStore for MemoryBootstrapStore {
    async fn find(&self, owner: &OwnerContext) -> AppResult<Option<ProvisionalZone>> {
        Ok(self.zones.get(&owner.id).map(|z| z.value().clone()))
    }

    async fn upsert(&self, zone: ProvisionalZone) -> AppResult<()> {
        self.zones.insert(zone.owner_id.clone(), zone);
        Ok(())
    }

    async fn clear_tour(&self, owner_id: &str) -> AppResult<()> {
        if let Some(mut entry) = self.zones.get_mut(owner_id) {
            entry.tour = None;
        }
        Ok(())
    }

    async fn list_expired(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<ProvisionalZone>> {
        Ok(self
            .zones
            .iter()
            .filter(|z| z.tour.is_some() && z.synced_at < cutoff)
            .map(|z| z.value().clone())
            .collect())
    }
}

/// Last-action field keyed by owner.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    actions: DashMap<String, SyncAction>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn set_last_action(&self, owner_id: &str, action: SyncAction) -> AppResult<()> {
        self.actions.insert(owner_id.to_string(), action);
        Ok(())
    }

    async fn last_action(&self, owner_id: &str) -> AppResult<Option<SyncAction>> {
        Ok(self.actions.get(owner_id).map(|a| *a))
    }
}

/// Fixed point set with per-point observation timestamps.
#[derive(Debug, Default)]
pub struct MemoryPointSource {
    points: Vec<(SamplePoint, DateTime<Utc>)>,
}

impl MemoryPointSource {
    pub fn new(points: Vec<(SamplePoint, DateTime<Utc>)>) -> Self {
        Self { points }
    }

    /// Every point observed now.
    pub fn fresh(points: Vec<SamplePoint>) -> Self {
        let now = Utc::now();
        Self {
            points: points.into_iter().map(|p| (p, now)).collect(),
        }
    }
}

#[async_trait]
impl PointSource for MemoryPointSource {
    async fn query(
        &self,
        bbox: BoundingBox,
        seen_since: DateTime<Utc>,
    ) -> AppResult<Vec<SamplePoint>> {
        Ok(self
            .points
            .iter()
            .filter(|(p, seen)| *seen >= seen_since && bbox.contains(p.lat, p.lon))
            .map(|(p, _)| *p)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::LatLon;

    fn ring() -> Vec<LatLon> {
        vec![
            LatLon::new(48.0, 9.0),
            LatLon::new(48.0, 9.01),
            LatLon::new(48.01, 9.0),
            LatLon::new(48.0, 9.0),
        ]
    }

    #[tokio::test]
    async fn test_zone_crud_roundtrip() {
        let store = MemoryZoneStore::new();
        let owner = OwnerContext::new("42");

        let zone = store
            .create(&owner, ZoneCreate { name: "north".into(), ring: ring() })
            .await
            .unwrap();
        let fetched = store.find_by_id(&owner, &zone.id).await.unwrap().unwrap();
        assert_eq!(fetched.ring, ring());

        // Names are unique per owner.
        let dup = store
            .create(&owner, ZoneCreate { name: "north".into(), ring: ring() })
            .await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        // Another owner cannot see or delete it.
        let other = OwnerContext::new("7");
        assert!(store.find_by_id(&other, &zone.id).await.unwrap().is_none());
        assert!(!store.delete(&other, &zone.id).await.unwrap());
        assert!(store.delete(&owner, &zone.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_bootstrap_expiry_listing() {
        let store = MemoryBootstrapStore::new();
        let now = Utc::now();

        store
            .upsert(ProvisionalZone {
                owner_id: "42".into(),
                ring: ring(),
                tour: Some(vec![LatLon::new(48.0, 9.0)]),
                synced_at: now - Duration::minutes(31),
            })
            .await
            .unwrap();
        store
            .upsert(ProvisionalZone {
                owner_id: "7".into(),
                ring: ring(),
                tour: Some(vec![LatLon::new(48.0, 9.0)]),
                synced_at: now,
            })
            .await
            .unwrap();

        let cutoff = now - Duration::minutes(30);
        let expired = store.list_expired(cutoff).await.unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].owner_id, "42");

        // A cleared tour no longer counts as expired.
        store.clear_tour("42").await.unwrap();
        assert!(store.list_expired(cutoff).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_point_source_window_and_bbox() {
        let now = Utc::now();
        let source = MemoryPointSource::new(vec![
            (SamplePoint { id: 1, lat: 48.005, lon: 9.005 }, now),
            (SamplePoint { id: 2, lat: 48.005, lon: 9.005 }, now - Duration::days(31)),
            (SamplePoint { id: 3, lat: 50.0, lon: 9.005 }, now),
        ]);
        let bbox = BoundingBox { north: 48.01, south: 48.0, east: 9.01, west: 9.0 };
        let points = source.query(bbox, now - Duration::days(30)).await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, 1);
    }
}
