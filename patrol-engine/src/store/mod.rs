//! Storage boundary owned by the embedding application
//!
//! The engine never talks to a database itself. The owning application
//! implements these traits over its own storage and passes them in through
//! [`crate::core::EngineState`]. In-memory implementations live in
//! [`memory`] for tests and embedding without a backing store.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shared::{BoundingBox, ProvisionalZone, SamplePoint, SyncAction, Zone, ZoneCreate, ZoneUpdate};

use crate::utils::AppResult;

pub use memory::{MemoryAccountStore, MemoryBootstrapStore, MemoryPointSource, MemoryZoneStore};

/// The account on whose behalf an operation runs.
///
/// Threaded explicitly through every engine call; the engine keeps no
/// process-wide notion of a current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerContext {
    pub id: String,
}

impl OwnerContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Read-only historical point source.
#[async_trait]
pub trait PointSource: Send + Sync {
    /// Points inside the box whose last observation is at or after
    /// `seen_since`. Exact polygon refinement happens in the engine.
    async fn query(&self, bbox: BoundingBox, seen_since: DateTime<Utc>)
        -> AppResult<Vec<SamplePoint>>;
}

/// Zone records of the owning application.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    async fn create(&self, owner: &OwnerContext, data: ZoneCreate) -> AppResult<Zone>;
    async fn update(&self, owner: &OwnerContext, id: &str, data: ZoneUpdate) -> AppResult<Zone>;
    async fn find_by_id(&self, owner: &OwnerContext, id: &str) -> AppResult<Option<Zone>>;
    async fn find_all(&self, owner: &OwnerContext) -> AppResult<Vec<Zone>>;
    async fn delete(&self, owner: &OwnerContext, id: &str) -> AppResult<bool>;
}

/// Provisional-zone records, at most one per account.
#[async_trait]
pub trait BootstrapStore: Send + Sync {
    async fn find(&self, owner: &OwnerContext) -> AppResult<Option<ProvisionalZone>>;
    async fn upsert(&self, zone: ProvisionalZone) -> AppResult<()>;
    /// Clear only the tour; polygon and synced_at stay.
    async fn clear_tour(&self, owner_id: &str) -> AppResult<()>;
    /// Snapshot of zones whose tour is set and whose `synced_at` is before
    /// `cutoff`. The sweep acts on each row individually.
    async fn list_expired(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<ProvisionalZone>>;
}

/// Per-account status fields.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn set_last_action(&self, owner_id: &str, action: SyncAction) -> AppResult<()>;
    async fn last_action(&self, owner_id: &str) -> AppResult<Option<SyncAction>>;
}
