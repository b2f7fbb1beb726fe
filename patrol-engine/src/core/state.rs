//! Engine state - shared handles for every planning and sync operation

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core::Config;
use crate::store::{AccountStore, BootstrapStore, PointSource, ZoneStore};
use crate::sync::ZoneSynchronizer;

/// Single-flight lock map keyed by external area name.
///
/// The area registry has no keyed upsert, so two concurrent reconciliations
/// for the same name could both observe "not found" and double-create. Each
/// reconciliation holds the lock for its composite name for its full
/// list-delete-create sequence, collapsing concurrent duplicate attempts
/// within this process.
#[derive(Debug, Default)]
pub struct SyncLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SyncLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the lock for one area name, waiting if another reconciliation
    /// for the same name is in flight.
    pub async fn acquire(&self, name: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        lock.lock_owned().await
    }
}

/// Shared engine state - holds configuration, the storage boundary, and the
/// zone synchronizer. Cloning is cheap (all components behind `Arc`).
#[derive(Clone)]
pub struct EngineState {
    /// Engine configuration
    pub config: Config,
    /// Zone records of the owning application
    pub zones: Arc<dyn ZoneStore>,
    /// Provisional zone records of the owning application
    pub bootstraps: Arc<dyn BootstrapStore>,
    /// Per-account status fields of the owning application
    pub accounts: Arc<dyn AccountStore>,
    /// Read-only historical point source
    pub points: Arc<dyn PointSource>,
    /// External area reconciliation
    pub synchronizer: Arc<ZoneSynchronizer>,
}

impl EngineState {
    /// Wire up the engine against a set of store implementations.
    ///
    /// Builds the HTTP client for the external registry from `config`.
    pub fn initialize(
        config: Config,
        zones: Arc<dyn ZoneStore>,
        bootstraps: Arc<dyn BootstrapStore>,
        accounts: Arc<dyn AccountStore>,
        points: Arc<dyn PointSource>,
    ) -> crate::utils::AppResult<Self> {
        let synchronizer = Arc::new(ZoneSynchronizer::from_config(&config, accounts.clone())?);
        Ok(Self {
            config,
            zones,
            bootstraps,
            accounts,
            points,
            synchronizer,
        })
    }
}
