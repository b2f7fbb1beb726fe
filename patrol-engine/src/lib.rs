//! Patrol Engine - zone coverage planning and external scanner reconciliation
//!
//! # Overview
//!
//! Given a user-drawn zone polygon, the engine derives a bounded patrol tour
//! of fixed-radius sampling positions that covers the zone's historical
//! points, then keeps the external scanning service's matching "area"
//! configuration in sync with the zone. Provisional ("bootstrap") zones carry
//! a time-to-live and are expired by a periodic sweep.
//!
//! # Module structure
//!
//! ```text
//! patrol-engine/src/
//! ├── core/       # configuration, engine state, background tasks
//! ├── geo/        # geometry primitives (haversine, hull, grid, ...)
//! ├── planner/    # coverage planner, route sequencer, constraint checks
//! ├── sync/       # area registry client, synchronizer, reload fan-out
//! ├── zones/      # named-zone operations
//! ├── bootstrap/  # provisional-zone lifecycle and expiry sweep
//! ├── store/      # storage boundary traits + in-memory implementations
//! └── utils/      # errors, logging
//! ```
//!
//! The owning application supplies storage through the [`store`] traits and
//! drives the [`zones::ZoneService`] / [`bootstrap::BootstrapService`]
//! operations; the sweep runs on [`core::BackgroundTasks`].

pub mod bootstrap;
pub mod core;
pub mod geo;
pub mod planner;
pub mod store;
pub mod sync;
pub mod utils;
pub mod zones;

// Re-export common types
pub use crate::core::{BackgroundTasks, Config, EngineState, TaskKind};
pub use crate::store::OwnerContext;
pub use crate::utils::{init_logger, init_logger_with_file, AppError, AppResult};

pub use crate::bootstrap::{BootstrapService, BootstrapSweeper};
pub use crate::planner::{ConstraintError, CoveragePlan, Tour};
pub use crate::sync::ZoneSynchronizer;
pub use crate::zones::ZoneService;

/// Register the bootstrap expiry sweep on a task manager.
pub fn spawn_sweeper(state: &EngineState, tasks: &mut BackgroundTasks) {
    let sweeper = BootstrapSweeper::new(state.clone(), tasks.shutdown_token());
    tasks.spawn("bootstrap_sweep", TaskKind::Periodic, async move {
        sweeper.run().await;
    });
}
