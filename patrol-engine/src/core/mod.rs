//! Core module - configuration, engine state, background tasks

pub mod config;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use state::{EngineState, SyncLocks};
pub use tasks::{BackgroundTasks, TaskKind};
