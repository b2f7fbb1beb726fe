//! Synchronization action kinds

use serde::{Deserialize, Serialize};

/// Which kind of reconciliation ran last, kept per account for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// A named zone was reconciled.
    Zone,
    /// The provisional zone was reconciled.
    Bootstrap,
}

impl SyncAction {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "zone" => Some(Self::Zone),
            "bootstrap" => Some(Self::Bootstrap),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Zone => "zone",
            Self::Bootstrap => "bootstrap",
        }
    }
}
