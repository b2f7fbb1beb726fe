//! Unified Error Handling
//!
//! Application-wide error type and result alias. Planner rejections carry
//! their own typed error ([`crate::planner::ConstraintError`]) and convert
//! into [`AppError::BusinessRule`] so callers get the count-bearing message.

use tracing::error;

/// Convenience alias used across the engine.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Input Errors ==========
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== Upstream Errors ==========
    /// The external service answered with a non-success status.
    #[error("Upstream service error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The external service could not be reached at all.
    #[error("Upstream request failed: {0}")]
    Transport(String),

    // ========== System Errors ==========
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        error!(target: "internal", error = %msg, "Internal error occurred");
        Self::Internal(msg)
    }

    /// Is this a rejection the caller can fix by changing input?
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::BusinessRule(_) | Self::Conflict(_) | Self::NotFound(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Transport(e.to_string())
    }
}
