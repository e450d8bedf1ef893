//! Error types for port operations.

use dreamforge_domain::SpawnHandle;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors reported by the renderer/world boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// The renderer could not instantiate an asset.
    #[error("Failed to spawn {asset}: {message}")]
    SpawnFailed { asset: String, message: String },

    /// The handle does not belong to any live instance.
    #[error("Unknown spawn handle {0}")]
    UnknownHandle(SpawnHandle),
}

impl WorldError {
    /// Create a SpawnFailed error with asset context.
    pub fn spawn_failed(asset: impl ToString, message: impl ToString) -> Self {
        Self::SpawnFailed {
            asset: asset.to_string(),
            message: message.to_string(),
        }
    }
}
