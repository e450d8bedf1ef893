//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - LLM calls (could swap Ollama -> Claude/OpenAI, or the offline placeholder)
//! - The renderer/world (spawn, destroy, ground probe, atmosphere)
//! - The status surface (UI text, logs)
//! - Clock (for testing)

mod error;
mod external;
mod testing;
mod world;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    ChatMessage, FinishReason, LlmPort, LlmRequest, LlmResponse, MessageRole, PipelineStatus,
    StatusPort, TokenUsage,
};

// =============================================================================
// Renderer Boundary
// =============================================================================
pub use world::{SpawnKind, SpawnRequest, WorldPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockLlmPort, MockStatusPort};

#[cfg(test)]
pub use world::MockWorldPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{LlmError, WorldError};
