//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod headless_world;
pub mod ollama;
pub mod placeholder_llm;
pub mod ports;
pub mod resilient_llm;
pub mod status;
