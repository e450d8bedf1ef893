//! DreamForge Engine library.
//!
//! Turns a free-form dream description into a playable scene.
//!
//! ## Structure
//!
//! - `use_cases/` - extraction, scene composition/application and the dream pipeline
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end pipeline tests against the headless world.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
