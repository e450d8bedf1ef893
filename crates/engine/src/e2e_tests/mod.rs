//! Backend E2E tests.
//!
//! These tests drive the whole dream pipeline using:
//! - A scripted LLM (no network)
//! - The headless world with a flat ground plane
//! - The sample `catalog.json` shipped at the repo root
//!
//! ```bash
//! cargo test -p dreamforge-engine --lib e2e_tests
//! ```

mod dream_flow_tests;
mod e2e_helpers;

pub use e2e_helpers::*;
