//! Use cases - User story orchestration.
//!
//! - `extraction` - dream text to structured attributes through the LLM
//! - `scene` - attributes to a scene plan, and a plan into the world
//! - `dream` - the whole pipeline behind one trigger

pub mod dream;
pub mod extraction;
pub mod scene;

pub use dream::{GeneratedScene, PipelineError, ProcessDream, ProcessDreamBuilder};
pub use extraction::{ExtractDreamAttributes, Extraction, ExtractionFailure};
pub use scene::{ApplyScenePlan, ComposeScene, SceneOwnership};
