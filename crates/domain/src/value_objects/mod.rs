//! Value objects shared by the extractor, composer and renderer boundary.

mod asset_ref;
mod atmosphere;
mod geometry;
mod keyword;
mod objective;

pub use asset_ref::AssetRef;
pub use atmosphere::{AtmosphereSettings, Color, FogSettings, Mood};
pub use geometry::Position;
pub use keyword::keyword_matches;
pub use objective::ObjectiveMode;
