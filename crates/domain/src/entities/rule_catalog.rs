//! Rule catalog - keyword to asset/profile tables authored by content creators
//!
//! Matching policy (load-bearing, keep it exact):
//! - case-insensitive substring: the rule keyword must occur inside the
//!   attribute text
//! - rules are scanned in catalog order, the first match wins

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{keyword_matches, AssetRef, AtmosphereSettings, Mood};

/// Default half-extent of the spawn square.
pub const DEFAULT_SPAWN_BOUNDS: f32 = 50.0;

/// Default height the player is raised above sampled ground.
pub const DEFAULT_PLAYER_SPAWN_HEIGHT: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainRule {
    pub keyword: String,
    pub terrain: AssetRef,
    #[serde(default)]
    pub skybox: Option<AssetRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRule {
    pub keyword: String,
    pub character: AssetRef,
    #[serde(default)]
    pub hostile: bool,
}

/// Atmosphere profiles for the first-class moods.
///
/// The neutral profile used for every other mood is fixed and not part of
/// the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodProfiles {
    #[serde(default = "AtmosphereSettings::mysterious")]
    pub mysterious: AtmosphereSettings,
    #[serde(default = "AtmosphereSettings::peaceful")]
    pub peaceful: AtmosphereSettings,
    #[serde(default = "AtmosphereSettings::scary")]
    pub scary: AtmosphereSettings,
}

impl MoodProfiles {
    pub fn profile_for(&self, mood: Mood) -> AtmosphereSettings {
        match mood {
            Mood::Mysterious => self.mysterious,
            Mood::Peaceful => self.peaceful,
            Mood::Scary => self.scary,
            Mood::Neutral => AtmosphereSettings::neutral(),
        }
    }
}

impl Default for MoodProfiles {
    fn default() -> Self {
        Self {
            mysterious: AtmosphereSettings::mysterious(),
            peaceful: AtmosphereSettings::peaceful(),
            scary: AtmosphereSettings::scary(),
        }
    }
}

fn default_spawn_bounds() -> f32 {
    DEFAULT_SPAWN_BOUNDS
}

fn default_player_spawn_height() -> f32 {
    DEFAULT_PLAYER_SPAWN_HEIGHT
}

/// Read-only configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCatalog {
    #[serde(default)]
    pub terrain_rules: Vec<TerrainRule>,
    #[serde(default)]
    pub character_rules: Vec<CharacterRule>,
    #[serde(default)]
    pub mood_profiles: MoodProfiles,
    #[serde(default)]
    pub object_assets: Vec<AssetRef>,
    #[serde(default = "default_spawn_bounds")]
    pub spawn_bounds: f32,
    #[serde(default)]
    pub player_asset: Option<AssetRef>,
    #[serde(default = "default_player_spawn_height")]
    pub player_spawn_height: f32,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self {
            terrain_rules: Vec::new(),
            character_rules: Vec::new(),
            mood_profiles: MoodProfiles::default(),
            object_assets: Vec::new(),
            spawn_bounds: DEFAULT_SPAWN_BOUNDS,
            player_asset: None,
            player_spawn_height: DEFAULT_PLAYER_SPAWN_HEIGHT,
        }
    }
}

impl RuleCatalog {
    pub fn with_terrain_rule(
        mut self,
        keyword: impl Into<String>,
        terrain: AssetRef,
        skybox: Option<AssetRef>,
    ) -> Self {
        self.terrain_rules.push(TerrainRule {
            keyword: keyword.into(),
            terrain,
            skybox,
        });
        self
    }

    pub fn with_character_rule(
        mut self,
        keyword: impl Into<String>,
        character: AssetRef,
        hostile: bool,
    ) -> Self {
        self.character_rules.push(CharacterRule {
            keyword: keyword.into(),
            character,
            hostile,
        });
        self
    }

    pub fn with_object_assets(mut self, assets: impl IntoIterator<Item = AssetRef>) -> Self {
        self.object_assets = assets.into_iter().collect();
        self
    }

    pub fn with_spawn_bounds(mut self, spawn_bounds: f32) -> Self {
        self.spawn_bounds = spawn_bounds;
        self
    }

    pub fn with_player(mut self, asset: AssetRef, spawn_height: f32) -> Self {
        self.player_asset = Some(asset);
        self.player_spawn_height = spawn_height;
        self
    }

    /// Check authoring invariants. Asset refs are already validated by
    /// their own deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (index, rule) in self.terrain_rules.iter().enumerate() {
            if rule.keyword.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "terrain rule {} has an empty keyword",
                    index
                )));
            }
        }
        for (index, rule) in self.character_rules.iter().enumerate() {
            if rule.keyword.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "character rule {} has an empty keyword",
                    index
                )));
            }
        }
        if !self.spawn_bounds.is_finite() || self.spawn_bounds < 0.0 {
            return Err(DomainError::validation(format!(
                "spawn bounds must be a finite non-negative number, got {}",
                self.spawn_bounds
            )));
        }
        if !self.player_spawn_height.is_finite() {
            return Err(DomainError::validation("player spawn height must be finite"));
        }
        Ok(())
    }

    /// First terrain rule whose keyword appears within `setting`.
    pub fn match_terrain(&self, setting: &str) -> Option<&TerrainRule> {
        self.terrain_rules
            .iter()
            .find(|rule| keyword_matches(setting, &rule.keyword))
    }

    /// First character rule whose keyword appears within `token`.
    pub fn match_character(&self, token: &str) -> Option<&CharacterRule> {
        self.character_rules
            .iter()
            .find(|rule| keyword_matches(token, &rule.keyword))
    }

    /// Atmosphere for a free-form mood keyword (closed set plus neutral).
    pub fn atmosphere_for(&self, mood: &str) -> AtmosphereSettings {
        self.mood_profiles.profile_for(Mood::from_keyword(mood))
    }
}
