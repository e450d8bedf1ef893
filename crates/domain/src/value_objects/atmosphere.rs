//! Mood keywords and the atmosphere profiles they select
//!
//! - Mood: closed set of first-class moods plus a neutral fallback
//! - AtmosphereSettings: light, fog and ambience handed to the renderer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear RGB color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Fog configuration. When `enabled` is false the renderer hides its fog
/// system and ignores density/color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogSettings {
    pub enabled: bool,
    pub density: f32,
    pub color: Color,
}

impl FogSettings {
    pub const fn on(density: f32, color: Color) -> Self {
        Self {
            enabled: true,
            density,
            color,
        }
    }

    pub const fn off() -> Self {
        Self {
            enabled: false,
            density: 0.0,
            color: Color::WHITE,
        }
    }
}

/// Resolved atmosphere for one scene plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereSettings {
    pub light_intensity: f32,
    pub light_color: Color,
    pub fog: FogSettings,
    /// Index into the renderer's mood ambience clips; `None` plays nothing.
    pub ambient_sound: Option<usize>,
}

impl AtmosphereSettings {
    pub const fn mysterious() -> Self {
        Self {
            light_intensity: 0.5,
            light_color: Color::rgb(0.7, 0.7, 1.0),
            fog: FogSettings::on(0.02, Color::rgb(0.5, 0.5, 0.7)),
            ambient_sound: Some(0),
        }
    }

    pub const fn peaceful() -> Self {
        Self {
            light_intensity: 1.2,
            light_color: Color::rgb(1.0, 0.95, 0.8),
            fog: FogSettings::on(0.01, Color::rgb(0.9, 0.9, 1.0)),
            ambient_sound: Some(1),
        }
    }

    pub const fn scary() -> Self {
        Self {
            light_intensity: 0.3,
            light_color: Color::rgb(1.0, 0.6, 0.6),
            fog: FogSettings::on(0.05, Color::rgb(0.2, 0.2, 0.2)),
            ambient_sound: Some(2),
        }
    }

    /// Profile for every mood outside the first-class set: full white light,
    /// no fog, silence.
    pub const fn neutral() -> Self {
        Self {
            light_intensity: 1.0,
            light_color: Color::WHITE,
            fog: FogSettings::off(),
            ambient_sound: None,
        }
    }
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self::neutral()
    }
}

/// First-class moods recognized by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Mysterious,
    Peaceful,
    Scary,
    /// Anything else, including the extractor's default mood
    #[default]
    Neutral,
}

impl Mood {
    /// Resolve a free-form mood keyword. Exact match after trimming and
    /// lowercasing; anything unrecognized is `Neutral`.
    pub fn from_keyword(keyword: &str) -> Self {
        keyword.parse().unwrap_or(Mood::Neutral)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Mysterious => "mysterious",
            Mood::Peaceful => "peaceful",
            Mood::Scary => "scary",
            Mood::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysterious" => Ok(Mood::Mysterious),
            "peaceful" => Ok(Mood::Peaceful),
            "scary" => Ok(Mood::Scary),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}
