//! Structured attributes extracted from a dream description.

use serde::{Deserialize, Serialize};

/// Setting used when extraction produced nothing usable.
pub const DEFAULT_SETTING: &str = "placeholder";

/// Mood used when extraction produced nothing usable. Resolves to the
/// neutral atmosphere profile.
pub const DEFAULT_MOOD: &str = "default";

/// Objective used when extraction produced nothing usable.
pub const DEFAULT_OBJECTIVE: &str = "explore";

/// The record driving scene generation.
///
/// Every field is always populated. Construction starts from the fully
/// defaulted record and overrides fields one by one, so the composer can
/// never observe a half-filled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamAttributes {
    raw_text: String,
    setting: String,
    mood: String,
    characters: Vec<String>,
    objects: Vec<String>,
    objective: String,
}

impl DreamAttributes {
    /// Fully defaulted record for `raw_text`.
    pub fn fallback(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            setting: DEFAULT_SETTING.to_string(),
            mood: DEFAULT_MOOD.to_string(),
            characters: Vec::new(),
            objects: Vec::new(),
            objective: DEFAULT_OBJECTIVE.to_string(),
        }
    }

    /// Blank values keep the default.
    pub fn with_setting(mut self, setting: impl Into<String>) -> Self {
        let setting = setting.into();
        if !setting.trim().is_empty() {
            self.setting = setting;
        }
        self
    }

    /// Blank values keep the default.
    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        let mood = mood.into();
        if !mood.trim().is_empty() {
            self.mood = mood;
        }
        self
    }

    pub fn with_characters(mut self, characters: impl IntoIterator<Item = String>) -> Self {
        self.characters = characters.into_iter().collect();
        self
    }

    pub fn with_objects(mut self, objects: impl IntoIterator<Item = String>) -> Self {
        self.objects = objects.into_iter().collect();
        self
    }

    /// Blank values keep the default.
    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        let objective = objective.into();
        if !objective.trim().is_empty() {
            self.objective = objective;
        }
        self
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn setting(&self) -> &str {
        &self.setting
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn objects(&self) -> &[String] {
        &self.objects
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }
}
