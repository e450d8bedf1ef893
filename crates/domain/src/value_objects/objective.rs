use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Game-logic mode selected by the dream's objective keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveMode {
    #[default]
    Explore,
    Collect,
    Chase,
}

impl ObjectiveMode {
    /// Resolve an objective keyword; anything outside the closed set,
    /// including the empty string, is `Explore`.
    pub fn from_keyword(keyword: &str) -> Self {
        keyword.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveMode::Explore => "explore",
            ObjectiveMode::Collect => "collect",
            ObjectiveMode::Chase => "chase",
        }
    }
}

impl fmt::Display for ObjectiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectiveMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "explore" => Ok(ObjectiveMode::Explore),
            "collect" => Ok(ObjectiveMode::Collect),
            "chase" => Ok(ObjectiveMode::Chase),
            _ => Err(DomainError::parse(format!("Unknown objective: {}", s))),
        }
    }
}
