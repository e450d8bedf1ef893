use serde::{Deserialize, Serialize};

/// World-space position (y is up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same position raised by `dy`.
    pub fn raised(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }
}
