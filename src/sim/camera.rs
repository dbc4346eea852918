//! Horizontal follow camera
//!
//! Keeps the player left of center so there is room to see what comes next.
//! Vertical position is fixed.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    /// Lerp toward the follow target, never left of world x = 0
    pub fn follow(&mut self, player_x: f32, tuning: &Tuning) {
        let target = player_x - tuning.viewport_width * tuning.camera_lead;
        self.x = (self.x + (target - self.x) * tuning.camera_lerp).max(0.0);
    }

    /// Jump straight to the player without smoothing (soft reset)
    pub fn snap(&mut self, player_x: f32, tuning: &Tuning) {
        self.x = (player_x - tuning.viewport_width * tuning.camera_snap_lead).max(0.0);
    }

    /// Back to the level origin (hard reset)
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }
}
