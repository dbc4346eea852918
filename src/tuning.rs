//! Data-driven physics and camera constants
//!
//! Values are per tick, tuned for `consts::TICK_RATE`. Loadable from JSON so
//! feel can be adjusted without rebuilding; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Vertical ===
    /// Added to `vy` every tick
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// A jump sets `vy = -jump_force`
    pub jump_force: f32,

    // === Horizontal ===
    /// `vx` change per tick while a direction is held
    pub move_accel: f32,
    pub move_speed: f32,
    /// `vx` multiplier per tick with no direction held
    pub friction: f32,
    /// `|vx|` below this snaps to zero
    pub stop_epsilon: f32,

    // === Contact ===
    /// Hazard hitboxes are shrunk by this much on every side
    pub hazard_inset: f32,

    // === World / viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Player dies once `y > viewport_height + fall_margin`
    pub fall_margin: f32,

    // === Camera ===
    /// Fraction of the viewport kept left of the player while following
    pub camera_lead: f32,
    /// Fraction used when snapping after a respawn
    pub camera_snap_lead: f32,
    /// Follow damping per tick
    pub camera_lerp: f32,

    // === Host ===
    /// Ticks between a death and the respawn
    pub respawn_delay_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            max_fall_speed: 15.0,
            jump_force: 12.0,

            move_accel: 1.0,
            move_speed: 5.0,
            friction: 0.8,
            stop_epsilon: 0.1,

            hazard_inset: 6.0,

            viewport_width: 800.0,
            viewport_height: 450.0,
            fall_margin: 100.0,

            camera_lead: 0.35,
            camera_snap_lead: 0.3,
            camera_lerp: 0.1,

            // ~600 ms at 60 Hz
            respawn_delay_ticks: 36,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = [
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("jump_force", self.jump_force),
            ("move_accel", self.move_accel),
            ("move_speed", self.move_speed),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let unit = [
            ("friction", self.friction),
            ("camera_lead", self.camera_lead),
            ("camera_snap_lead", self.camera_snap_lead),
            ("camera_lerp", self.camera_lerp),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::InvalidTuning(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.hazard_inset < 0.0 || self.stop_epsilon < 0.0 || self.fall_margin < 0.0 {
            return Err(EngineError::InvalidTuning(
                "hazard_inset, stop_epsilon and fall_margin must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
