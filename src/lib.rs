//! Glitch Runner - A side-scrolling platformer with self-rewriting levels
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, checkpoints, level scripts)
//! - `levels`: Authored level content and the level catalog
//! - `session`: Host-side glue (menus, respawn delay, completed levels)
//! - `input`: Logical key state fed to the simulation
//! - `tuning`: Data-driven physics and camera constants

pub mod error;
pub mod input;
pub mod levels;
pub mod progress;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::EngineError;
pub use levels::LevelCatalog;
pub use progress::Progress;
pub use session::{AppPhase, Session};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical ticks per second (the host drives one tick per display frame)
    pub const TICK_RATE: u32 = 60;

    /// Player hitbox (constant for the life of the simulation)
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;

    /// Checkpoint every level starts with, pre-activated at the start position
    pub const START_CHECKPOINT_ID: &str = "start_cp";

    /// Render hints (0xRRGGBB). Not behaviorally significant.
    pub const C_PLATFORM: u32 = 0x00f3ff;
    pub const C_HAZARD: u32 = 0xff003c;
    pub const C_LASER: u32 = 0xff00ff;
    pub const C_GOAL: u32 = 0xfcee0a;
    pub const C_CHECKPOINT: u32 = 0x39ff14;
    pub const C_INVISIBLE: u32 = 0x050505;
}

/// Zone label shown by the host for a checkpoint id
#[inline]
pub fn zone_label(checkpoint_id: &str) -> String {
    format!("ZONE_{}", checkpoint_id.to_uppercase())
}
