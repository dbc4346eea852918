//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no wall-clock time
//! - Seeded RNG only (reseeded on every reset)
//! - Stable iteration order (authoring order for platforms, insertion order for hazards)
//! - No rendering or platform dependencies

pub mod camera;
pub mod checkpoint;
pub mod collision;
pub mod level;
pub mod rect;
pub mod script;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use checkpoint::CheckpointProgress;
pub use collision::{goal_contact, hazard_contact, is_solid, resolve_horizontal, resolve_vertical};
pub use level::{Checkpoint, Entity, EntityKind, Level, LevelGeometry};
pub use rect::{Rect, intersects};
pub use script::{LevelScript, ProjectileSpawner, ScriptContext};
pub use state::{DeathCause, GameEvent, GamePhase, GameState, Player, Snapshot};
pub use tick::{TickInput, tick};
