//! Level templates and the entities they are built from
//!
//! A `Level` is immutable template data. Every attempt works on fresh copies of
//! its geometry produced by `Level::instantiate`; the template is never touched.

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::script::LevelScript;
use crate::consts::*;

/// Entity kinds that live in a level's geometry arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Platform,
    Hazard,
}

/// A platform or hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique within a level, used by scripts for lookups
    pub id: String,
    pub kind: EntityKind,
    pub rect: Rect,
    /// Render hint (0xRRGGBB)
    pub color: u32,
    /// Rendered, and solid for platforms / lethal for hazards
    pub visible: bool,
    /// Not rendered but still collidable (invisible walls)
    #[serde(default)]
    pub hidden: bool,
    /// Participates in collision even while not visible
    #[serde(default)]
    pub always_solid: bool,
    /// Script-owned velocity hints
    #[serde(default)]
    pub vx: Option<f32>,
    #[serde(default)]
    pub vy: Option<f32>,
    /// One-shot trigger latch for scripts
    #[serde(default)]
    pub moving: bool,
}

impl Entity {
    fn new(kind: EntityKind, id: &str, x: f32, y: f32, w: f32, h: f32, color: u32) -> Self {
        Self {
            id: id.to_string(),
            kind,
            rect: Rect::new(x, y, w, h),
            color,
            visible: true,
            hidden: false,
            always_solid: false,
            vx: None,
            vy: None,
            moving: false,
        }
    }

    pub fn platform(id: &str, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(EntityKind::Platform, id, x, y, w, h, C_PLATFORM)
    }

    pub fn hazard(id: &str, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(EntityKind::Hazard, id, x, y, w, h, C_HAZARD)
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, vx: Option<f32>, vy: Option<f32>) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Collidable but never drawn
    pub fn invisible_wall(mut self) -> Self {
        self.visible = false;
        self.hidden = true;
        self.always_solid = true;
        self
    }

    /// Solid regardless of visibility (ceilings that blink out visually)
    pub fn solid_always(mut self) -> Self {
        self.always_solid = true;
        self
    }
}

/// A respawn checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub rect: Rect,
    /// Where the player reappears after dying past this checkpoint
    pub respawn: Vec2,
    /// Only ever flips false -> true within an attempt
    pub activated: bool,
}

impl Checkpoint {
    pub fn new(id: &str, rect: Rect, respawn: Vec2) -> Self {
        Self {
            id: id.to_string(),
            rect,
            respawn,
            activated: false,
        }
    }

    /// The pre-activated checkpoint sitting on the level's start position
    pub fn start(pos: Vec2) -> Self {
        Self {
            id: START_CHECKPOINT_ID.to_string(),
            rect: Rect::new(pos.x, pos.y, 20.0, 40.0),
            respawn: pos,
            activated: true,
        }
    }
}

/// Mutable per-attempt copy of a level's geometry
#[derive(Debug, Clone)]
pub struct LevelGeometry {
    pub platforms: Vec<Entity>,
    pub hazards: Vec<Entity>,
    pub checkpoints: Vec<Checkpoint>,
    pub goal: Rect,
}

/// Immutable level template
#[derive(Clone)]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub start: Vec2,
    pub goal: Rect,
    pub platforms: Vec<Entity>,
    pub hazards: Vec<Entity>,
    pub checkpoints: Vec<Checkpoint>,
    /// Seed for the script RNG, reapplied on every reset
    pub seed: u64,
    pub script: Option<Arc<dyn LevelScript>>,
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("start", &self.start)
            .field("platforms", &self.platforms.len())
            .field("hazards", &self.hazards.len())
            .field("checkpoints", &self.checkpoints.len())
            .field("scripted", &self.script.is_some())
            .finish()
    }
}

impl Level {
    /// Start a template with a pre-activated start checkpoint
    pub fn new(id: u32, name: &str, start: Vec2, goal: Rect) -> Self {
        Self {
            id,
            name: name.to_string(),
            start,
            goal,
            platforms: Vec::new(),
            hazards: Vec::new(),
            checkpoints: vec![Checkpoint::start(start)],
            seed: u64::from(id),
            script: None,
        }
    }

    pub fn with_platforms(mut self, platforms: Vec<Entity>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn with_hazards(mut self, hazards: Vec<Entity>) -> Self {
        self.hazards = hazards;
        self
    }

    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoints.push(checkpoint);
        self
    }

    pub fn with_script(mut self, script: impl LevelScript + 'static) -> Self {
        self.script = Some(Arc::new(script));
        self
    }

    /// Deep copy of the mutable arrays for a new attempt
    pub fn instantiate(&self) -> LevelGeometry {
        LevelGeometry {
            platforms: self.platforms.clone(),
            hazards: self.hazards.clone(),
            checkpoints: self.checkpoints.clone(),
            goal: self.goal,
        }
    }

    /// Checkpoint ids activated in the template itself
    pub fn preactivated(&self) -> impl Iterator<Item = &str> {
        self.checkpoints
            .iter()
            .filter(|cp| cp.activated)
            .map(|cp| cp.id.as_str())
    }
}
