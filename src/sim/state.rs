//! Game state and core simulation types
//!
//! `GameState` is one attempt at one level: the mutable copy of its geometry,
//! the player, camera and checkpoint progress. The host owns exactly one.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::checkpoint::CheckpointProgress;
use super::level::{Checkpoint, Entity, Level};
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Zone label shown from a hard reset until the first checkpoint
pub const START_ZONE: &str = "ZONE_START";

/// Current phase of the attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Physics running
    Playing,
    /// Goal reached; the tick is a no-op until the host moves on
    LevelComplete,
}

/// Why a life ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard { id: String },
    OutOfBounds,
}

/// Outbound notifications for the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CheckpointActivated { id: String },
    ZoneChanged { label: String },
    PlayerDied { cause: DeathCause },
    LevelComplete { level_id: u32 },
}

/// The player body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    /// Set only by a downward vertical correction this tick
    pub grounded: bool,
    /// Terminal for the current life
    pub dead: bool,
}

impl Player {
    pub fn spawn(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            w: PLAYER_WIDTH,
            h: PLAYER_HEIGHT,
            vx: 0.0,
            vy: 0.0,
            grounded: false,
            dead: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Read-only view handed to the drawing layer after each tick
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub platforms: &'a [Entity],
    pub hazards: &'a [Entity],
    pub goal: Rect,
    pub checkpoints: &'a [Checkpoint],
    pub camera: Camera,
    pub frame_count: u64,
    pub zone: &'a str,
}

/// One attempt at a level
#[derive(Debug, Clone)]
pub struct GameState {
    /// Template the instance is copied from
    pub level: Arc<Level>,
    pub tuning: Tuning,
    pub platforms: Vec<Entity>,
    pub hazards: Vec<Entity>,
    pub checkpoints: Vec<Checkpoint>,
    pub goal: Rect,
    pub player: Player,
    pub camera: Camera,
    pub progress: CheckpointProgress,
    /// Ticks since the last reset; the script's time base
    pub frame_count: u64,
    pub phase: GamePhase,
    /// External pause gate
    pub paused: bool,
    /// Label of the last zone entered
    pub zone: String,
    /// RNG handed to the level script, reseeded on every reset
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Enter a level (hard reset)
    pub fn new(level: Arc<Level>, tuning: Tuning) -> Self {
        let geometry = level.instantiate();
        let progress = CheckpointProgress::new(&level);
        let mut state = Self {
            platforms: geometry.platforms,
            hazards: geometry.hazards,
            checkpoints: geometry.checkpoints,
            goal: geometry.goal,
            player: Player::spawn(level.start.x, level.start.y),
            camera: Camera::default(),
            progress,
            frame_count: 0,
            phase: GamePhase::Playing,
            paused: false,
            zone: String::new(),
            rng: Pcg32::seed_from_u64(level.seed),
            level,
            tuning,
        };
        state.hard_reset();
        state
    }

    /// Switch to another level, keeping tuning
    pub fn load_level(&mut self, level: Arc<Level>) -> GameEvent {
        log::info!("Loading level {} ({})", level.id, level.name);
        self.level = level;
        self.hard_reset()
    }

    /// Restart from scratch: progress cleared, player at the level start, camera at 0.
    /// Returns the zone change back to the start zone for the host.
    pub fn hard_reset(&mut self) -> GameEvent {
        self.progress = CheckpointProgress::new(&self.level);
        self.camera.reset();
        self.paused = false;
        self.zone = START_ZONE.to_string();
        let start = self.level.start;
        self.respawn_at(start.x, start.y);
        log::info!("Level {} hard reset", self.level.id);
        GameEvent::ZoneChanged {
            label: START_ZONE.to_string(),
        }
    }

    /// Respawn at the last checkpoint, keeping checkpoint progress
    pub fn soft_reset(&mut self) {
        let respawn = self.progress.respawn;
        self.respawn_at(respawn.x, respawn.y);
        self.camera.snap(self.player.x, &self.tuning);
        log::info!(
            "Level {} soft reset at ({}, {}), {} checkpoint(s) kept",
            self.level.id,
            respawn.x,
            respawn.y,
            self.progress.len()
        );
    }

    fn respawn_at(&mut self, x: f32, y: f32) {
        let geometry = self.level.instantiate();
        self.platforms = geometry.platforms;
        self.hazards = geometry.hazards;
        self.checkpoints = geometry.checkpoints;
        self.goal = geometry.goal;
        self.progress.apply(&mut self.checkpoints);

        self.player = Player::spawn(x, y);
        self.frame_count = 0;
        self.phase = GamePhase::Playing;
        self.rng = Pcg32::seed_from_u64(self.level.seed);
    }

    /// End the current life
    pub fn kill(&mut self, cause: DeathCause) -> GameEvent {
        self.player.dead = true;
        log::debug!("Player died at ({}, {}): {:?}", self.player.x, self.player.y, cause);
        GameEvent::PlayerDied { cause }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::LevelComplete
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player,
            platforms: &self.platforms,
            hazards: &self.hazards,
            goal: self.goal,
            checkpoints: &self.checkpoints,
            camera: self.camera,
            frame_count: self.frame_count,
            zone: &self.zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn level() -> Arc<Level> {
        let hazard = Entity::hazard("wall", -100.0, 0.0, 100.0, 450.0);
        Arc::new(
            Level::new(3, "STATE", Vec2::new(50.0, 300.0), Rect::new(900.0, 300.0, 40.0, 60.0))
                .with_platforms(vec![Entity::platform("floor", 0.0, 380.0, 1000.0, 70.0)])
                .with_hazards(vec![hazard])
                .with_checkpoint(Checkpoint::new(
                    "cp1",
                    Rect::new(500.0, 340.0, 20.0, 40.0),
                    Vec2::new(510.0, 330.0),
                )),
        )
    }

    #[test]
    fn test_new_state_spawns_at_start() {
        let state = GameState::new(level(), Tuning::default());
        assert_eq!((state.player.x, state.player.y), (50.0, 300.0));
        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.zone, "ZONE_START");
        assert!(state.checkpoints[0].activated);
        assert!(!state.checkpoints[1].activated);
    }

    #[test]
    fn test_soft_reset_restores_geometry_and_latches() {
        let mut state = GameState::new(level(), Tuning::default());
        state.platforms[0].rect.y = 999.0;
        state.hazards[0].moving = true;
        state.hazards.push(Entity::hazard("proj_40", 0.0, 0.0, 12.0, 12.0));
        state.goal.x = 0.0;
        state.frame_count = 500;
        state.player.dead = true;

        state.soft_reset();
        assert_eq!(state.platforms[0].rect.y, 380.0);
        assert!(!state.hazards[0].moving);
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.goal.x, 900.0);
        assert_eq!(state.frame_count, 0);
        assert!(!state.player.dead);
    }

    #[test]
    fn test_soft_reset_keeps_progress_hard_reset_clears_it() {
        let mut state = GameState::new(level(), Tuning::default());
        let player = Rect::new(500.0, 350.0, 30.0, 30.0);
        state.progress.check(&player, &mut state.checkpoints);

        state.soft_reset();
        assert_eq!((state.player.x, state.player.y), (510.0, 330.0));
        assert!(state.checkpoints[1].activated);
        // 510 - 800 * 0.3
        assert!((state.camera.x - 270.0).abs() < 1e-3);

        state.hard_reset();
        assert_eq!((state.player.x, state.player.y), (50.0, 300.0));
        assert!(!state.checkpoints[1].activated);
        assert_eq!(state.progress.activated().collect::<Vec<_>>(), vec![START_CHECKPOINT_ID]);
        assert_eq!(state.camera.x, 0.0);
    }

    #[test]
    fn test_hard_reset_unpauses_and_reports_start_zone() {
        let mut state = GameState::new(level(), Tuning::default());
        state.paused = true;
        state.zone = "ZONE_CP1".to_string();

        let event = state.hard_reset();
        assert!(!state.paused);
        assert_eq!(state.zone, START_ZONE);
        assert_eq!(
            event,
            GameEvent::ZoneChanged {
                label: START_ZONE.to_string()
            }
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(level(), Tuning::default());
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"frame_count\":0"));
        assert!(json.contains("\"floor\""));
    }
}
