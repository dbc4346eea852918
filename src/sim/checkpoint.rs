//! Checkpoint progress and respawn point
//!
//! Progress outlives the level instance: a soft reset throws the geometry away
//! but keeps this, then re-applies it to the fresh copy. Only a hard reset
//! starts it over.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{Checkpoint, Level};
use super::rect::{Rect, intersects};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointProgress {
    /// Activated ids (ordered for deterministic iteration)
    activated: BTreeSet<String>,
    /// Where the next life starts
    pub respawn: Vec2,
}

impl CheckpointProgress {
    /// Fresh progress for a level: only its pre-activated checkpoints, respawn at start
    pub fn new(level: &Level) -> Self {
        Self {
            activated: level.preactivated().map(str::to_string).collect(),
            respawn: level.start,
        }
    }

    pub fn is_activated(&self, id: &str) -> bool {
        self.activated.contains(id)
    }

    pub fn activated(&self) -> impl Iterator<Item = &str> {
        self.activated.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.activated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activated.is_empty()
    }

    /// Copy prior activations onto a fresh instance's checkpoints
    pub fn apply(&self, checkpoints: &mut [Checkpoint]) {
        for cp in checkpoints.iter_mut() {
            if self.activated.contains(&cp.id) {
                cp.activated = true;
            }
        }
    }

    /// Activate every inactive checkpoint the player overlaps.
    ///
    /// Returns the ids activated this call, in checkpoint order. The respawn
    /// point follows the last one.
    pub fn check(&mut self, player: &Rect, checkpoints: &mut [Checkpoint]) -> Vec<String> {
        let mut fired = Vec::new();
        for cp in checkpoints.iter_mut() {
            if cp.activated || !intersects(player, &cp.rect) {
                continue;
            }
            cp.activated = true;
            self.activated.insert(cp.id.clone());
            self.respawn = cp.respawn;
            log::debug!("Checkpoint {} activated, respawn at {}", cp.id, cp.respawn);
            fired.push(cp.id.clone());
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_CHECKPOINT_ID;

    fn level() -> Level {
        Level::new(1, "CP", Vec2::new(50.0, 300.0), Rect::new(900.0, 300.0, 40.0, 60.0))
            .with_checkpoint(Checkpoint::new(
                "mid_cp",
                Rect::new(400.0, 300.0, 20.0, 40.0),
                Vec2::new(410.0, 290.0),
            ))
            .with_checkpoint(Checkpoint::new(
                "late_cp",
                Rect::new(700.0, 300.0, 20.0, 40.0),
                Vec2::new(710.0, 290.0),
            ))
    }

    #[test]
    fn test_new_progress_has_only_start() {
        let progress = CheckpointProgress::new(&level());
        assert_eq!(progress.activated().collect::<Vec<_>>(), vec![START_CHECKPOINT_ID]);
        assert_eq!(progress.respawn, Vec2::new(50.0, 300.0));
    }

    #[test]
    fn test_check_activates_once_and_moves_respawn() {
        let level = level();
        let mut progress = CheckpointProgress::new(&level);
        let mut geo = level.instantiate();
        let player = Rect::new(395.0, 310.0, 30.0, 30.0);

        let fired = progress.check(&player, &mut geo.checkpoints);
        assert_eq!(fired, vec!["mid_cp".to_string()]);
        assert_eq!(progress.respawn, Vec2::new(410.0, 290.0));
        assert!(geo.checkpoints[1].activated);

        // Still overlapping: no second activation
        assert!(progress.check(&player, &mut geo.checkpoints).is_empty());
    }

    #[test]
    fn test_apply_restores_flags_on_fresh_copy() {
        let level = level();
        let mut progress = CheckpointProgress::new(&level);
        let mut geo = level.instantiate();
        progress.check(&Rect::new(700.0, 310.0, 30.0, 30.0), &mut geo.checkpoints);

        let mut fresh = level.instantiate();
        assert!(!fresh.checkpoints[2].activated);
        progress.apply(&mut fresh.checkpoints);
        assert!(fresh.checkpoints[0].activated);
        assert!(!fresh.checkpoints[1].activated);
        assert!(fresh.checkpoints[2].activated);
    }
}
