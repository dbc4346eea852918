//! Level 5: KERNEL_PANIC
//!
//! A death wall chases the player from the left as soon as they move. The tall
//! middle obstacle drifts toward them once they commit.

use glam::Vec2;

use crate::sim::script::{ScriptContext, latch};
use crate::sim::{Checkpoint, Entity, Level, LevelScript, Rect};

const WALL_SPEED: f32 = 3.5;

pub fn level() -> Level {
    Level::new(5, "KERNEL_PANIC", Vec2::new(50.0, 200.0), Rect::new(750.0, 200.0, 30.0, 200.0))
        .with_checkpoint(Checkpoint::new(
            "cp1",
            Rect::new(505.0, 260.0, 20.0, 40.0),
            Vec2::new(515.0, 250.0),
        ))
        .with_platforms(vec![
            Entity::platform("floor", 0.0, 400.0, 2000.0, 50.0),
            Entity::platform("o1", 300.0, 350.0, 30.0, 50.0),
            Entity::platform("o2", 500.0, 300.0, 30.0, 100.0),
            Entity::platform("o3", 700.0, 350.0, 30.0, 50.0),
        ])
        .with_hazards(vec![
            Entity::hazard("wall_death", -100.0, 0.0, 100.0, 450.0),
            Entity::hazard("mine1", 400.0, 250.0, 20.0, 20.0),
            Entity::hazard("mine2", 600.0, 150.0, 20.0, 20.0),
        ])
        .with_script(KernelPanic)
}

pub struct KernelPanic;

impl LevelScript for KernelPanic {
    fn update(&self, ctx: &mut ScriptContext<'_>) -> Option<Rect> {
        let player = ctx.player;

        if let Some(wall) = ctx.hazard_mut("wall_death") {
            if latch(wall, player.x > 60.0) {
                wall.rect.x += WALL_SPEED;
            }
        }

        if player.x > 400.0 {
            if let Some(o2) = ctx.platform_mut("o2") {
                o2.rect.x -= 2.0;
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sim::{DeathCause, GameEvent, GameState, TickInput, tick};
    use crate::tuning::Tuning;

    fn wall_x(s: &GameState) -> f32 {
        s.hazards.iter().find(|h| h.id == "wall_death").map(|h| h.rect.x).unwrap()
    }

    #[test]
    fn test_wall_waits_then_keeps_chasing() {
        let mut s = GameState::new(Arc::new(level()), Tuning::default());
        for _ in 0..30 {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(wall_x(&s), -100.0);

        s.player.x = 80.0;
        tick(&mut s, &TickInput::default());
        assert_eq!(wall_x(&s), -96.5);

        // Stepping back behind the trigger does not stop the wall
        s.player.x = 50.0;
        tick(&mut s, &TickInput::default());
        assert_eq!(wall_x(&s), -93.0);
    }

    #[test]
    fn test_idle_player_is_caught() {
        let mut s = GameState::new(Arc::new(level()), Tuning::default());
        s.player.x = 70.0;
        let mut events = Vec::new();
        for _ in 0..200 {
            events.extend(tick(&mut s, &TickInput::default()));
            if s.player.dead {
                break;
            }
        }
        assert!(s.player.dead);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::PlayerDied { cause: DeathCause::Hazard { id } } if id == "wall_death"
        )));
    }

    #[test]
    fn test_latch_resets_with_the_level() {
        let mut s = GameState::new(Arc::new(level()), Tuning::default());
        s.player.x = 80.0;
        tick(&mut s, &TickInput::default());
        assert!(wall_x(&s) > -100.0);
        s.hard_reset();
        tick(&mut s, &TickInput::default());
        assert_eq!(wall_x(&s), -100.0);
    }
}
