//! Level 1: SYSTEM_INIT
//!
//! Introduces every trick once: a collapsing bridge with a patrol, projectiles
//! from the pit, a blinking and a swinging platform, and a flickering laser.

use glam::Vec2;

use crate::sim::script::{ProjectileSpawner, ScriptContext, blink, oscillate, patrol_x};
use crate::sim::{Checkpoint, Entity, Level, LevelScript, Rect};

const PIT_SHOTS: ProjectileSpawner = ProjectileSpawner {
    prefix: "proj_",
    period: 40,
    size: 12.0,
    velocity: (0.0, -6.0),
    bounds: Rect::new(-10_000.0, -50.0, 100_000.0, 10_000.0),
};

pub fn level() -> Level {
    Level::new(1, "SYSTEM_INIT", Vec2::new(50.0, 300.0), Rect::new(3150.0, 200.0, 40.0, 60.0))
        .with_checkpoint(Checkpoint::new(
            "mid_cp",
            Rect::new(800.0, 250.0, 20.0, 40.0),
            Vec2::new(810.0, 250.0),
        ))
        .with_checkpoint(Checkpoint::new(
            "high_cp",
            Rect::new(2350.0, 200.0, 20.0, 40.0),
            Vec2::new(2360.0, 200.0),
        ))
        .with_platforms(vec![
            // Intro
            Entity::platform("floor1", 0.0, 380.0, 300.0, 70.0),
            Entity::platform("step1", 350.0, 320.0, 100.0, 20.0),
            Entity::platform("step2", 500.0, 280.0, 100.0, 20.0),
            // Crumbling bridge
            Entity::platform("cp1_plat", 750.0, 300.0, 150.0, 20.0),
            Entity::platform("helper_block", 940.0, 240.0, 40.0, 40.0),
            Entity::platform("safety_block", 1040.0, 220.0, 80.0, 20.0),
            Entity::platform("safety_block_2", 1200.0, 220.0, 80.0, 20.0),
            Entity::platform("safety_block_3", 1360.0, 220.0, 80.0, 20.0),
            Entity::platform("troll_bridge", 1000.0, 300.0, 400.0, 20.0),
            // Glitch run
            Entity::platform("exp_p1", 1520.0, 220.0, 60.0, 20.0),
            Entity::platform("exp_p2_blink", 1680.0, 250.0, 60.0, 20.0),
            Entity::platform("exp_p3", 1840.0, 200.0, 60.0, 20.0),
            Entity::platform("exp_p4_move", 2000.0, 250.0, 80.0, 20.0),
            Entity::platform("exp_p5", 2200.0, 220.0, 60.0, 20.0),
            // Ascent
            Entity::platform("ascend1", 2350.0, 250.0, 100.0, 20.0),
            Entity::platform("ascend2", 2600.0, 200.0, 80.0, 20.0),
            Entity::platform("ascend3", 2800.0, 150.0, 80.0, 20.0),
            // Final stretch
            Entity::platform("final_plat", 3000.0, 260.0, 300.0, 50.0),
            Entity::platform("fake_block", 2900.0, 260.0, 50.0, 20.0),
        ])
        .with_hazards(vec![
            Entity::hazard("pit_spike1", 300.0, 440.0, 450.0, 10.0),
            Entity::hazard("bridge_spike", 1000.0, 400.0, 1300.0, 50.0),
            Entity::hazard("patrol1", 1000.0, 270.0, 20.0, 20.0).with_velocity(Some(3.0), None),
            Entity::hazard("laser_wall", 2750.0, 100.0, 10.0, 200.0),
        ])
        .with_script(SystemInit)
}

pub struct SystemInit;

impl LevelScript for SystemInit {
    fn update(&self, ctx: &mut ScriptContext<'_>) -> Option<Rect> {
        let px = ctx.player.x;
        let frame = ctx.frame;

        // Projectiles fly up out of the pit while the player crosses it
        PIT_SHOTS.advance(ctx.hazards);
        if px > 1000.0 && px < 2300.0 && PIT_SHOTS.due(frame) {
            let x = px + ProjectileSpawner::jitter(ctx.rng, 30.0);
            PIT_SHOTS.spawn(frame, (x, 400.0), ctx.hazards);
        }

        if let Some(p) = ctx.platform_mut("exp_p2_blink") {
            p.visible = blink(frame, 120, 60);
        }
        if let Some(p) = ctx.platform_mut("exp_p4_move") {
            p.rect.x = oscillate(2000.0, 80.0, frame, 0.05);
        }

        // Bridge sinks under the player and the patrol speeds up
        let on_bridge = px > 1000.0 && px < 1400.0;
        if on_bridge {
            if let Some(bridge) = ctx.platform_mut("troll_bridge") {
                bridge.rect.y += 1.5;
            }
        }
        if let Some(patrol) = ctx.hazard_mut("patrol1") {
            if on_bridge {
                patrol.vx = Some(5.0);
            }
            patrol_x(patrol, 3.0, 1000.0, 1380.0);
        }

        if let Some(laser) = ctx.hazard_mut("laser_wall") {
            laser.visible = if px > 2700.0 && px < 2800.0 {
                blink(frame, 24, 12)
            } else {
                true
            };
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sim::{GameState, TickInput, tick};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Arc::new(level()), Tuning::default())
    }

    #[test]
    fn test_projectiles_spawn_only_over_pit() {
        let mut s = state();
        tick(&mut s, &TickInput::default());
        assert!(!s.hazards.iter().any(|h| h.id.starts_with("proj_")));

        let mut s = state();
        s.player.x = 1100.0;
        s.player.y = 100.0;
        tick(&mut s, &TickInput::default());
        let shots: Vec<_> = s.hazards.iter().filter(|h| h.id.starts_with("proj_")).collect();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].id, "proj_0");
        assert!((shots[0].rect.x - 1100.0).abs() <= 30.0);
    }

    #[test]
    fn test_projectile_jitter_replays_after_reset() {
        let spawn_x = |s: &mut GameState| {
            s.player.x = 1100.0;
            s.player.y = 100.0;
            tick(s, &TickInput::default());
            s.hazards
                .iter()
                .find(|h| h.id == "proj_0")
                .map(|h| h.rect.x)
                .unwrap()
        };
        let mut s = state();
        let first = spawn_x(&mut s);
        s.soft_reset();
        assert_eq!(spawn_x(&mut s), first);
    }

    #[test]
    fn test_bridge_sinks_only_under_player() {
        let mut s = state();
        tick(&mut s, &TickInput::default());
        let bridge = s.platforms.iter().find(|p| p.id == "troll_bridge").unwrap();
        assert_eq!(bridge.rect.y, 300.0);

        s.player.x = 1200.0;
        s.player.y = 100.0;
        tick(&mut s, &TickInput::default());
        let bridge = s.platforms.iter().find(|p| p.id == "troll_bridge").unwrap();
        assert_eq!(bridge.rect.y, 301.5);
    }
}
