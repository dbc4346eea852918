//! Level 2: FIREWALL_BREACH
//!
//! Timed lasers, a rolling three-laser grid, two swinging platforms, and a goal
//! that dodges right when approached from the left.

use glam::Vec2;

use crate::consts::C_LASER;
use crate::sim::script::{ScriptContext, blink, oscillate, phase_window, relocate_goal};
use crate::sim::{Checkpoint, Entity, Level, LevelScript, Rect};

const GOAL_HOME_X: f32 = 2850.0;
const GOAL_DODGE_X: f32 = 2950.0;

pub fn level() -> Level {
    Level::new(2, "FIREWALL_BREACH", Vec2::new(50.0, 350.0), Rect::new(GOAL_HOME_X, 160.0, 40.0, 60.0))
        .with_checkpoint(Checkpoint::new(
            "cp_grid",
            Rect::new(750.0, 250.0, 20.0, 40.0),
            Vec2::new(760.0, 250.0),
        ))
        .with_checkpoint(Checkpoint::new(
            "cp_stream",
            Rect::new(1600.0, 250.0, 20.0, 40.0),
            Vec2::new(1610.0, 250.0),
        ))
        .with_checkpoint(Checkpoint::new(
            "cp_firewall",
            Rect::new(2350.0, 300.0, 20.0, 40.0),
            Vec2::new(2360.0, 300.0),
        ))
        .with_platforms(vec![
            Entity::platform("p1", 0.0, 400.0, 300.0, 50.0),
            Entity::platform("p2", 350.0, 320.0, 100.0, 20.0),
            Entity::platform("p3", 500.0, 280.0, 200.0, 20.0),
            // Laser grid
            Entity::platform("cp1_plat", 750.0, 300.0, 100.0, 20.0),
            Entity::platform("grid_floor", 900.0, 300.0, 600.0, 20.0),
            Entity::platform("grid_step", 1520.0, 270.0, 60.0, 20.0),
            // Data stream
            Entity::platform("cp2_plat", 1600.0, 300.0, 100.0, 20.0),
            Entity::platform("move_plat_1", 1750.0, 280.0, 80.0, 20.0),
            Entity::platform("move_plat_2", 2000.0, 250.0, 80.0, 20.0),
            Entity::platform("cp3_plat", 2300.0, 350.0, 220.0, 20.0),
            // Firewall climb
            Entity::platform("climb_2", 2650.0, 260.0, 60.0, 20.0),
            Entity::platform("climb_3", 2550.0, 150.0, 60.0, 20.0),
            Entity::platform("final_plat", 2750.0, 220.0, 250.0, 20.0),
        ])
        .with_hazards(vec![
            Entity::hazard("laser_intro", 420.0, 200.0, 10.0, 120.0).with_color(C_LASER),
            Entity::hazard("grid_l1", 1000.0, 220.0, 15.0, 80.0).with_color(C_LASER),
            Entity::hazard("grid_l2", 1200.0, 220.0, 15.0, 80.0).with_color(C_LASER),
            Entity::hazard("grid_l3", 1400.0, 220.0, 15.0, 80.0).with_color(C_LASER),
            Entity::hazard("pit_death", 1700.0, 440.0, 600.0, 10.0),
            Entity::hazard("mine_1", 1880.0, 200.0, 20.0, 20.0),
            Entity::hazard("mine_2", 2150.0, 180.0, 20.0, 20.0),
            Entity::hazard("firewall_beam", 2600.0, 50.0, 20.0, 250.0).with_color(C_LASER),
        ])
        .with_script(FirewallBreach)
}

pub struct FirewallBreach;

impl LevelScript for FirewallBreach {
    fn update(&self, ctx: &mut ScriptContext<'_>) -> Option<Rect> {
        let frame = ctx.frame;

        if let Some(l) = ctx.hazard_mut("laser_intro") {
            l.visible = blink(frame, 120, 60);
        }

        // Each grid laser takes a 60-tick break in turn
        for (id, start) in [("grid_l1", 0), ("grid_l2", 60), ("grid_l3", 120)] {
            if let Some(l) = ctx.hazard_mut(id) {
                l.visible = !phase_window(frame, 180, start, start + 60);
            }
        }

        if let Some(p) = ctx.platform_mut("move_plat_1") {
            p.rect.x = oscillate(1800.0, 100.0, frame, 0.03);
        }
        if let Some(p) = ctx.platform_mut("move_plat_2") {
            p.rect.x = oscillate(2075.0, 125.0, frame, 0.04);
        }

        // On for 180 ticks, off for 60
        if let Some(beam) = ctx.hazard_mut("firewall_beam") {
            beam.visible = blink(frame, 240, 180);
        }

        let player = ctx.player;
        if player.x > 2750.0 && player.x < 2900.0 && player.y < 250.0 {
            if let Some(goal) = relocate_goal(ctx.goal, player.x > 2800.0, GOAL_HOME_X, GOAL_DODGE_X) {
                return Some(goal);
            }
        }
        // Falling off the final platform puts the goal back
        if player.y > 400.0 {
            return Some(Rect {
                x: GOAL_HOME_X,
                ..ctx.goal
            });
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

    fn visible(s: &GameState, id: &str) -> bool {
        s.hazards.iter().any(|h| h.id == id && h.visible)
    }

    #[test]
    fn test_grid_lasers_rotate() {
        let mut s = state();
        // The player idles on the first platform, away from every laser
        for frame in 0..180u64 {
            tick(&mut s, &TickInput::default());
            let cycle = frame % 180;
            assert_eq!(visible(&s, "grid_l1"), cycle >= 60, "frame {frame}");
            assert_eq!(visible(&s, "grid_l2"), !(60..120).contains(&cycle), "frame {frame}");
            assert_eq!(visible(&s, "grid_l3"), cycle < 120, "frame {frame}");
        }
    }

    #[test]
    fn test_goal_dodges_then_returns() {
        let mut s = state();
        s.player.x = 2810.0;
        s.player.y = 190.0;
        tick(&mut s, &TickInput::default());
        assert_eq!(s.goal.x, GOAL_DODGE_X);
        assert!(!s.is_complete());

        s.player.y = 420.0;
        tick(&mut s, &TickInput::default());
        assert_eq!(s.goal.x, GOAL_HOME_X);
    }
}
