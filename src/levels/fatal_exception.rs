//! Level 3: FATAL_EXCEPTION
//!
//! Short and mean: rain starts falling once the player moves, the wall before
//! the goal is invisible, and the landing platform slides away.

use glam::Vec2;

use crate::consts::{C_HAZARD, C_INVISIBLE};
use crate::sim::script::ScriptContext;
use crate::sim::{Checkpoint, Entity, Level, LevelScript, Rect};

/// Rain wraps back to the top once it passes the bottom of the screen
const RAIN_FLOOR: f32 = 450.0;
const RAIN_RESTART_Y: f32 = -100.0;
const RAIN_SPEED: f32 = 9.0;

pub fn level() -> Level {
    Level::new(3, "FATAL_EXCEPTION", Vec2::new(50.0, 200.0), Rect::new(700.0, 350.0, 40.0, 60.0))
        .with_checkpoint(Checkpoint::new(
            "cp1",
            Rect::new(350.0, 310.0, 20.0, 40.0),
            Vec2::new(350.0, 300.0),
        ))
        .with_platforms(vec![
            Entity::platform("start", 0.0, 250.0, 150.0, 200.0),
            Entity::platform("middle", 200.0, 350.0, 350.0, 20.0),
            Entity::platform("end", 650.0, 410.0, 150.0, 40.0),
        ])
        .with_hazards(vec![
            Entity::hazard("rain1", 250.0, -50.0, 20.0, 40.0),
            Entity::hazard("rain2", 400.0, -150.0, 20.0, 40.0),
            Entity::hazard("rain3", 450.0, -250.0, 20.0, 40.0),
            Entity::hazard("invis_wall", 600.0, 300.0, 20.0, 110.0).with_color(C_INVISIBLE),
        ])
        .with_script(FatalException)
}

pub struct FatalException;

impl LevelScript for FatalException {
    fn update(&self, ctx: &mut ScriptContext<'_>) -> Option<Rect> {
        let player = ctx.player;

        if player.x > 100.0 {
            for drop in ctx.hazards.iter_mut().filter(|h| h.id.contains("rain")) {
                drop.rect.y += RAIN_SPEED;
                if drop.rect.y > RAIN_FLOOR {
                    drop.rect.y = RAIN_RESTART_Y;
                }
            }
        }

        // The wall gives itself away once touched
        if player.x > 580.0 && player.x < 620.0 && player.y > 300.0 {
            if let Some(wall) = ctx.hazard_mut("invis_wall") {
                wall.color = C_HAZARD;
            }
        }

        if player.x > 500.0 {
            if let Some(end) = ctx.platform_mut("end") {
                end.rect.x += 3.0;
            }
        }

        None
    }
}
