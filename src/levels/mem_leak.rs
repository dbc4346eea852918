//! Level 4: MEM_LEAK
//!
//! A staircase of memory blocks over lava. The blocks are only allocated for
//! part of a 120-tick cycle and the last one sinks under the player.

use glam::Vec2;

use crate::sim::script::{ScriptContext, blink, phase_window};
use crate::sim::{Checkpoint, Entity, Level, LevelScript, Rect};

const CYCLE: u64 = 120;

pub fn level() -> Level {
    Level::new(4, "MEM_LEAK", Vec2::new(50.0, 350.0), Rect::new(700.0, 150.0, 40.0, 60.0))
        .with_checkpoint(Checkpoint::new(
            "cp1",
            Rect::new(370.0, 260.0, 20.0, 40.0),
            Vec2::new(390.0, 260.0),
        ))
        .with_platforms(vec![
            Entity::platform("start", 0.0, 400.0, 150.0, 50.0),
            Entity::platform("b1", 200.0, 350.0, 80.0, 20.0),
            Entity::platform("b2", 350.0, 300.0, 80.0, 20.0),
            Entity::platform("b3", 500.0, 250.0, 80.0, 20.0),
            Entity::platform("b4", 650.0, 200.0, 150.0, 20.0),
        ])
        .with_hazards(vec![Entity::hazard("floor_lava", 0.0, 440.0, 800.0, 10.0)])
        .with_script(MemLeak)
}

pub struct MemLeak;

impl LevelScript for MemLeak {
    fn update(&self, ctx: &mut ScriptContext<'_>) -> Option<Rect> {
        let frame = ctx.frame;
        let player = ctx.player;

        for id in ["b1", "b2"] {
            if let Some(block) = ctx.platform_mut(id) {
                block.visible = blink(frame, CYCLE, 60);
            }
        }
        if let Some(block) = ctx.platform_mut("b3") {
            block.visible = phase_window(frame, CYCLE, 40, 100);
        }

        // Sinks only while the player stands on top of it
        if let Some(block) = ctx.platform_mut("b4") {
            if player.x > 650.0 && player.bottom() <= block.rect.y + 5.0 {
                block.rect.y += 5.0;
            }
        }

        None
    }
}
