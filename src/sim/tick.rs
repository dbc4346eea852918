//! Fixed timestep simulation tick
//!
//! Core game loop that advances one attempt deterministically. One call is one
//! logical tick; the host calls it once per display frame.

use super::collision::{goal_contact, hazard_contact, resolve_horizontal, resolve_vertical};
use super::script::ScriptContext;
use super::state::{DeathCause, GameEvent, GamePhase, GameState};

/// Movement input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the game state by one tick. Returns the events raised during it.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Pause, death and completion all freeze the core
    if state.paused || state.player.dead || state.phase == GamePhase::LevelComplete {
        return events;
    }

    run_script(state);
    state.frame_count += 1;

    // Checkpoints
    let player_rect = state.player.rect();
    for id in state.progress.check(&player_rect, &mut state.checkpoints) {
        let label = crate::zone_label(&id);
        state.zone = label.clone();
        events.push(GameEvent::CheckpointActivated { id });
        events.push(GameEvent::ZoneChanged { label });
    }

    // Physics and collision
    if let Some(cause) = step_player(state, input) {
        events.push(state.kill(cause));
        return events;
    }

    // Hazards
    let player_rect = state.player.rect();
    let hit = hazard_contact(&player_rect, &state.hazards, state.tuning.hazard_inset)
        .map(|hazard| hazard.id.clone());
    if let Some(id) = hit {
        events.push(state.kill(DeathCause::Hazard { id }));
        return events;
    }

    // Goal
    if goal_contact(&player_rect, &state.goal) {
        state.phase = GamePhase::LevelComplete;
        log::info!("Level {} complete after {} ticks", state.level.id, state.frame_count);
        events.push(GameEvent::LevelComplete {
            level_id: state.level.id,
        });
    }

    state.camera.follow(state.player.x, &state.tuning);
    events
}

/// Let the level rewrite its geometry for this tick
fn run_script(state: &mut GameState) {
    let Some(script) = state.level.script.clone() else {
        return;
    };
    let platform_count = state.platforms.len();

    let mut ctx = ScriptContext {
        player: state.player.rect(),
        frame: state.frame_count,
        goal: state.goal,
        platforms: &mut state.platforms,
        hazards: &mut state.hazards,
        rng: &mut state.rng,
    };
    if let Some(goal) = script.update(&mut ctx) {
        debug_assert!(goal.is_finite(), "level script produced a non-finite goal");
        if goal != state.goal {
            log::debug!("Goal moved to ({}, {})", goal.x, goal.y);
        }
        state.goal = goal;
    }

    debug_assert_eq!(
        state.platforms.len(),
        platform_count,
        "level scripts may mutate platforms but never add or remove them"
    );
}

/// Gravity, input, jump, then horizontal and vertical move-and-resolve.
/// Returns a death cause if the player fell out of the world.
fn step_player(state: &mut GameState, input: &TickInput) -> Option<DeathCause> {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.vy = (player.vy + tuning.gravity).min(tuning.max_fall_speed);

    if input.right {
        player.vx = (player.vx + tuning.move_accel).min(tuning.move_speed);
    } else if input.left {
        player.vx = (player.vx - tuning.move_accel).max(-tuning.move_speed);
    } else {
        player.vx *= tuning.friction;
        if player.vx.abs() < tuning.stop_epsilon {
            player.vx = 0.0;
        }
    }

    // Level-triggered: holding jump re-jumps on every grounded tick
    if input.jump && player.grounded {
        player.vy = -tuning.jump_force;
    }

    player.grounded = false;
    player.x += player.vx;
    resolve_horizontal(player, &state.platforms);

    player.y += player.vy;
    if player.y > tuning.viewport_height + tuning.fall_margin {
        return Some(DeathCause::OutOfBounds);
    }
    resolve_vertical(player, &state.platforms);
    None
}
