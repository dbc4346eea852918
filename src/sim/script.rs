//! Level scripting contract
//!
//! Each level may carry a script that rewrites its own geometry once per tick,
//! before physics runs. Scripts are stateless strategy objects: anything that
//! must persist between ticks lives on the entities themselves (positions,
//! `visible`, the `moving` latch, velocity hints), so replacing the arrays with
//! fresh template copies on reset also resets the script.
//!
//! The helpers below are the building blocks the authored levels compose:
//! latches, periodic blinking, sinusoidal motion, goal relocation and
//! projectile spawners.

use rand::Rng;
use rand_pcg::Pcg32;

use super::level::Entity;
use super::rect::Rect;

/// Everything a script may look at or change during one tick
pub struct ScriptContext<'a> {
    /// Player hitbox (a copy - scripts cannot move the player)
    pub player: Rect,
    /// Frame counter for this tick (0 on the first live tick after a reset)
    pub frame: u64,
    /// Current goal rect
    pub goal: Rect,
    pub platforms: &'a mut Vec<Entity>,
    pub hazards: &'a mut Vec<Entity>,
    /// Seeded per attempt
    pub rng: &'a mut Pcg32,
}

impl ScriptContext<'_> {
    pub fn platform_mut(&mut self, id: &str) -> Option<&mut Entity> {
        find_mut(self.platforms.as_mut_slice(), id)
    }

    pub fn hazard_mut(&mut self, id: &str) -> Option<&mut Entity> {
        find_mut(self.hazards.as_mut_slice(), id)
    }
}

/// Per-level script. Returns `Some(goal)` to relocate the goal this tick.
pub trait LevelScript: Send + Sync {
    fn update(&self, ctx: &mut ScriptContext<'_>) -> Option<Rect>;
}

impl<F> LevelScript for F
where
    F: Fn(&mut ScriptContext<'_>) -> Option<Rect> + Send + Sync,
{
    fn update(&self, ctx: &mut ScriptContext<'_>) -> Option<Rect> {
        self(ctx)
    }
}

pub fn find_mut<'a>(entities: &'a mut [Entity], id: &str) -> Option<&'a mut Entity> {
    entities.iter_mut().find(|e| e.id == id)
}

/// `frame % period < on_ticks`
#[inline]
pub fn blink(frame: u64, period: u64, on_ticks: u64) -> bool {
    frame % period < on_ticks
}

/// True while `frame % period` lies in `[start, end)`
#[inline]
pub fn phase_window(frame: u64, period: u64, start: u64, end: u64) -> bool {
    let t = frame % period;
    t >= start && t < end
}

/// `center + sin(frame * rate) * amplitude`
#[inline]
pub fn oscillate(center: f32, amplitude: f32, frame: u64, rate: f32) -> f32 {
    center + (frame as f32 * rate).sin() * amplitude
}

/// Arm an entity's one-shot latch once `condition` holds. Returns the latch state.
///
/// The latch never releases within a life; a reset restores the template value.
pub fn latch(entity: &mut Entity, condition: bool) -> bool {
    if !entity.moving && condition {
        entity.moving = true;
    }
    entity.moving
}

/// Bounce an entity's x between `min` and `max` using its `vx` hint
pub fn patrol_x(entity: &mut Entity, default_vx: f32, min: f32, max: f32) {
    let vx = entity.vx.unwrap_or(default_vx);
    entity.rect.x += vx;
    if entity.rect.x > max || entity.rect.x < min {
        entity.vx = Some(-vx);
    }
}

/// Goal shifted to `x` when `trigger` holds and the goal is still at `from_x`
pub fn relocate_goal(goal: Rect, trigger: bool, from_x: f32, to_x: f32) -> Option<Rect> {
    (trigger && goal.x == from_x).then_some(Rect { x: to_x, ..goal })
}

/// Timed projectile source.
///
/// Projectiles are hazards whose id starts with `prefix`. They travel by their
/// velocity hints every tick and are dropped once they leave `bounds`.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileSpawner {
    pub prefix: &'static str,
    /// Spawn on frames where `frame % period == 0`
    pub period: u64,
    pub size: f32,
    pub velocity: (f32, f32),
    /// Projectiles outside this rect are removed
    pub bounds: Rect,
}

impl ProjectileSpawner {
    pub fn is_projectile(&self, hazard: &Entity) -> bool {
        hazard.id.starts_with(self.prefix)
    }

    /// Move live projectiles and drop the ones that left `bounds`
    pub fn advance(&self, hazards: &mut Vec<Entity>) {
        hazards.retain_mut(|h| {
            if !self.is_projectile(h) {
                return true;
            }
            h.rect.x += h.vx.unwrap_or(0.0);
            h.rect.y += h.vy.unwrap_or(0.0);
            super::rect::intersects(&h.rect, &self.bounds)
        });
    }

    /// Whether this frame is on the spawn cadence
    #[inline]
    pub fn due(&self, frame: u64) -> bool {
        frame % self.period == 0
    }

    /// Spawn one projectile at `origin` (top-left) if the cadence allows.
    /// Ids are derived from the frame so they are unique within a life.
    pub fn spawn(&self, frame: u64, origin: (f32, f32), hazards: &mut Vec<Entity>) -> bool {
        if !self.due(frame) {
            return false;
        }
        hazards.push(
            Entity::hazard(
                &format!("{}{}", self.prefix, frame),
                origin.0,
                origin.1,
                self.size,
                self.size,
            )
            .with_velocity(Some(self.velocity.0), Some(self.velocity.1)),
        );
        true
    }

    /// Uniform horizontal jitter in `[-spread, spread)`
    pub fn jitter(rng: &mut Pcg32, spread: f32) -> f32 {
        rng.random_range(-spread..spread)
    }
}
