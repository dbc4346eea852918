//! Collision detection and response for axis-aligned geometry
//!
//! Resolution is axis-separated: the caller moves the player horizontally and
//! resolves that axis completely, then moves vertically and resolves again on
//! the already-corrected position. Platforms are visited in array order and
//! each overlapping one is handled independently; once a correction zeroes the
//! velocity on an axis, later overlaps on that axis are left alone.

use super::level::Entity;
use super::rect::{Rect, intersects};
use super::state::Player;

/// Whether a platform blocks the player this tick
#[inline]
pub fn is_solid(platform: &Entity) -> bool {
    platform.visible || platform.always_solid
}

/// Push the player out of solid platforms along x, based on the direction of `vx`
pub fn resolve_horizontal(player: &mut Player, platforms: &[Entity]) {
    for plat in platforms.iter().filter(|p| is_solid(p)) {
        if !intersects(&player.rect(), &plat.rect) {
            continue;
        }
        if player.vx > 0.0 {
            player.x = plat.rect.x - player.w;
            player.vx = 0.0;
        } else if player.vx < 0.0 {
            player.x = plat.rect.right();
            player.vx = 0.0;
        }
    }
}

/// Push the player out of solid platforms along y. Landing sets `grounded`.
pub fn resolve_vertical(player: &mut Player, platforms: &[Entity]) {
    for plat in platforms.iter().filter(|p| is_solid(p)) {
        if !intersects(&player.rect(), &plat.rect) {
            continue;
        }
        if player.vy > 0.0 {
            player.y = plat.rect.y - player.h;
            player.vy = 0.0;
            player.grounded = true;
        } else if player.vy < 0.0 {
            player.y = plat.rect.bottom();
            player.vy = 0.0;
        }
    }
}

/// Hitbox used for lethal contact: the hazard shrunk by `inset` on each side
#[inline]
pub fn hazard_hitbox(hazard: &Entity, inset: f32) -> Rect {
    hazard.rect.inset(inset)
}

/// First visible hazard whose shrunken hitbox overlaps the player
pub fn hazard_contact<'a>(player: &Rect, hazards: &'a [Entity], inset: f32) -> Option<&'a Entity> {
    hazards
        .iter()
        .find(|h| h.visible && intersects(player, &hazard_hitbox(h, inset)))
}

/// Goal contact uses full rects, no inset
#[inline]
pub fn goal_contact(player: &Rect, goal: &Rect) -> bool {
    intersects(player, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Entity;
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32, vx: f32, vy: f32) -> Player {
        let mut p = Player::spawn(x, y);
        p.vx = vx;
        p.vy = vy;
        p
    }

    #[test]
    fn test_moving_right_stops_at_left_edge() {
        let wall = [Entity::platform("wall", 100.0, 0.0, 20.0, 200.0)];
        let mut p = player_at(75.0, 50.0, 5.0, 0.0);
        resolve_horizontal(&mut p, &wall);
        assert_eq!(p.x, 70.0);
        assert_eq!(p.vx, 0.0);
    }

    #[test]
    fn test_moving_left_stops_at_right_edge() {
        let wall = [Entity::platform("wall", 100.0, 0.0, 20.0, 200.0)];
        let mut p = player_at(115.0, 50.0, -5.0, 0.0);
        resolve_horizontal(&mut p, &wall);
        assert_eq!(p.x, 120.0);
        assert_eq!(p.vx, 0.0);
    }

    #[test]
    fn test_landing_sets_grounded() {
        let floor = [Entity::platform("floor", 0.0, 380.0, 300.0, 70.0)];
        let mut p = player_at(50.0, 352.0, 0.0, 3.0);
        resolve_vertical(&mut p, &floor);
        assert_eq!(p.y, 350.0);
        assert_eq!(p.vy, 0.0);
        assert!(p.grounded);
    }

    #[test]
    fn test_head_bump_does_not_ground() {
        let ceiling = [Entity::platform("ceiling", 0.0, 100.0, 300.0, 20.0)];
        let mut p = player_at(50.0, 115.0, 0.0, -8.0);
        resolve_vertical(&mut p, &ceiling);
        assert_eq!(p.y, 120.0);
        assert_eq!(p.vy, 0.0);
        assert!(!p.grounded);
    }

    #[test]
    fn test_invisible_platform_is_not_solid() {
        let mut plat = Entity::platform("blink", 0.0, 380.0, 300.0, 70.0);
        plat.visible = false;
        let mut p = player_at(50.0, 352.0, 0.0, 3.0);
        resolve_vertical(&mut p, std::slice::from_ref(&plat));
        assert_eq!(p.y, 352.0);
        assert!(!p.grounded);

        plat.always_solid = true;
        resolve_vertical(&mut p, std::slice::from_ref(&plat));
        assert_eq!(p.y, 350.0);
        assert!(p.grounded);
    }

    #[test]
    fn test_first_platform_in_order_wins() {
        // Both overlap; the first correction zeroes vy so the second is skipped
        let plats = [
            Entity::platform("a", 0.0, 390.0, 100.0, 20.0),
            Entity::platform("b", 0.0, 375.0, 100.0, 20.0),
        ];
        let mut p = player_at(10.0, 362.0, 0.0, 5.0);
        resolve_vertical(&mut p, &plats);
        assert_eq!(p.y, 360.0);

        let reversed = [plats[1].clone(), plats[0].clone()];
        let mut p = player_at(10.0, 362.0, 0.0, 5.0);
        resolve_vertical(&mut p, &reversed);
        assert_eq!(p.y, 345.0);
    }

    #[test]
    fn test_axis_separation_corner_case() {
        // Player moving diagonally down-right into the top-left corner of a block.
        // Horizontal resolution runs first on the pre-vertical position: at that
        // point the player is above the block, so x is not corrected. Then the
        // vertical move lands it on top.
        let block = [Entity::platform("block", 100.0, 100.0, 100.0, 100.0)];
        let mut p = player_at(68.0, 66.0, 6.0, 6.0);

        p.x += p.vx;
        resolve_horizontal(&mut p, &block);
        assert_eq!(p.x, 74.0);
        assert_eq!(p.vx, 6.0);

        p.y += p.vy;
        resolve_vertical(&mut p, &block);
        assert_eq!(p.y, 70.0);
        assert!(p.grounded);
        assert_eq!(p.x, 74.0);
    }

    #[test]
    fn test_axis_separation_side_hit_first() {
        // Same corner, but already overlapping vertically: the side push wins and
        // the vertical step then falls freely beside the block.
        let block = [Entity::platform("block", 100.0, 100.0, 100.0, 100.0)];
        let mut p = player_at(68.0, 80.0, 6.0, 6.0);

        p.x += p.vx;
        resolve_horizontal(&mut p, &block);
        assert_eq!(p.x, 70.0);
        assert_eq!(p.vx, 0.0);

        p.y += p.vy;
        resolve_vertical(&mut p, &block);
        assert_eq!(p.y, 86.0);
        assert!(!p.grounded);
    }

    #[test]
    fn test_hazard_hitbox_inset() {
        let spike = Entity::hazard("spike", 100.0, 100.0, 40.0, 40.0);
        // Grazing the outer 6 units does not kill
        let graze = Rect::new(71.0, 100.0, 30.0, 30.0);
        assert!(hazard_contact(&graze, std::slice::from_ref(&spike), 6.0).is_none());
        let hit = Rect::new(77.0, 100.0, 30.0, 30.0);
        assert_eq!(
            hazard_contact(&hit, std::slice::from_ref(&spike), 6.0).map(|h| h.id.as_str()),
            Some("spike")
        );
    }

    #[test]
    fn test_invisible_hazard_is_harmless() {
        let mut laser = Entity::hazard("laser", 100.0, 100.0, 40.0, 40.0);
        laser.visible = false;
        let overlap = Rect::new(105.0, 105.0, 30.0, 30.0);
        assert!(hazard_contact(&overlap, std::slice::from_ref(&laser), 6.0).is_none());
    }

    #[test]
    fn test_goal_uses_full_rect() {
        let goal = Rect::new(100.0, 100.0, 40.0, 60.0);
        assert!(goal_contact(&Rect::new(71.0, 100.0, 30.0, 30.0), &goal));
        assert!(!goal_contact(&Rect::new(70.0, 100.0, 30.0, 30.0), &goal));
    }

    proptest! {
        #[test]
        fn horizontal_push_leaves_no_overlap_with_single_wall(
            start in 0.0f32..60.0,
            vx in 0.5f32..8.0,
        ) {
            let wall = [Entity::platform("wall", 100.0, 0.0, 20.0, 200.0)];
            let mut p = player_at(start + 40.0, 50.0, vx, 0.0);
            p.x += p.vx;
            resolve_horizontal(&mut p, &wall);
            prop_assert!(!intersects(&p.rect(), &wall[0].rect));
        }
    }
}
