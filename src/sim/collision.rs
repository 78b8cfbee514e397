//! Collision and pickup detection
//!
//! The boat is an ellipse. Each wall is tested by clamping the boat's x onto
//! the wall body and its y onto the wall's open edge, then checking whether
//! that point falls inside the boat ellipse. A boat already inside a wall
//! clamps to itself vertically and only the horizontal term remains.

use glam::Vec2;

use super::state::Obstacle;
use crate::tuning::Tuning;

/// Which walls of an obstacle the boat touches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub top: bool,
    pub bottom: bool,
}

impl WallContact {
    pub fn hit(&self) -> bool {
        self.top || self.bottom
    }
}

/// Squared-distance-over-squared-radius test for an axis-aligned ellipse
#[inline]
pub fn ellipse_contains(offset: Vec2, radii: Vec2) -> bool {
    let n = offset / radii;
    n.length_squared() <= 1.0
}

/// Test the boat against both walls of an obstacle
pub fn wall_contact(player: Vec2, obstacle: &Obstacle, tuning: &Tuning) -> WallContact {
    let body_left = obstacle.x + tuning.body_offset;
    let closest_x = player.x.clamp(body_left, body_left + tuning.body_width);
    let radii = Vec2::new(tuning.hit_radius_x, tuning.hit_radius_y);

    let top_point = Vec2::new(closest_x, player.y.min(obstacle.top));
    let bottom_point = Vec2::new(closest_x, player.y.max(obstacle.bottom_edge()));

    WallContact {
        top: ellipse_contains(player - top_point, radii),
        bottom: ellipse_contains(player - bottom_point, radii),
    }
}

/// Whether the boat is close enough to collect an item
#[inline]
pub fn within_pickup(player: Vec2, anchor: Vec2, radius: f32) -> bool {
    player.distance(anchor) < radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::JITTER_SLOTS;
    use crate::sim::state::{Item, Zone};

    fn obstacle_at(x: f32, top: f32, gap: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            top,
            bottom: 1000.0 - top - gap,
            gap,
            passed: false,
            item: Item::None,
            zone: Zone::OpenSea,
            jitter: [0.0; JITTER_SLOTS],
            rotate: false,
        }
    }

    #[test]
    fn test_ellipse_boundary() {
        let radii = Vec2::new(30.0, 25.0);
        assert!(ellipse_contains(Vec2::new(30.0, 0.0), radii));
        assert!(ellipse_contains(Vec2::new(0.0, -25.0), radii));
        assert!(!ellipse_contains(Vec2::new(30.0, 25.0), radii));
    }

    #[test]
    fn test_gap_center_is_safe() {
        let tuning = Tuning::default();
        // Body spans x = 200..260, gap 300..560
        let obstacle = obstacle_at(170.0, 300.0, 260.0);
        let contact = wall_contact(Vec2::new(200.0, 430.0), &obstacle, &tuning);
        assert!(!contact.hit());
    }

    #[test]
    fn test_inside_top_wall_hits() {
        let tuning = Tuning::default();
        let obstacle = obstacle_at(170.0, 300.0, 260.0);
        let contact = wall_contact(Vec2::new(200.0, 100.0), &obstacle, &tuning);
        assert!(contact.top);
        assert!(!contact.bottom);
    }

    #[test]
    fn test_grazing_edges() {
        let tuning = Tuning::default();
        let obstacle = obstacle_at(170.0, 300.0, 260.0);
        // 20px under the top edge: inside ry = 25
        assert!(wall_contact(Vec2::new(200.0, 320.0), &obstacle, &tuning).top);
        // 30px under: clear
        assert!(!wall_contact(Vec2::new(200.0, 330.0), &obstacle, &tuning).top);
        // 20px above the bottom edge at 560
        assert!(wall_contact(Vec2::new(200.0, 540.0), &obstacle, &tuning).bottom);
    }

    #[test]
    fn test_horizontal_reach() {
        let tuning = Tuning::default();
        // Body spans x = 230..290; boat at 200 inside the top wall band
        let obstacle = obstacle_at(200.0, 300.0, 260.0);
        assert!(wall_contact(Vec2::new(200.0, 100.0), &obstacle, &tuning).top);
        // Body spans x = 260..320; 60px away horizontally
        let obstacle = obstacle_at(230.0, 300.0, 260.0);
        assert!(!wall_contact(Vec2::new(200.0, 100.0), &obstacle, &tuning).hit());
    }

    #[test]
    fn test_pickup_radius() {
        let anchor = Vec2::new(260.0, 430.0);
        assert!(within_pickup(Vec2::new(230.0, 430.0), anchor, 40.0));
        assert!(!within_pickup(Vec2::new(200.0, 430.0), anchor, 40.0));
    }
}
