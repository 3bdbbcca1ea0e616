//! Collision detection and response for balls against boxes
//!
//! Two strategies are available for obstacles:
//! - Continuous: sweep the ball's disc along its path for this tick and find
//!   the time of impact (slab test against the radius-expanded box).
//! - Discrete: check the end position for overlap and push out along the
//!   penetration normal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::consts::CONTACT_EPSILON;

/// Obstacle collision strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionStrategy {
    /// Swept circle vs AABB (no tunneling)
    #[default]
    Continuous,
    /// Circle vs AABB penetration test at the end position
    Discrete,
}

impl CollisionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionStrategy::Continuous => "continuous",
            CollisionStrategy::Discrete => "discrete",
        }
    }
}

/// Time of impact along a swept path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Fraction of the path p0 -> p1 where the disc first touches the box.
    /// Negative when the path starts already overlapping the expanded box;
    /// the normal is then the face the body entered through.
    pub t_entry: f32,
    /// Axis-aligned unit normal of the face that was hit
    pub normal: Vec2,
}

/// Overlap between a ball and a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Direction from the box toward the ball center
    pub normal: Vec2,
    /// How far the ball must move along `normal` to separate
    pub penetration: f32,
}

/// Entry/exit parameters of a moving coordinate against the slab [min, max].
///
/// A stationary coordinate imposes no constraint while inside the slab and
/// rules out any intersection while outside it.
fn slab(start: f32, delta: f32, min: f32, max: f32) -> Option<(f32, f32)> {
    if delta == 0.0 {
        if start < min || start > max {
            return None;
        }
        return Some((f32::NEG_INFINITY, f32::INFINITY));
    }
    if delta > 0.0 {
        Some(((min - start) / delta, (max - start) / delta))
    } else {
        Some(((max - start) / delta, (min - start) / delta))
    }
}

/// Sweep a disc of radius `r` from `p0` to `p1` against `aabb`.
///
/// On an exact tie between the two axis entry times the vertical face wins.
/// A path that only touches the box at its start while moving away
/// (`t_exit <= 0`) is a miss.
pub fn swept_circle_aabb(p0: Vec2, p1: Vec2, r: f32, aabb: &Aabb) -> Option<SweepHit> {
    let expanded = aabb.expanded(r);
    let delta = p1 - p0;

    // A ball that did not move cannot sweep into anything
    if delta == Vec2::ZERO {
        return None;
    }

    let (t_entry_x, t_exit_x) = slab(p0.x, delta.x, expanded.left(), expanded.right())?;
    let (t_entry_y, t_exit_y) = slab(p0.y, delta.y, expanded.top(), expanded.bottom())?;

    let t_entry = t_entry_x.max(t_entry_y);
    let t_exit = t_exit_x.min(t_exit_y);

    if t_entry > t_exit || t_exit <= 0.0 || t_entry > 1.0 {
        return None;
    }

    let normal = if t_entry_x > t_entry_y {
        if delta.x < 0.0 { Vec2::X } else { Vec2::NEG_X }
    } else if delta.y < 0.0 {
        Vec2::Y
    } else {
        Vec2::NEG_Y
    };

    Some(SweepHit { t_entry, normal })
}

/// Check a ball of radius `r` at `center` for overlap with `aabb`.
///
/// A center inside the box has zero distance to its closest point; the
/// distance is then replaced by [`CONTACT_EPSILON`] in the normal's
/// denominator, which leaves a zero normal.
pub fn circle_aabb(center: Vec2, r: f32, aabb: &Aabb) -> Option<Contact> {
    let closest = aabb.closest_point(center);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq >= r * r {
        return None;
    }

    let dist = dist_sq.sqrt();
    let denom = if dist == 0.0 { CONTACT_EPSILON } else { dist };

    Some(Contact {
        normal: offset / denom,
        penetration: r - dist,
    })
}

/// Reflect the normal component of `velocity` with restitution `e`.
///
/// Only applies when the ball moves into the surface (v·n < 0):
/// v' = v - (1 + e)(v·n)n
#[inline]
pub fn reflect_with_restitution(velocity: Vec2, normal: Vec2, e: f32) -> Vec2 {
    let dot = velocity.dot(normal);
    if dot < 0.0 {
        velocity - (1.0 + e) * dot * normal
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_center_half_extents(Vec2::ZERO, Vec2::splat(20.0))
    }

    #[test]
    fn test_swept_head_on() {
        let hit = swept_circle_aabb(Vec2::new(-100.0, 0.0), Vec2::new(100.0, 0.0), 5.0, &unit_box())
            .expect("path crosses the box");
        // Expanded left face at x = -25: (−25 − (−100)) / 200
        assert!((hit.t_entry - 0.375).abs() < 1e-6);
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_swept_moving_left_hits_right_face() {
        let hit = swept_circle_aabb(Vec2::new(100.0, 3.0), Vec2::new(0.0, 3.0), 5.0, &unit_box())
            .expect("path crosses the box");
        assert!((hit.t_entry - 0.75).abs() < 1e-6);
        assert_eq!(hit.normal, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_swept_vertical_faces() {
        let down = swept_circle_aabb(Vec2::new(0.0, -60.0), Vec2::new(0.0, 0.0), 5.0, &unit_box())
            .expect("falls onto top face");
        assert!((down.t_entry - 35.0 / 60.0).abs() < 1e-6);
        assert_eq!(down.normal, Vec2::new(0.0, -1.0));

        let up = swept_circle_aabb(Vec2::new(0.0, 60.0), Vec2::new(0.0, 0.0), 5.0, &unit_box())
            .expect("rises into bottom face");
        assert_eq!(up.normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_swept_miss_outside_slab() {
        // Stationary on y and outside the expanded slab
        let hit = swept_circle_aabb(Vec2::new(-100.0, 100.0), Vec2::new(100.0, 100.0), 5.0, &unit_box());
        assert!(hit.is_none());
    }

    #[test]
    fn test_swept_miss_grazing_past_corner() {
        let hit = swept_circle_aabb(Vec2::new(-100.0, 26.0), Vec2::new(100.0, 26.0), 5.0, &unit_box());
        assert!(hit.is_none());
    }

    #[test]
    fn test_swept_stops_short() {
        // Path ends before reaching the expanded face (t_entry > 1)
        let hit = swept_circle_aabb(Vec2::new(-100.0, 0.0), Vec2::new(-30.0, 0.0), 5.0, &unit_box());
        assert!(hit.is_none());
    }

    #[test]
    fn test_swept_already_past() {
        // Box is behind the path (t_exit < 0)
        let hit = swept_circle_aabb(Vec2::new(40.0, 0.0), Vec2::new(100.0, 0.0), 5.0, &unit_box());
        assert!(hit.is_none());
    }

    #[test]
    fn test_swept_tie_prefers_vertical() {
        // Diagonal path reaching both expanded faces at the same time
        let hit = swept_circle_aabb(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0), 5.0, &unit_box())
            .expect("diagonal crosses the box");
        assert!((hit.t_entry - 0.375).abs() < 1e-6);
        assert_eq!(hit.normal, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_swept_no_motion() {
        assert!(swept_circle_aabb(Vec2::ZERO, Vec2::ZERO, 5.0, &unit_box()).is_none());
    }

    #[test]
    fn test_swept_leaving_a_face_is_a_miss() {
        // Resting on the expanded left face and moving away from the box
        let hit = swept_circle_aabb(Vec2::new(-25.0, 0.0), Vec2::new(-35.0, 0.0), 5.0, &unit_box());
        assert!(hit.is_none());

        // Same on the top face, moving up
        let hit = swept_circle_aabb(Vec2::new(3.0, -25.0), Vec2::new(4.0, -30.0), 5.0, &unit_box());
        assert!(hit.is_none());
    }

    #[test]
    fn test_swept_starting_overlap_names_entry_face() {
        // Starts inside the expanded box moving right: entered through the left face
        let hit = swept_circle_aabb(Vec2::new(-22.0, 0.0), Vec2::new(-12.0, 0.0), 5.0, &unit_box())
            .expect("overlapping sweep");
        assert!(hit.t_entry < 0.0);
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_swept_fast_ball_does_not_tunnel() {
        // Thin box, long step: end point is well past the box
        let thin = Aabb::from_edges(-1.0, -50.0, 1.0, 50.0);
        let hit = swept_circle_aabb(Vec2::new(-500.0, 0.0), Vec2::new(500.0, 0.0), 2.0, &thin);
        assert!(hit.is_some());
        // Discrete test at the end point sees nothing
        assert!(circle_aabb(Vec2::new(500.0, 0.0), 2.0, &thin).is_none());
    }

    #[test]
    fn test_discrete_side_overlap() {
        let contact = circle_aabb(Vec2::new(23.0, 0.0), 5.0, &unit_box()).expect("overlap");
        assert!((contact.normal - Vec2::X).length() < 1e-6);
        assert!((contact.penetration - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_discrete_corner_overlap() {
        // Closest point is the (20, 20) corner, 5 units away
        let contact = circle_aabb(Vec2::new(23.0, 24.0), 6.0, &unit_box()).expect("overlap");
        assert!((contact.normal - Vec2::new(0.6, 0.8)).length() < 1e-5);
        assert!((contact.penetration - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_discrete_no_overlap() {
        assert!(circle_aabb(Vec2::new(26.0, 0.0), 5.0, &unit_box()).is_none());
        // Exactly touching is not a collision
        assert!(circle_aabb(Vec2::new(25.0, 0.0), 5.0, &unit_box()).is_none());
    }

    #[test]
    fn test_discrete_center_inside_box() {
        let contact = circle_aabb(Vec2::ZERO, 5.0, &unit_box()).expect("inside");
        assert!(!contact.normal.is_nan());
        assert!(contact.penetration >= 0.0);
        assert!(contact.penetration <= 5.0);
    }

    #[test]
    fn test_reflect_with_restitution() {
        let v = reflect_with_restitution(Vec2::new(100.0, 20.0), Vec2::NEG_X, 0.5);
        assert!((v.x - (-50.0)).abs() < 1e-4);
        assert!((v.y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_reflect_fully_inelastic() {
        let v = reflect_with_restitution(Vec2::new(100.0, 20.0), Vec2::NEG_X, 0.0);
        assert_eq!(v.dot(Vec2::NEG_X), 0.0);
        assert_eq!(v.y, 20.0);
    }

    #[test]
    fn test_reflect_ignores_separating_velocity() {
        let v = Vec2::new(-100.0, 20.0);
        assert_eq!(reflect_with_restitution(v, Vec2::NEG_X, 0.5), v);
    }
}
