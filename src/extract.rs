//! Read-only data for presentation
//!
//! Flattens simulation state into `Pod` instance records (world frame,
//! packed colors) that a renderer can upload as-is, plus the counter text.

use bytemuck::{Pod, Zeroable};
use rand::Rng;

use crate::sim::{Simulation, Tag, TagCounts};

/// Pack an RGB triple into 0xRRGGBBAA
#[inline]
pub fn pack_rgba([r, g, b]: [u8; 3]) -> u32 {
    u32::from_be_bytes([r, g, b, 0xff])
}

/// One ball, positioned in the world frame
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub color: u32,
}

/// One obstacle: world-frame center, local half extents, rotation angle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ObstacleInstance {
    pub center: [f32; 2],
    pub half_extents: [f32; 2],
    pub rotation: f32,
    pub color: u32,
}

pub fn body_instances<R: Rng>(sim: &Simulation<R>) -> Vec<BodyInstance> {
    let container = sim.container();
    let radius = sim.config().ball_radius;
    sim.bodies()
        .iter()
        .map(|body| BodyInstance {
            position: container.to_world(body.pos).to_array(),
            radius,
            color: pack_rgba(body.tag.rgb()),
        })
        .collect()
}

pub fn obstacle_instances<R: Rng>(sim: &Simulation<R>) -> Vec<ObstacleInstance> {
    let container = sim.container();
    sim.obstacles()
        .iter()
        .map(|obstacle| ObstacleInstance {
            center: container.to_world(obstacle.bounds.center()).to_array(),
            half_extents: obstacle.bounds.half_extents().to_array(),
            rotation: container.theta,
            color: pack_rgba(obstacle.tag.rgb()),
        })
        .collect()
}

/// Counter lines in display order, e.g. `"Red: 12"`
pub fn counter_lines(counts: &TagCounts) -> Vec<(Tag, String)> {
    counts
        .iter()
        .map(|(tag, count)| (tag, format!("{}: {}", tag.label(), count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::Body;
    use glam::Vec2;

    #[test]
    fn test_pack_rgba() {
        assert_eq!(pack_rgba([255, 0, 0]), 0xff0000ff);
        assert_eq!(pack_rgba([150, 150, 150]), 0x969696ff);
    }

    #[test]
    fn test_instances_follow_rotation() {
        let mut sim = Simulation::new(SimConfig {
            seed: Some(3),
            ..Default::default()
        })
        .unwrap()
        .with_bodies(vec![Body::new(Vec2::new(100.0, 0.0), Vec2::ZERO)]);
        sim.container.theta = std::f32::consts::FRAC_PI_2;

        let bodies = body_instances(&sim);
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].position[0].abs() < 1e-3);
        assert!((bodies[0].position[1] - 100.0).abs() < 1e-3);
        assert_eq!(bodies[0].color, pack_rgba(Tag::Neutral.rgb()));

        let obstacles = obstacle_instances(&sim);
        assert_eq!(obstacles.len(), 4);
        assert_eq!(obstacles[0].half_extents, [20.0, 20.0]);
        assert_eq!(obstacles[0].color, pack_rgba([255, 0, 0]));
        // Red obstacle at (-50, -150) rotated a quarter turn
        assert!((obstacles[0].center[0] - 150.0).abs() < 1e-3);
        assert!((obstacles[0].center[1] - (-50.0)).abs() < 1e-3);

        let bytes: &[u8] = bytemuck::cast_slice(&bodies);
        assert_eq!(bytes.len(), std::mem::size_of::<BodyInstance>());
    }

    #[test]
    fn test_counter_lines() {
        let bodies = [
            Body {
                tag: Tag::Blue,
                ..Body::new(Vec2::ZERO, Vec2::ZERO)
            },
            Body::new(Vec2::ZERO, Vec2::ZERO),
        ];
        let lines = counter_lines(&TagCounts::from_bodies(&bodies));
        let text: Vec<&str> = lines.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(text, vec!["Red: 0", "Green: 0", "Blue: 1", "Yellow: 0", "Grey: 1"]);
    }
}
