//! Fictitious forces in the rotating container frame
//!
//! The container spins about its center at constant angular velocity, so a
//! body tracked in container coordinates feels rotated gravity plus
//! centrifugal and Coriolis accelerations.

use glam::Vec2;

/// World-frame gravity (pointing down, +y) expressed in a frame rotated by `theta`
#[inline]
pub fn local_gravity(gravity: f32, theta: f32) -> Vec2 {
    let (sin, cos) = theta.sin_cos();
    Vec2::new(gravity * sin, gravity * cos)
}

/// Outward acceleration ω²·r about the container center
#[inline]
pub fn centrifugal(omega: f32, pos: Vec2) -> Vec2 {
    omega * omega * pos
}

/// Coriolis acceleration (2ω·vy, -2ω·vx)
#[inline]
pub fn coriolis(omega: f32, vel: Vec2) -> Vec2 {
    2.0 * omega * Vec2::new(vel.y, -vel.x)
}

/// Total acceleration of a body in the container frame
pub fn rotating_frame_acceleration(
    theta: f32,
    pos: Vec2,
    vel: Vec2,
    gravity: f32,
    omega: f32,
) -> Vec2 {
    local_gravity(gravity, theta) + centrifugal(omega, pos) + coriolis(omega, vel)
}
