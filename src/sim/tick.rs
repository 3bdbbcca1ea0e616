//! Fixed timestep simulation tick
//!
//! Rotates the container, then integrates every body: fictitious forces,
//! noise, position update, wall collisions and obstacle collisions in
//! configuration order.

use glam::Vec2;
use rand::Rng;

use super::collision::{
    CollisionStrategy, circle_aabb, reflect_with_restitution, swept_circle_aabb,
};
use super::forces::rotating_frame_acceleration;
use super::restitution::{Restitution, symmetric};
use super::state::{Body, Obstacle, Simulation, TickStats};
use crate::config::SimParams;

/// Collisions resolved for one body in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodyContacts {
    pub walls: u32,
    pub obstacles: u32,
}

/// Advance the simulation by one fixed timestep
pub fn tick<R: Rng>(sim: &mut Simulation<R>) {
    let params = sim.params;
    sim.container.rotate(params.angular_velocity * params.dt);
    let theta = sim.container.theta;

    let mut stats = TickStats::default();
    for body in &mut sim.bodies {
        let contacts = integrate_body(body, theta, &params, &sim.obstacles, &mut sim.rng);
        stats.wall_hits += contacts.walls;
        stats.obstacle_hits += contacts.obstacles;
        if !body.pos.is_finite() || !body.vel.is_finite() {
            stats.non_finite += 1;
        }
    }

    if stats.non_finite > 0 {
        log::warn!(
            "Tick {}: {} bodies became non-finite (dt {} may be too large)",
            sim.time_ticks,
            stats.non_finite,
            params.dt
        );
    }

    sim.time_ticks += 1;
    sim.last_tick = stats;
}

/// Advance one body by one timestep in the container frame rotated by `theta`
pub fn integrate_body<R: Rng>(
    body: &mut Body,
    theta: f32,
    params: &SimParams,
    obstacles: &[Obstacle],
    rng: &mut R,
) -> BodyContacts {
    let dt = params.dt;
    let start = body.pos;

    let accel = rotating_frame_acceleration(
        theta,
        body.pos,
        body.vel,
        params.gravity,
        params.angular_velocity,
    );
    body.vel += accel * dt;

    // Noise, sampled independently per axis
    body.vel.x += symmetric(rng, params.noise_strength) * dt;
    body.vel.y += symmetric(rng, params.noise_strength) * dt;

    body.pos += body.vel * dt;

    let walls = resolve_walls(body, params.half_size, params.radius, &params.restitution, rng);
    let obstacle_hits = resolve_obstacles(body, start, params, obstacles, rng);

    BodyContacts {
        walls,
        obstacles: obstacle_hits,
    }
}

/// Clamp a body back inside the container and bounce it off each wall it
/// crossed. Every wall samples its own restitution.
pub fn resolve_walls<R: Rng>(
    body: &mut Body,
    half_size: f32,
    radius: f32,
    restitution: &Restitution,
    rng: &mut R,
) -> u32 {
    let mut hits = 0;

    if body.pos.x - radius < -half_size {
        body.pos.x = -half_size + radius;
        body.vel.x = -body.vel.x * restitution.sample(rng);
        hits += 1;
    }
    if body.pos.x + radius > half_size {
        body.pos.x = half_size - radius;
        body.vel.x = -body.vel.x * restitution.sample(rng);
        hits += 1;
    }
    if body.pos.y - radius < -half_size {
        body.pos.y = -half_size + radius;
        body.vel.y = -body.vel.y * restitution.sample(rng);
        hits += 1;
    }
    if body.pos.y + radius > half_size {
        body.pos.y = half_size - radius;
        body.vel.y = -body.vel.y * restitution.sample(rng);
        hits += 1;
    }

    hits
}

/// Test every obstacle in order and resolve hits one after another.
///
/// A later obstacle sees the position and velocity left by earlier ones;
/// the swept test keeps using the pre-tick position as its start.
pub fn resolve_obstacles<R: Rng>(
    body: &mut Body,
    start: Vec2,
    params: &SimParams,
    obstacles: &[Obstacle],
    rng: &mut R,
) -> u32 {
    let mut hits = 0;

    for obstacle in obstacles {
        let hit = match params.strategy {
            CollisionStrategy::Continuous => {
                resolve_swept(body, start, params.radius, obstacle, &params.restitution, rng)
            }
            CollisionStrategy::Discrete => {
                resolve_discrete(body, params.radius, obstacle, &params.restitution, rng)
            }
        };
        if hit {
            body.tag = obstacle.tag;
            hits += 1;
        }
    }

    hits
}

/// Move the body back to its time of impact and reflect its velocity.
///
/// A sweep that started overlapping the box never rewinds behind the start;
/// the body is pushed out onto the expanded face named by the hit normal.
pub fn resolve_swept<R: Rng>(
    body: &mut Body,
    start: Vec2,
    radius: f32,
    obstacle: &Obstacle,
    restitution: &Restitution,
    rng: &mut R,
) -> bool {
    let Some(hit) = swept_circle_aabb(start, body.pos, radius, &obstacle.bounds) else {
        return false;
    };

    if hit.t_entry >= 0.0 {
        body.pos = start + (body.pos - start) * hit.t_entry;
    } else {
        let face = obstacle.bounds.expanded(radius);
        match hit.normal {
            n if n == Vec2::NEG_X => body.pos.x = face.left(),
            n if n == Vec2::X => body.pos.x = face.right(),
            n if n == Vec2::NEG_Y => body.pos.y = face.top(),
            _ => body.pos.y = face.bottom(),
        }
    }
    let e = restitution.sample(rng);
    body.vel = reflect_with_restitution(body.vel, hit.normal, e);
    true
}

/// Push an overlapping body out along the contact normal and reflect it
pub fn resolve_discrete<R: Rng>(
    body: &mut Body,
    radius: f32,
    obstacle: &Obstacle,
    restitution: &Restitution,
    rng: &mut R,
) -> bool {
    let Some(contact) = circle_aabb(body.pos, radius, &obstacle.bounds) else {
        return false;
    };

    body.pos += contact.normal * contact.penetration;
    let e = restitution.sample(rng);
    body.vel = reflect_with_restitution(body.vel, contact.normal, e);
    true
}
