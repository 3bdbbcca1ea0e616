//! Simulation state and core types
//!
//! Bodies and obstacles live in container-local coordinates. The container
//! rotation only enters the physics through the fictitious forces.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use super::restitution::symmetric;
use crate::config::{ObstacleConfig, SimConfig, SimParams};
use crate::error::ConfigError;
use crate::{local_to_world, normalize_angle, world_to_local};

/// Label a body picks up from the last obstacle it touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tag {
    #[default]
    Neutral,
    Red,
    Green,
    Blue,
    Yellow,
}

impl Tag {
    /// Counter display order
    pub const ALL: [Tag; 5] = [Tag::Red, Tag::Green, Tag::Blue, Tag::Yellow, Tag::Neutral];

    pub fn label(&self) -> &'static str {
        match self {
            Tag::Neutral => "Grey",
            Tag::Red => "Red",
            Tag::Green => "Green",
            Tag::Blue => "Blue",
            Tag::Yellow => "Yellow",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Tag::Neutral => [150, 150, 150],
            Tag::Red => [255, 0, 0],
            Tag::Green => [0, 255, 0],
            Tag::Blue => [0, 0, 255],
            Tag::Yellow => [255, 255, 0],
        }
    }

    fn index(&self) -> usize {
        match self {
            Tag::Red => 0,
            Tag::Green => 1,
            Tag::Blue => 2,
            Tag::Yellow => 3,
            Tag::Neutral => 4,
        }
    }
}

/// Count of bodies per tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagCounts {
    counts: [usize; Tag::ALL.len()],
}

impl TagCounts {
    pub fn from_bodies<'a>(bodies: impl IntoIterator<Item = &'a Body>) -> Self {
        let mut counts = Self::default();
        for body in bodies {
            counts.counts[body.tag.index()] += 1;
        }
        counts
    }

    pub fn get(&self, tag: Tag) -> usize {
        self.counts[tag.index()]
    }

    /// (tag, count) pairs in counter order
    pub fn iter(&self) -> impl Iterator<Item = (Tag, usize)> + '_ {
        Tag::ALL.iter().map(|&tag| (tag, self.get(tag)))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// A ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tag: Tag,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            tag: Tag::Neutral,
        }
    }

    /// Random position fully inside the container, random velocity per axis
    pub fn spawn<R: Rng>(rng: &mut R, half_size: f32, radius: f32, speed: f32) -> Self {
        let extent = half_size - radius;
        let pos = Vec2::new(symmetric(rng, extent), symmetric(rng, extent));
        let vel = Vec2::new(symmetric(rng, speed), symmetric(rng, speed));
        Self::new(pos, vel)
    }
}

/// A static box anchored to the container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub bounds: Aabb,
    pub tag: Tag,
}

impl From<&ObstacleConfig> for Obstacle {
    fn from(config: &ObstacleConfig) -> Self {
        Self {
            bounds: config.bounds(),
            tag: config.tag,
        }
    }
}

/// The rotating square boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub half_size: f32,
    /// Rotation angle (radians, normalized to [-π, π))
    pub theta: f32,
}

impl Container {
    pub fn new(half_size: f32) -> Self {
        Self {
            half_size,
            theta: 0.0,
        }
    }

    /// Advance the rotation angle
    pub fn rotate(&mut self, delta: f32) {
        self.theta = normalize_angle(self.theta + delta);
    }

    /// Box a body center must stay inside
    pub fn inner_bounds(&self, radius: f32) -> Aabb {
        Aabb::from_center_half_extents(Vec2::ZERO, Vec2::splat(self.half_size - radius))
    }

    pub fn to_world(&self, local: Vec2) -> Vec2 {
        local_to_world(local, self.theta)
    }

    pub fn to_local(&self, world: Vec2) -> Vec2 {
        world_to_local(world, self.theta)
    }
}

/// Collision counts for the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickStats {
    pub wall_hits: u32,
    pub obstacle_hits: u32,
    /// Bodies whose position or velocity stopped being finite
    pub non_finite: u32,
}

/// A running simulation: bodies, obstacles, container and the RNG that
/// drives noise and restitution
#[derive(Debug, Clone)]
pub struct Simulation<R = Pcg32> {
    pub(crate) config: SimConfig,
    pub(crate) params: SimParams,
    pub(crate) container: Container,
    pub(crate) bodies: Vec<Body>,
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) rng: R,
    pub(crate) time_ticks: u64,
    pub(crate) last_tick: TickStats,
}

impl Simulation<Pcg32> {
    /// Build a simulation, seeding from `config.seed` or the thread RNG
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    /// Build a simulation around a caller-supplied RNG
    pub fn with_rng(config: SimConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let params = config.params();
        let bodies = (0..config.population)
            .map(|_| {
                Body::spawn(
                    &mut rng,
                    config.half_size,
                    config.ball_radius,
                    config.initial_speed,
                )
            })
            .collect();
        let obstacles = config.obstacles.iter().map(Obstacle::from).collect();

        log::info!(
            "Simulation created: {} bodies, {} obstacles, {} collision, seed {:?}",
            config.population,
            config.obstacles.len(),
            config.strategy.as_str(),
            config.seed
        );

        Ok(Self {
            container: Container::new(config.half_size),
            params,
            config,
            bodies,
            obstacles,
            rng,
            time_ticks: 0,
            last_tick: TickStats::default(),
        })
    }

    /// Replace the randomly spawned population with explicit bodies.
    ///
    /// The population becomes `bodies.len()`, which must not be zero.
    pub fn with_bodies(mut self, bodies: Vec<Body>) -> Self {
        debug_assert!(!bodies.is_empty(), "simulation needs at least one body");
        self.config.population = bodies.len();
        self.bodies = bodies;
        self
    }

    /// Advance one fixed timestep
    pub fn step(&mut self) {
        super::tick::tick(self);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Current container rotation angle
    pub fn theta(&self) -> f32 {
        self.container.theta
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access for scripted scenarios
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Ticks advanced so far
    pub fn ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn last_tick(&self) -> TickStats {
        self.last_tick
    }

    pub fn tag_counts(&self) -> TagCounts {
        TagCounts::from_bodies(&self.bodies)
    }
}
