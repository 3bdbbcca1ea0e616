//! Simulation module
//!
//! All physics lives here:
//! - Fixed timestep only
//! - Randomness only through the RNG owned by the simulation
//! - Stable obstacle order within a tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod forces;
pub mod geom;
pub mod restitution;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionStrategy, Contact, SweepHit, circle_aabb, reflect_with_restitution,
    swept_circle_aabb,
};
pub use forces::rotating_frame_acceleration;
pub use geom::Aabb;
pub use restitution::Restitution;
pub use state::{Body, Container, Obstacle, Simulation, Tag, TagCounts, TickStats};
pub use tick::{BodyContacts, integrate_body, tick};
