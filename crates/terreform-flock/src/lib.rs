//! Boid flocking inside a bounded airspace.
//!
//! Each tick every boid steers by separation, alignment and cohesion against the rest
//! of the flock, plus a soft push back from the airspace walls. Boids read the previous
//! tick's state so update order never matters.
//!
//! Neighbourhoods are the whole flock, which costs O(n²) per tick. Flocks here hold
//! around ten boids; switching to a radius query would change the emergent motion.

mod airspace;
mod error;
mod flock;
mod params;

pub use airspace::Bounds3;
pub use error::FlockError;
pub use flock::{Boid, Flock, Steering};
pub use params::{CONTAINMENT_SLACK, FlockParams};
