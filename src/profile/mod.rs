//! Simulated player state: clock, regenerating pools, and collection.

pub mod player;
pub mod pool;

pub use player::Profile;
pub use pool::{Regen, ResourcePool};
