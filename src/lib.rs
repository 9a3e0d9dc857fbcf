//! Newton's cradle style pendulum simulation.
//!
//! A [`CradleSimulation`] owns a row of [`PendulumBody`] values. Each call to
//! [`CradleSimulation::tick`] integrates every pendulum one frame forward and
//! then lets neighbours that touch exchange momentum through the
//! [`CollisionResolver`]. Drawing and frame scheduling are left to the caller.

pub mod math;
pub mod objects;
pub mod integration;
pub mod collision;
pub mod world;
pub mod common;

// Re-export key types for easier use
pub use math::vec2::Vec2;
pub use objects::{ColorTag, PendulumBody};
pub use collision::{CollisionResolver, ContactEvent, ContactOutcome};
pub use world::{CradleLayout, CradleSimulation, Launch};
pub use common::{CradleError, PairSweep, SimulationConfig};
