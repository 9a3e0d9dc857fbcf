pub mod pendulum;

pub use pendulum::{ColorTag, PendulumBody};
