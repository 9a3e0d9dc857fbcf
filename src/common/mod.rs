pub mod config;
pub mod error;

pub use config::{PairSweep, SimulationConfig, RADIUS_DIVISOR};
pub use error::{CradleError, Result};
