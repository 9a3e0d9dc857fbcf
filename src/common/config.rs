//! Tunable physical parameters of a simulation.

use serde::{Deserialize, Serialize};

use super::error::{CradleError, Result};

/// Bodies get `radius = mass * reference_width / RADIUS_DIVISOR`.
pub const RADIUS_DIVISOR: f64 = 200.0;

/// How adjacent pairs are swept for collisions each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairSweep {
    /// Every body checks its successor and then its predecessor, so each
    /// adjacent pair is evaluated twice per tick.
    #[default]
    BothSides,
    /// Each adjacent pair `(i, i + 1)` is evaluated exactly once per tick.
    UniquePairs,
}

/// Physical parameters shared by every body of one simulation.
///
/// Two simulations with different configs can coexist; nothing here is
/// process-global.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Scaled gravity. Drives the angular acceleration and doubles as the
    /// near-rest threshold on tangential velocity differences.
    pub gravity: f64,
    /// Per-tick angular velocity decay factor, in `(0, 1]`.
    pub damping: f64,
    /// Width of the drawing area the radii are scaled against.
    pub reference_width: f64,
    pub sweep: PairSweep,
    /// Wrap theta into `[-PI, PI]` after every integration step.
    pub wrap_theta: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            damping: 0.999,
            reference_width: 400.0,
            sweep: PairSweep::BothSides,
            wrap_theta: false,
        }
    }
}

impl SimulationConfig {
    /// Parses a config from JSON. Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(CradleError::InvalidConfig(format!(
                "gravity must be positive and finite, got {}",
                self.gravity
            )));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 || self.damping > 1.0 {
            return Err(CradleError::InvalidConfig(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !self.reference_width.is_finite() || self.reference_width <= 0.0 {
            return Err(CradleError::InvalidConfig(format!(
                "reference width must be positive and finite, got {}",
                self.reference_width
            )));
        }
        Ok(())
    }

    /// Radius of a body of the given mass.
    pub fn radius_for_mass(&self, mass: f64) -> f64 {
        mass * self.reference_width / RADIUS_DIVISOR
    }
}
