use serde::{Deserialize, Serialize};

use crate::common::{CradleError, Result, SimulationConfig};
use crate::math::vec2::Vec2;
use crate::objects::pendulum::{ColorTag, PendulumBody};

/// A body displaced from the vertical before the first tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub index: usize,
    pub theta: f64,
}

/// Describes a row of identical pendulums hanging side by side, centred in
/// the reference width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CradleLayout {
    pub body_count: usize,
    pub mass: f64,
    pub fulcrum_length: f64,
    /// Height of every pivot.
    pub pivot_y: f64,
    /// Space left between neighbouring bodies at rest.
    pub gap: f64,
    pub launch: Vec<Launch>,
    /// Colors handed out in order, cycling if there are fewer than bodies.
    pub colors: Vec<ColorTag>,
}

impl Default for CradleLayout {
    fn default() -> Self {
        Self {
            body_count: 5,
            mass: 10.0,
            fulcrum_length: 200.0,
            pivot_y: 10.0,
            gap: 2.0,
            launch: vec![Launch { index: 0, theta: -1.0 }],
            colors: Vec::new(),
        }
    }
}

impl CradleLayout {
    /// X coordinate of every pivot, left to right.
    pub fn pivot_xs(&self, config: &SimulationConfig) -> Vec<f64> {
        let radius = config.radius_for_mass(self.mass);
        let spacing = radius * 2.0 + self.gap;
        let start_x = config.reference_width / 2.0 - (radius * 2.0 * self.body_count as f64) / 2.0 + radius;
        (0..self.body_count)
            .map(|i| start_x + i as f64 * spacing)
            .collect()
    }

    /// Builds the bodies at rest, then applies the launch angles.
    pub fn build_bodies(&self, config: &SimulationConfig) -> Result<Vec<PendulumBody>> {
        if self.body_count == 0 {
            return Err(CradleError::EmptyCradle);
        }
        if !self.gap.is_finite() {
            return Err(CradleError::NonFinite("gap"));
        }
        if !self.pivot_y.is_finite() {
            return Err(CradleError::NonFinite("pivot_y"));
        }

        let mut bodies = self
            .pivot_xs(config)
            .into_iter()
            .enumerate()
            .map(|(i, x)| {
                let color = if self.colors.is_empty() {
                    ColorTag::default()
                } else {
                    self.colors[i % self.colors.len()].clone()
                };
                PendulumBody::new(
                    Vec2::new(x, self.pivot_y),
                    self.mass,
                    0.0,
                    self.fulcrum_length,
                    color,
                    config,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        for launch in &self.launch {
            if !launch.theta.is_finite() {
                return Err(CradleError::NonFinite("launch theta"));
            }
            let body = bodies
                .get_mut(launch.index)
                .ok_or(CradleError::LaunchOutOfRange {
                    index: launch.index,
                    body_count: self.body_count,
                })?;
            body.set_theta(launch.theta);
        }

        Ok(bodies)
    }
}
