use serde::{Deserialize, Serialize};

use crate::common::{CradleError, Result, SimulationConfig};
use crate::math::vec2::Vec2;

/// Render attribute carried for the drawing side. The simulation never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorTag(pub String);

impl ColorTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single swinging mass hanging from a fixed pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumBody {
    // Fixed after construction
    pivot: Vec2,
    mass: f64,
    fulcrum_length: f64,
    radius: f64,

    // Primary state
    theta: f64,                // Radians from the downward vertical, unbounded
    pub angular_velocity: f64, // Radians per tick

    // Cached projection of (pivot, theta, fulcrum_length)
    location: Vec2,

    pub color: ColorTag,
}

impl PendulumBody {
    /// Creates a body at rest (zero angular velocity) hanging at `theta`.
    ///
    /// The radius is derived from the mass and `config.reference_width`, and
    /// the location is projected from `theta` straight away.
    pub fn new(
        pivot: Vec2,
        mass: f64,
        theta: f64,
        fulcrum_length: f64,
        color: ColorTag,
        config: &SimulationConfig,
    ) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(CradleError::InvalidMass(mass));
        }
        if !fulcrum_length.is_finite() || fulcrum_length <= 0.0 {
            return Err(CradleError::InvalidLength(fulcrum_length));
        }
        if !pivot.is_finite() {
            return Err(CradleError::NonFinite("pivot"));
        }
        if !theta.is_finite() {
            return Err(CradleError::NonFinite("theta"));
        }
        let radius = config.radius_for_mass(mass);
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CradleError::NonFinite("radius"));
        }

        let mut body = Self {
            pivot,
            mass,
            fulcrum_length,
            radius,
            theta,
            angular_velocity: 0.0,
            location: Vec2::ZERO,
            color,
        };
        body.update_location();
        Ok(body)
    }

    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn fulcrum_length(&self) -> f64 {
        self.fulcrum_length
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// The location as of the last refresh. Right after [`integrate`] this
    /// still reflects the theta the step started from.
    ///
    /// [`integrate`]: crate::integration::integrator::integrate
    pub fn location(&self) -> Vec2 {
        self.location
    }

    /// Where the body is for its current theta, computed without touching
    /// the cached location.
    pub fn projected_location(&self) -> Vec2 {
        self.pivot + Vec2::from_angle(self.theta) * self.fulcrum_length
    }

    /// Where the body hangs when `theta == 0`.
    pub fn rest_location(&self) -> Vec2 {
        self.pivot + Vec2::new(0.0, self.fulcrum_length)
    }

    /// Recomputes the cached location from the current theta.
    pub fn update_location(&mut self) {
        self.location = self.projected_location();
    }

    /// Sets theta and refreshes the location.
    pub fn set_theta(&mut self, theta: f64) {
        self.theta = theta;
        self.update_location();
    }

    /// Linear speed along the swing arc.
    pub fn tangential_velocity(&self) -> f64 {
        self.angular_velocity * self.fulcrum_length
    }

    pub fn set_tangential_velocity(&mut self, velocity: f64) {
        self.angular_velocity = velocity / self.fulcrum_length;
    }

    pub fn momentum(&self) -> f64 {
        self.mass * self.tangential_velocity()
    }

    pub fn kinetic_energy(&self) -> f64 {
        let v = self.tangential_velocity();
        0.5 * self.mass * v * v
    }

    // Integrator and resolver mutate theta without refreshing the location;
    // each refreshes it explicitly at the point its contract says.
    pub(crate) fn theta_mut(&mut self) -> &mut f64 {
        &mut self.theta
    }
}
