//! Contact detection and velocity exchange between neighbouring pendulums.
//!
//! Bodies are treated as 1-D particles moving along their swing arcs: the
//! angular velocities are turned into tangential ones, exchanged with the
//! elastic collision formula and turned back.

use super::contact::{ContactEvent, ContactOutcome};
use crate::common::SimulationConfig;
use crate::objects::pendulum::PendulumBody;

/// Distance between the cached locations of two bodies.
pub fn contact_distance(a: &PendulumBody, b: &PendulumBody) -> f64 {
    a.location().distance(b.location())
}

/// True if the two bodies overlap at their cached locations.
pub fn in_contact(a: &PendulumBody, b: &PendulumBody) -> bool {
    contact_distance(a, b) < a.radius() + b.radius()
}

/// 1-D elastic collision. Returns the post-collision velocities `(a', b')`.
///
/// Momentum `m_a * v_a + m_b * v_b` is preserved; with equal masses the
/// velocities are swapped.
pub fn elastic_collision(mass_a: f64, velocity_a: f64, mass_b: f64, velocity_b: f64) -> (f64, f64) {
    let total_mass = mass_a + mass_b;
    let velocity_a_prime = (velocity_a * (mass_a - mass_b) + 2.0 * mass_b * velocity_b) / total_mass;
    let velocity_b_prime = (velocity_b * (mass_b - mass_a) + 2.0 * mass_a * velocity_a) / total_mass;
    (velocity_a_prime, velocity_b_prime)
}

/// Resolves contacts between two neighbouring bodies.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver<'a> {
    config: &'a SimulationConfig,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    /// Checks `a` against `b` and exchanges their velocities if they touch.
    ///
    /// Returns `None` when the bodies are apart, in which case neither is
    /// touched. A contact whose tangential velocities differ by less than
    /// the configured gravity is reported as [`ContactOutcome::NearRest`]
    /// and also left alone, so bodies resting against each other do not
    /// jitter.
    ///
    /// On a real collision each body gets its new angular velocity, is
    /// snapped back to the vertical if that velocity is exactly zero, takes
    /// one more `theta += angular_velocity` step and has its location
    /// refreshed.
    pub fn resolve(
        &self,
        body_a: &mut PendulumBody,
        body_b: &mut PendulumBody,
        should_log: bool,
    ) -> Option<ContactEvent> {
        self.resolve_indexed(body_a, body_b, (0, 1), should_log)
    }

    pub(crate) fn resolve_indexed(
        &self,
        body_a: &mut PendulumBody,
        body_b: &mut PendulumBody,
        (body_a_idx, body_b_idx): (usize, usize),
        should_log: bool,
    ) -> Option<ContactEvent> {
        let distance = contact_distance(body_a, body_b);
        if distance >= body_a.radius() + body_b.radius() {
            return None;
        }

        let incoming_a = body_a.tangential_velocity();
        let incoming_b = body_b.tangential_velocity();

        if (incoming_a - incoming_b).abs() < self.config.gravity {
            if should_log {
                println!(
                    "[CollisionResolver] {} <-> {}: near rest (dv={:.4}), skipped",
                    body_a_idx,
                    body_b_idx,
                    (incoming_a - incoming_b).abs()
                );
            }
            return Some(ContactEvent {
                body_a_idx,
                body_b_idx,
                distance,
                incoming_a,
                incoming_b,
                outcome: ContactOutcome::NearRest,
            });
        }

        let (velocity_a, velocity_b) =
            elastic_collision(body_a.mass(), incoming_a, body_b.mass(), incoming_b);

        apply_velocity(body_a, velocity_a);
        apply_velocity(body_b, velocity_b);

        if should_log {
            println!(
                "[CollisionResolver] {} <-> {}: dist={:.3}, v=({:.4}, {:.4}) -> ({:.4}, {:.4})",
                body_a_idx, body_b_idx, distance, incoming_a, incoming_b, velocity_a, velocity_b
            );
        }

        Some(ContactEvent {
            body_a_idx,
            body_b_idx,
            distance,
            incoming_a,
            incoming_b,
            outcome: ContactOutcome::Resolved {
                velocity_a,
                velocity_b,
            },
        })
    }
}

fn apply_velocity(body: &mut PendulumBody, tangential_velocity: f64) {
    body.set_tangential_velocity(tangential_velocity);
    let angular_velocity = body.angular_velocity;
    let theta = body.theta_mut();
    if angular_velocity == 0.0 {
        *theta = 0.0;
    }
    *theta += angular_velocity;
    body.update_location();
}
