use crate::common::SimulationConfig;
use crate::objects::pendulum::PendulumBody;

/// Advances a pendulum by one tick using Semi-Implicit Euler on
/// `theta'' = -(G / L) * sin(theta)`.
///
/// The location is refreshed *before* stepping, so after this call it shows
/// where the body was at the start of the tick while theta and velocity are
/// already set up for the next one.
pub fn integrate(body: &mut PendulumBody, config: &SimulationConfig) {
    body.update_location();

    let angular_acceleration = -config.gravity / body.fulcrum_length() * body.theta().sin();
    body.angular_velocity += angular_acceleration;
    let angular_velocity = body.angular_velocity;
    *body.theta_mut() += angular_velocity;
    body.angular_velocity *= config.damping;

    if config.wrap_theta {
        let wrapped = wrap_angle(body.theta());
        *body.theta_mut() = wrapped;
    }
}

/// Wraps an angle in radians to the range [-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::objects::pendulum::ColorTag;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    fn hanging_body(theta: f64, config: &SimulationConfig) -> PendulumBody {
        PendulumBody::new(Vec2::new(0.0, 10.0), 10.0, theta, 200.0, ColorTag::default(), config)
            .unwrap()
    }

    #[test]
    fn test_integrate_first_step_from_launch_angle() {
        let config = SimulationConfig::default();
        let mut body = hanging_body(-1.0, &config);
        let start_location = body.location();

        integrate(&mut body, &config);

        let acceleration = -(0.3 / 200.0) * (-1.0f64).sin();
        assert!((acceleration - 0.001262).abs() < 1e-6);
        assert!((body.theta() - (-1.0 + acceleration)).abs() < EPSILON);
        assert!((body.theta() - -0.998738).abs() < 1e-6);
        assert!((body.angular_velocity - acceleration * 0.999).abs() < EPSILON);
        // Location still reflects the pre-step theta
        assert_eq!(body.location(), start_location);
        assert_ne!(body.location(), body.projected_location());
    }

    #[test]
    fn test_integrate_at_rest_stays_at_rest() {
        let config = SimulationConfig::default();
        let mut body = hanging_body(0.0, &config);
        for _ in 0..100 {
            integrate(&mut body, &config);
        }
        assert_eq!(body.theta(), 0.0);
        assert_eq!(body.angular_velocity, 0.0);
    }

    #[test]
    fn test_integrate_location_lags_one_step() {
        let config = SimulationConfig::default();
        let mut body = hanging_body(0.7, &config);
        for _ in 0..10 {
            let theta_before = body.theta();
            integrate(&mut body, &config);
            let lagged = body.pivot() + Vec2::from_angle(theta_before) * body.fulcrum_length();
            assert!((body.location() - lagged).magnitude() < EPSILON);
        }
    }

    #[test]
    fn test_single_body_decays() {
        let config = SimulationConfig::default();
        let mut body = hanging_body(-1.0, &config);

        // Record |theta| at every turning point; each swing must be smaller.
        let mut peaks = Vec::new();
        let mut last_velocity = body.angular_velocity;
        for _ in 0..3000 {
            integrate(&mut body, &config);
            if last_velocity != 0.0 && last_velocity.signum() != body.angular_velocity.signum() {
                peaks.push(body.theta().abs());
            }
            last_velocity = body.angular_velocity;
        }

        assert!(peaks.len() > 10);
        for pair in peaks.windows(2) {
            assert!(pair[1] < pair[0], "amplitude grew: {:?}", pair);
        }

        for _ in 0..3000 {
            integrate(&mut body, &config);
        }
        assert!(body.theta().abs() < 0.05);
    }

    #[test]
    fn test_undamped_swing_is_symmetric() {
        let config = SimulationConfig { damping: 1.0, ..Default::default() };
        let mut body = hanging_body(-0.5, &config);
        let mut max_theta = f64::MIN;
        for _ in 0..400 {
            integrate(&mut body, &config);
            max_theta = max_theta.max(body.theta());
        }
        // Symplectic Euler keeps the amplitude close to the launch angle
        assert!((max_theta - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_integrate_wraps_theta_when_enabled() {
        let config = SimulationConfig { wrap_theta: true, ..Default::default() };
        let mut body = hanging_body(3.0 * PI, &config);
        body.angular_velocity = 0.5;
        integrate(&mut body, &config);
        assert!(body.theta() >= -PI && body.theta() <= PI);

        let unwrapped = SimulationConfig::default();
        let mut body = hanging_body(3.0 * PI, &unwrapped);
        body.angular_velocity = 0.5;
        integrate(&mut body, &unwrapped);
        assert!(body.theta() > PI);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.0) - 0.0).abs() < EPSILON);
        assert!((wrap_angle(PI) - PI).abs() < EPSILON);
        assert!((wrap_angle(PI + 0.1) - (-PI + 0.1)).abs() < EPSILON);
        assert!((wrap_angle(-PI - 0.1) - (PI - 0.1)).abs() < EPSILON);
        assert!((wrap_angle(2.0 * PI) - 0.0).abs() < EPSILON);
    }
}
