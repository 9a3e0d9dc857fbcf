use crate::collision::{CollisionResolver, ContactEvent};
use crate::common::{CradleError, PairSweep, Result, SimulationConfig};
use crate::integration::integrator;
use crate::objects::pendulum::PendulumBody;

use super::layout::CradleLayout;

/// A row of pendulums where neighbours exchange momentum on contact.
///
/// Index order defines adjacency: body `i` only ever touches `i - 1` and
/// `i + 1`. The body count is fixed once constructed.
#[derive(Debug, Clone)]
pub struct CradleSimulation {
    bodies: Vec<PendulumBody>,
    config: SimulationConfig,
    // Contacts found during the last tick
    contacts: Vec<ContactEvent>,
    ticks: u64,
}

impl CradleSimulation {
    /// Creates a simulation from hand-built bodies.
    ///
    /// Fails if the config is invalid, there are no bodies, or two
    /// neighbours would already overlap when hanging straight down.
    pub fn new(config: SimulationConfig, bodies: Vec<PendulumBody>) -> Result<Self> {
        config.validate()?;
        if bodies.is_empty() {
            return Err(CradleError::EmptyCradle);
        }
        for (index, pair) in bodies.windows(2).enumerate() {
            let distance = pair[0].rest_location().distance(pair[1].rest_location());
            if distance < pair[0].radius() + pair[1].radius() {
                return Err(CradleError::OverlapAtRest { index });
            }
        }

        Ok(Self {
            bodies,
            config,
            contacts: Vec::new(),
            ticks: 0,
        })
    }

    pub fn from_layout(config: SimulationConfig, layout: &CradleLayout) -> Result<Self> {
        config.validate()?;
        let bodies = layout.build_bodies(&config)?;
        Self::new(config, bodies)
    }

    pub fn bodies(&self) -> &[PendulumBody] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&PendulumBody> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sum of `mass * tangential velocity` over all bodies.
    pub fn total_momentum(&self) -> f64 {
        self.bodies.iter().map(PendulumBody::momentum).sum()
    }

    /// Sum of `0.5 * mass * v^2` over all bodies, using tangential velocity.
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(PendulumBody::kinetic_energy).sum()
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self) {
        self.step(false);
    }

    /// Advances the simulation by one frame.
    /// If `should_log` is true, prints every contact found during the step.
    pub fn step(&mut self, should_log: bool) {
        self.contacts.clear();

        // 1. Integrate every body
        for body in self.bodies.iter_mut() {
            integrator::integrate(body, &self.config);
        }

        // 2. Sweep neighbouring pairs
        let config = self.config;
        let resolver = CollisionResolver::new(&config);
        let count = self.bodies.len();
        match config.sweep {
            PairSweep::BothSides => {
                for i in 0..count {
                    if i + 1 < count {
                        resolve_pair(&mut self.bodies, &mut self.contacts, &resolver, i, i + 1, should_log);
                    }
                    if i > 0 {
                        resolve_pair(&mut self.bodies, &mut self.contacts, &resolver, i, i - 1, should_log);
                    }
                }
            }
            PairSweep::UniquePairs => {
                for i in 1..count {
                    resolve_pair(&mut self.bodies, &mut self.contacts, &resolver, i - 1, i, should_log);
                }
            }
        }

        self.ticks += 1;
        if should_log {
            println!(
                "[CradleSimulation] tick {}: {} contact(s), momentum={:.4}, energy={:.4}",
                self.ticks,
                self.contacts.len(),
                self.total_momentum(),
                self.kinetic_energy()
            );
        }
    }
}

fn resolve_pair(
    bodies: &mut [PendulumBody],
    contacts: &mut Vec<ContactEvent>,
    resolver: &CollisionResolver<'_>,
    idx_a: usize,
    idx_b: usize,
    should_log: bool,
) {
    let (body_a, body_b) = body_pair_mut(bodies, idx_a, idx_b);
    if let Some(event) = resolver.resolve_indexed(body_a, body_b, (idx_a, idx_b), should_log) {
        contacts.push(event);
    }
}

/// Mutable references to two different bodies of a slice, in argument order.
fn body_pair_mut(
    bodies: &mut [PendulumBody],
    idx_a: usize,
    idx_b: usize,
) -> (&mut PendulumBody, &mut PendulumBody) {
    debug_assert_ne!(idx_a, idx_b);
    if idx_a < idx_b {
        let (head, tail) = bodies.split_at_mut(idx_b);
        (&mut head[idx_a], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(idx_a);
        (&mut tail[0], &mut head[idx_b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::ContactOutcome;
    use crate::math::vec2::Vec2;
    use crate::objects::pendulum::ColorTag;

    // Radius 20 bodies on 100-long arms, pivots 42 apart.
    fn pair(theta_a: f64, theta_b: f64, config: &SimulationConfig) -> Vec<PendulumBody> {
        [(0.0, theta_a), (42.0, theta_b)]
            .into_iter()
            .map(|(x, theta)| {
                PendulumBody::new(Vec2::new(x, 0.0), 10.0, theta, 100.0, ColorTag::default(), config)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_new_rejections() {
        let config = SimulationConfig::default();
        assert!(matches!(
            CradleSimulation::new(config, Vec::new()),
            Err(CradleError::EmptyCradle)
        ));

        let mut crowded = pair(0.0, 0.0, &config);
        crowded.push(
            PendulumBody::new(Vec2::new(60.0, 0.0), 10.0, 0.0, 100.0, ColorTag::default(), &config)
                .unwrap(),
        );
        assert!(matches!(
            CradleSimulation::new(config, crowded),
            Err(CradleError::OverlapAtRest { index: 1 })
        ));

        let bad_config = SimulationConfig { damping: -1.0, ..Default::default() };
        assert!(matches!(
            CradleSimulation::new(bad_config, pair(0.0, 0.0, &config)),
            Err(CradleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_displaced_start_may_overlap() {
        // Only the rest positions are checked; a launched body may start
        // inside its neighbour.
        let config = SimulationConfig::default();
        assert!(CradleSimulation::new(config, pair(0.3, 0.0, &config)).is_ok());
    }

    #[test]
    fn test_single_body_never_collides() {
        let config = SimulationConfig::default();
        let body = PendulumBody::new(Vec2::ZERO, 10.0, -1.0, 200.0, ColorTag::default(), &config)
            .unwrap();
        let mut sim = CradleSimulation::new(config, vec![body]).unwrap();
        for _ in 0..500 {
            sim.tick();
            assert!(sim.contacts().is_empty());
        }
        assert_eq!(sim.ticks(), 500);
        assert_eq!(sim.len(), 1);
    }

    #[test]
    fn test_both_sides_checks_each_pair_twice() {
        let config = SimulationConfig::default();
        let mut sim = CradleSimulation::new(config, pair(0.2, 0.0, &config)).unwrap();
        sim.tick();

        let contacts = sim.contacts();
        assert_eq!(contacts.len(), 2);
        assert_eq!((contacts[0].body_a_idx, contacts[0].body_b_idx), (0, 1));
        assert_eq!((contacts[1].body_a_idx, contacts[1].body_b_idx), (1, 0));
        assert!(contacts.iter().all(|c| c.outcome == ContactOutcome::NearRest));
    }

    #[test]
    fn test_unique_pairs_checks_each_pair_once() {
        let config = SimulationConfig { sweep: PairSweep::UniquePairs, ..Default::default() };
        let mut sim = CradleSimulation::new(config, pair(0.2, 0.0, &config)).unwrap();
        sim.tick();

        assert_eq!(sim.contacts().len(), 1);
        assert_eq!(sim.contacts()[0].body_a_idx, 0);
        assert_eq!(sim.contacts()[0].body_b_idx, 1);
    }

    fn colliding_pair(sweep: PairSweep) -> CradleSimulation {
        let config = SimulationConfig { sweep, ..Default::default() };
        let mut bodies = pair(0.3, -0.1, &config);
        bodies[0].angular_velocity = 0.05;
        bodies[1].angular_velocity = -0.05;
        CradleSimulation::new(config, bodies).unwrap()
    }

    #[test]
    fn test_both_sides_can_undo_a_deep_collision() {
        // Still overlapping after the first exchange, so the reverse check
        // exchanges the velocities right back.
        let mut sim = colliding_pair(PairSweep::BothSides);
        sim.tick();

        assert_eq!(sim.contacts().len(), 2);
        assert!(sim.contacts().iter().all(ContactEvent::was_resolved));
        assert!(sim.bodies()[0].angular_velocity > 0.0);
        assert!(sim.bodies()[1].angular_velocity < 0.0);
    }

    #[test]
    fn test_unique_pairs_exchanges_once() {
        let mut sim = colliding_pair(PairSweep::UniquePairs);
        sim.tick();

        assert_eq!(sim.contacts().len(), 1);
        assert!(sim.contacts()[0].was_resolved());
        assert!(sim.bodies()[0].angular_velocity < 0.0);
        assert!(sim.bodies()[1].angular_velocity > 0.0);
    }

    #[test]
    fn test_momentum_preserved_across_resolution() {
        let mut sim = colliding_pair(PairSweep::UniquePairs);
        // Compare against the momentum right after integration.
        let mut integrated = sim.clone();
        for body in integrated.bodies.iter_mut() {
            integrator::integrate(body, &integrated.config);
        }
        sim.tick();
        assert!((sim.total_momentum() - integrated.total_momentum()).abs() < 1e-9);
    }

    #[test]
    fn test_resolved_bodies_match_projection() {
        let mut sim = colliding_pair(PairSweep::UniquePairs);
        sim.tick();
        for body in sim.bodies() {
            assert_eq!(body.location(), body.projected_location());
        }
    }

    #[test]
    fn test_from_layout() {
        let sim = CradleSimulation::from_layout(SimulationConfig::default(), &CradleLayout::default())
            .unwrap();
        assert_eq!(sim.len(), 5);
        assert!(!sim.is_empty());
        assert_eq!(sim.body(0).map(PendulumBody::theta), Some(-1.0));
        assert!(sim.body(5).is_none());
        assert_eq!(sim.kinetic_energy(), 0.0);
    }

    #[test]
    fn test_from_layout_rejects_overlapping_gap() {
        let layout = CradleLayout { gap: -5.0, ..Default::default() };
        assert!(matches!(
            CradleSimulation::from_layout(SimulationConfig::default(), &layout),
            Err(CradleError::OverlapAtRest { index: 0 })
        ));
    }

    #[test]
    fn test_body_pair_mut_order() {
        let config = SimulationConfig::default();
        let mut bodies = pair(0.0, 0.0, &config);
        let (a, b) = body_pair_mut(&mut bodies, 1, 0);
        assert_eq!(a.pivot().x, 42.0);
        assert_eq!(b.pivot().x, 0.0);
    }
}
