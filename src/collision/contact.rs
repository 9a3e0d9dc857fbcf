/// What the resolver did with a pair of touching bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// Tangential velocities were already within the near-rest threshold,
    /// nothing was changed.
    NearRest,
    /// Velocities were exchanged with the elastic formula.
    Resolved {
        /// Tangential velocities after the exchange, for A and B.
        velocity_a: f64,
        velocity_b: f64,
    },
}

/// Stores information about one contact found during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    /// Index of the body the check was made from.
    pub body_a_idx: usize,
    /// Index of the neighbour it was checked against.
    pub body_b_idx: usize,
    /// Distance between the two locations when contact was detected.
    pub distance: f64,
    /// Tangential velocities before resolution, for A and B.
    pub incoming_a: f64,
    pub incoming_b: f64,
    pub outcome: ContactOutcome,
}

impl ContactEvent {
    pub fn was_resolved(&self) -> bool {
        matches!(self.outcome, ContactOutcome::Resolved { .. })
    }
}
