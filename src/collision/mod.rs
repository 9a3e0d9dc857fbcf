pub mod contact;
pub mod resolver;

// Re-export key types
pub use contact::{ContactEvent, ContactOutcome};
pub use resolver::{contact_distance, elastic_collision, in_contact, CollisionResolver};
