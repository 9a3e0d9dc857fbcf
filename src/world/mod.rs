pub mod cradle;
pub mod layout;

pub use cradle::CradleSimulation;
pub use layout::{CradleLayout, Launch};
