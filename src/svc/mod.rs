pub use clock::Clock;
pub use clock::Instant;

use crate::app::SystemState;

pub mod clock;

/// Outward push towards the accessory binding that exposes the gate to a
/// remote controller.
pub trait Reporter {
    fn set_system_state(&self, state: &SystemState);
}
