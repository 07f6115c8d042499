use std::time::Duration;

use crate::app::DoorState;
use crate::hal::status_line::Level;

/// Declares a terminal position once the status line has been quiet for
/// longer than the settle threshold. This is the only source of the
/// OPEN and CLOSED states.
pub struct StabilityMonitor {
    threshold: Duration,
}

impl StabilityMonitor {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    pub fn check(&self, resting: Level, quiet: Duration) -> Option<DoorState> {
        if quiet > self.threshold {
            Some(match resting {
                Level::Low => DoorState::Closed,
                Level::High => DoorState::Open,
            })
        } else {
            None
        }
    }
}
