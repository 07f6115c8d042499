use std::time::Duration;

use crate::hal::status_line::Level;
use crate::svc::Instant;

/// One full period of the status line: the most recent HIGH and LOW
/// half-intervals, both measured since the previous cycle was emitted.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Cycle {
    pub high: Duration,
    pub low: Duration,
}

/// Watches the raw status line for level transitions and records how long
/// the line stayed at each level.
pub struct EdgeTracker {
    last_level: Level,
    last_change: Instant,
    high: Duration,
    low: Duration,
    high_fresh: bool,
    low_fresh: bool,
}

impl EdgeTracker {
    pub fn new(now: Instant) -> Self {
        Self {
            last_level: Level::Low,
            last_change: now,
            high: Duration::ZERO,
            low: Duration::ZERO,
            high_fresh: false,
            low_fresh: false,
        }
    }

    /// Records a level transition, if any. Returns a cycle only once both
    /// half-intervals have been measured since the last emitted cycle, so
    /// a fresh half is never paired with a stale one.
    pub fn observe(&mut self, level: Level, now: Instant) -> Option<Cycle> {
        if level == self.last_level {
            return None;
        }

        let elapsed = now.elapsed_since(self.last_change);
        self.last_change = now;
        self.last_level = level;

        match level {
            Level::High => {
                self.low = elapsed;
                self.low_fresh = true;
            }
            Level::Low => {
                self.high = elapsed;
                self.high_fresh = true;
            }
        }

        if self.high_fresh && self.low_fresh {
            self.high_fresh = false;
            self.low_fresh = false;
            Some(Cycle {
                high: self.high,
                low: self.low,
            })
        } else {
            None
        }
    }

    pub fn resting_level(&self) -> Level {
        self.last_level
    }

    /// Time since the last observed transition.
    pub fn quiet_time(&self, now: Instant) -> Duration {
        now.elapsed_since(self.last_change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(t: u32) -> Instant {
        Instant::from_millis(t)
    }

    #[test]
    fn test_unchanged_level_is_ignored() {
        let mut tracker = EdgeTracker::new(ms(0));
        assert_eq!(tracker.observe(Level::Low, ms(100)), None);
        assert_eq!(tracker.resting_level(), Level::Low);
        assert_eq!(tracker.quiet_time(ms(300)), Duration::from_millis(300));
    }

    #[test]
    fn test_edge_resets_quiet_time() {
        let mut tracker = EdgeTracker::new(ms(0));
        tracker.observe(Level::High, ms(200));
        assert_eq!(tracker.resting_level(), Level::High);
        assert_eq!(tracker.quiet_time(ms(250)), Duration::from_millis(50));
    }

    #[test]
    fn test_first_two_edges_form_the_first_cycle() {
        let mut tracker = EdgeTracker::new(ms(0));
        assert_eq!(tracker.observe(Level::High, ms(100)), None);
        assert_eq!(
            tracker.observe(Level::Low, ms(250)),
            Some(Cycle {
                high: Duration::from_millis(150),
                low: Duration::from_millis(100),
            })
        );
    }

    #[test]
    fn test_one_cycle_per_full_period() {
        let mut tracker = EdgeTracker::new(ms(0));
        tracker.observe(Level::High, ms(100));
        assert!(tracker.observe(Level::Low, ms(250)).is_some());

        // A lone refreshed half does not emit against the stale other half.
        assert_eq!(tracker.observe(Level::High, ms(400)), None);
        assert_eq!(
            tracker.observe(Level::Low, ms(550)),
            Some(Cycle {
                high: Duration::from_millis(150),
                low: Duration::from_millis(150),
            })
        );
    }
}
