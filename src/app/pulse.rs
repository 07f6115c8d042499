use std::time::Duration;

use crate::config::Config;
use crate::hal::status_line::Level;
use crate::svc::Instant;

/// Timed relay tap sequence advanced from the poll tick, so actuation
/// never blocks status-line sampling. One tap holds the relay HIGH for
/// the pulse width, then returns it LOW; taps are separated by the
/// pulse gap.
pub struct PulseTrain {
    width: Duration,
    gap: Duration,
    pending: Option<Train>,
    last_written: Level,
}

struct Train {
    /// Relay writes still to perform. Trains always end with a LOW write.
    toggles_left: u8,
    next_level: Level,
    deadline: Instant,
}

impl PulseTrain {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.pulse_width,
            gap: config.pulse_gap,
            pending: None,
            last_written: Level::Low,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules `taps` relay pulses starting immediately. A train still
    /// in flight is replaced, newest wins; if it left the relay HIGH the
    /// new train first returns it LOW so the controller sees clean taps.
    pub fn start(&mut self, taps: u8, now: Instant) {
        if self.pending.is_some() {
            log::warn!("relay actuation already in flight; replaced by newest request");
        }

        let mut toggles_left = taps * 2;
        if self.last_written == Level::High {
            toggles_left += 1;
        }

        self.pending = Some(Train {
            toggles_left,
            next_level: self.last_written.toggled(),
            deadline: now,
        });
    }

    /// Performs at most one due relay write per tick. Returns the level
    /// to write, if its deadline has passed.
    pub fn advance(&mut self, now: Instant) -> Option<Level> {
        let train = self.pending.as_mut()?;
        if now < train.deadline {
            return None;
        }

        let level = train.next_level;
        train.toggles_left -= 1;
        train.next_level = level.toggled();
        train.deadline = now
            + match level {
                Level::High => self.width,
                Level::Low => self.gap,
            };

        if train.toggles_left == 0 {
            self.pending = None;
        }

        self.last_written = level;
        Some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(t: u32) -> Instant {
        Instant::from_millis(t)
    }

    fn train() -> PulseTrain {
        PulseTrain::new(&Config::default())
    }

    #[test]
    fn test_single_tap() {
        let mut train = train();
        train.start(1, ms(0));
        assert!(train.in_flight());

        assert_eq!(train.advance(ms(0)), Some(Level::High));
        assert_eq!(train.advance(ms(100)), None);
        assert_eq!(train.advance(ms(499)), None);
        assert_eq!(train.advance(ms(500)), Some(Level::Low));
        assert!(!train.in_flight());
        assert_eq!(train.advance(ms(600)), None);
    }

    #[test]
    fn test_double_tap_is_four_writes() {
        let mut train = train();
        train.start(2, ms(0));

        let mut writes = vec![];
        for t in (0..=2000).step_by(20) {
            if let Some(level) = train.advance(ms(t)) {
                writes.push((t, level));
            }
        }

        assert_eq!(
            writes,
            vec![
                (0, Level::High),
                (500, Level::Low),
                (1000, Level::High),
                (1500, Level::Low),
            ]
        );
        assert!(!train.in_flight());
    }

    #[test_log::test]
    fn test_replacement_returns_relay_low_first() {
        let mut train = train();
        train.start(1, ms(0));
        assert_eq!(train.advance(ms(0)), Some(Level::High));

        // Newest request wins while the relay is still held HIGH.
        train.start(1, ms(100));
        assert_eq!(train.advance(ms(100)), Some(Level::Low));
        assert_eq!(train.advance(ms(300)), None);
        assert_eq!(train.advance(ms(600)), Some(Level::High));
        assert_eq!(train.advance(ms(1100)), Some(Level::Low));
        assert!(!train.in_flight());
    }

    #[test]
    fn test_replacement_after_completed_tap_starts_clean() {
        let mut train = train();
        train.start(1, ms(0));
        assert_eq!(train.advance(ms(0)), Some(Level::High));
        assert_eq!(train.advance(ms(500)), Some(Level::Low));

        train.start(2, ms(2000));
        assert_eq!(train.advance(ms(2000)), Some(Level::High));
        assert_eq!(train.advance(ms(2500)), Some(Level::Low));
        assert_eq!(train.advance(ms(3000)), Some(Level::High));
        assert_eq!(train.advance(ms(3500)), Some(Level::Low));
        assert!(!train.in_flight());
    }
}
