use std::time::Duration;

use crate::app::signal::Cycle;
use crate::config::Config;

/// Transient motion classification derived from the flash pattern.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Motion {
    Opening,
    Closing,
}

/// Matches measured status-line cycles against the two known flash
/// patterns: a fast toggle while closing, a slow one while opening.
pub struct PatternClassifier {
    closing: Duration,
    opening: Duration,
    hysteresis: Duration,
}

impl PatternClassifier {
    pub fn new(config: &Config) -> Self {
        Self {
            closing: config.flash_interval_closing,
            opening: config.flash_interval_opening,
            hysteresis: config.hysteresis,
        }
    }

    /// Both half-intervals of the cycle must fall into the same reference
    /// window. Anything else is no new information.
    pub fn classify(&self, cycle: &Cycle) -> Option<Motion> {
        if self.matches(cycle, self.closing) {
            Some(Motion::Closing)
        } else if self.matches(cycle, self.opening) {
            Some(Motion::Opening)
        } else {
            None
        }
    }

    fn matches(&self, cycle: &Cycle, reference: Duration) -> bool {
        within_band(cycle.high, reference, self.hysteresis)
            && within_band(cycle.low, reference, self.hysteresis)
    }
}

/// Inclusive on both bounds: a value exactly at reference ± tolerance
/// still matches.
fn within_band(value: Duration, reference: Duration, tolerance: Duration) -> bool {
    value >= reference.saturating_sub(tolerance) && value <= reference + tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(high: u64, low: u64) -> Cycle {
        Cycle {
            high: Duration::from_millis(high),
            low: Duration::from_millis(low),
        }
    }

    fn classifier() -> PatternClassifier {
        PatternClassifier::new(&Config::default())
    }

    #[test]
    fn test_closing_pattern() {
        assert_eq!(classifier().classify(&cycle(150, 150)), Some(Motion::Closing));
    }

    #[test]
    fn test_opening_pattern() {
        assert_eq!(classifier().classify(&cycle(300, 300)), Some(Motion::Opening));
    }

    #[test]
    fn test_band_bounds_are_inclusive() {
        let classifier = classifier();
        assert_eq!(classifier.classify(&cycle(100, 200)), Some(Motion::Closing));
        assert_eq!(classifier.classify(&cycle(250, 350)), Some(Motion::Opening));
    }

    #[test]
    fn test_just_outside_band_is_unclassified() {
        let classifier = classifier();
        assert_eq!(classifier.classify(&cycle(99, 150)), None);
        assert_eq!(classifier.classify(&cycle(150, 201)), None);
        assert_eq!(classifier.classify(&cycle(351, 300)), None);
    }

    #[test]
    fn test_mixed_halves_are_unclassified() {
        // One half in the closing window, the other in the opening window.
        assert_eq!(classifier().classify(&cycle(150, 300)), None);
    }

    #[test]
    fn test_noise_is_unclassified() {
        assert_eq!(classifier().classify(&cycle(500, 20)), None);
        assert_eq!(classifier().classify(&cycle(0, 0)), None);
    }
}
