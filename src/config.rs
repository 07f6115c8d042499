use std::time::Duration;

/// Timing thresholds of the inference engine and the relay sequencer.
///
/// The defaults are the values the gate controller this was written for
/// needs; all of them can be overridden at construction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Config {
    /// Quiet time after which the resting level is trusted as a terminal
    /// position.
    pub stable_threshold: Duration,
    /// Expected half-period of the status line while the gate is closing.
    pub flash_interval_closing: Duration,
    /// Expected half-period of the status line while the gate is opening.
    pub flash_interval_opening: Duration,
    /// Symmetric tolerance applied when matching measured half-periods.
    pub hysteresis: Duration,
    /// Time the relay is held high for one tap.
    pub pulse_width: Duration,
    /// Pause between taps of a multi-tap sequence.
    pub pulse_gap: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stable_threshold: Duration::from_millis(1000),
            flash_interval_closing: Duration::from_millis(150),
            flash_interval_opening: Duration::from_millis(300),
            hysteresis: Duration::from_millis(50),
            pulse_width: Duration::from_millis(500),
            pulse_gap: Duration::from_millis(500),
        }
    }
}

impl Config {
    /// The closing and opening windows must not overlap under the
    /// configured hysteresis, or classification is ambiguous.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.pulse_width.is_zero(), "pulse width must be non-zero");
        anyhow::ensure!(!self.pulse_gap.is_zero(), "pulse gap must be non-zero");

        let closing = self.flash_interval_closing;
        let opening = self.flash_interval_opening;
        anyhow::ensure!(!closing.is_zero(), "closing flash interval must be non-zero");
        anyhow::ensure!(!opening.is_zero(), "opening flash interval must be non-zero");

        let spread = if closing > opening {
            closing - opening
        } else {
            opening - closing
        };
        anyhow::ensure!(
            spread > self.hysteresis * 2,
            "closing and opening flash windows overlap under hysteresis"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_overlapping_windows_rejected() {
        let config = Config {
            flash_interval_closing: Duration::from_millis(150),
            flash_interval_opening: Duration::from_millis(200),
            hysteresis: Duration::from_millis(50),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_touching_windows_rejected() {
        // 150+50 == 300-100: the window edges meet, which still makes a
        // boundary value match both patterns.
        let config = Config {
            hysteresis: Duration::from_millis(75),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_pulse_width_rejected() {
        let config = Config {
            pulse_width: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
