use std::time::Duration;

#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Instant(u32);

impl Instant {
    pub fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    pub fn to_millis(&self) -> u32 {
        self.0
    }

    /// Time elapsed since an earlier instant; zero if `earlier` is not
    /// actually earlier.
    pub fn elapsed_since(&self, earlier: Instant) -> Duration {
        Duration::from_millis(u64::from(self.0.saturating_sub(earlier.0)))
    }
}

impl std::ops::Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant(self.0.saturating_add(rhs.as_millis() as u32))
    }
}

pub struct Clock {
    start: std::time::Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Clock {
    pub fn now(&self) -> Option<Instant> {
        let t = std::time::Instant::now().checked_duration_since(self.start)?;
        let t_ms = t.as_millis();

        // milliseconds, 32 bits, max 49 days
        if t_ms < (u32::MAX as u128) {
            Some(Instant(t_ms as u32))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_since() {
        let earlier = Instant::from_millis(100);
        let later = Instant::from_millis(350);
        assert_eq!(later.elapsed_since(earlier), Duration::from_millis(250));
    }

    #[test]
    fn test_elapsed_since_saturates() {
        let earlier = Instant::from_millis(100);
        let later = Instant::from_millis(350);
        assert_eq!(earlier.elapsed_since(later), Duration::ZERO);
    }

    #[test]
    fn test_add_duration() {
        let t = Instant::from_millis(100) + Duration::from_millis(500);
        assert_eq!(t, Instant::from_millis(600));
    }

    #[test]
    fn test_clock_starts_near_zero() {
        let clock = Clock::default();
        let now = clock.now().unwrap();
        assert!(now.to_millis() < 1000);
    }
}
