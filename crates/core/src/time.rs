use chrono::{DateTime, Duration, Utc};

/// Where the crate reads time from.
///
/// Card ids, gesture cooldowns, and replayed frame timestamps all flow from
/// a `Clock`, so a `Fixed` instance makes an entire review run repeatable.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// System time.
    #[default]
    Default,
    /// A pinned instant, movable only through [`Clock::advance`].
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// A clock backed by the operating system.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// A clock pinned to `at`.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// The current instant as this clock sees it.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Moves a fixed clock forward by `delta`. A default clock is unchanged.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(at) = self {
            *at += delta;
        }
    }
}

/// Seconds since the epoch behind [`fixed_now`] (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// The pinned instant the test suites share.
///
/// # Panics
///
/// Panics if [`FIXED_TEST_TIMESTAMP`] falls outside chrono's representable
/// range.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(FIXED_TEST_TIMESTAMP, 0).expect("epoch constant is in range")
}

/// A [`Clock`] already pinned to [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reads_back_its_timestamp() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), fixed_now());
    }

    #[test]
    fn advance_moves_a_fixed_clock_forward() {
        let mut clock = fixed_clock();
        clock.advance(Duration::milliseconds(1500));
        assert_eq!(clock.now(), fixed_now() + Duration::milliseconds(1500));
    }

    #[test]
    fn advance_leaves_a_default_clock_alone() {
        let mut clock = Clock::default_clock();
        clock.advance(Duration::milliseconds(1500));
        assert!(matches!(clock, Clock::Default));
    }
}
