use chrono::{DateTime, Duration, Utc};

use crate::model::SessionDuration;

/// Wall clock used to time learner sessions; fixed in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Advance a fixed clock. No effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Whole seconds elapsed since `started_at`, never negative.
    #[must_use]
    pub fn elapsed_since(&self, started_at: DateTime<Utc>) -> SessionDuration {
        SessionDuration::from_chrono(self.now() - started_at)
    }
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_follows_fixed_clock() {
        let mut clock = fixed_clock();
        let start = clock.now();
        clock.advance(Duration::seconds(3725));
        assert_eq!(clock.elapsed_since(start).as_secs(), 3725);
    }

    #[test]
    fn elapsed_is_clamped_for_future_start() {
        let clock = fixed_clock();
        let later = clock.now() + Duration::seconds(10);
        assert_eq!(clock.elapsed_since(later).as_secs(), 0);
    }
}
