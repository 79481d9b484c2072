use serde::{Deserialize, Serialize};

/// Whole-second session or latency duration.
///
/// The two host dialects disagree on the wire format, so this type only
/// renders; it never parses host timespans back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SessionDuration(u64);

impl SessionDuration {
    #[must_use]
    pub fn from_secs(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Converts a signed `chrono` duration, clamping negatives to zero.
    #[must_use]
    pub fn from_chrono(delta: chrono::Duration) -> Self {
        Self(u64::try_from(delta.num_seconds()).unwrap_or(0))
    }

    /// Rounds milliseconds to the nearest whole second.
    #[must_use]
    pub fn from_millis_rounded(millis: u64) -> Self {
        Self(millis.saturating_add(500) / 1000)
    }

    #[must_use]
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    fn parts(self) -> (u64, u64, u64) {
        (self.0 / 3600, (self.0 % 3600) / 60, self.0 % 60)
    }

    /// `HH:MM:SS`, each part zero-padded to two digits. Hours may grow wider.
    #[must_use]
    pub fn clock_time(&self) -> String {
        let (h, m, s) = self.parts();
        format!("{h:02}:{m:02}:{s:02}")
    }

    /// `PT{h}H{m}M{s}S` with no padding.
    #[must_use]
    pub fn iso8601(&self) -> String {
        let (h, m, s) = self.parts();
        format!("PT{h}H{m}M{s}S")
    }
}
