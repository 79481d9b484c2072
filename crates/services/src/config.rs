use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::navigation::TextDirection;

/// Navigator settings, usually read from the `navigation` section of a course manifest.
///
/// Every field has a default so a partial (or missing) section is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// How long the enter animation runs before `settle()` is due.
    pub settle_delay_ms: u64,
    /// Drop navigation requests until the enter animation has settled.
    pub lock_during_settle: bool,
    /// Minimum horizontal travel, in pixels, for a swipe to count.
    pub swipe_threshold: f64,
    pub text_direction: TextDirection,
    pub next_caption: String,
    /// Caption on the advance control while the last slide is showing.
    pub finish_caption: String,
}

impl NavigatorConfig {
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 400,
            lock_during_settle: false,
            swipe_threshold: 50.0,
            text_direction: TextDirection::Ltr,
            next_caption: "Next".to_string(),
            finish_caption: "Complete".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let config: NavigatorConfig =
            serde_json::from_str(r#"{"text_direction":"rtl","finish_caption":"Done"}"#).unwrap();
        assert_eq!(config.text_direction, TextDirection::Rtl);
        assert_eq!(config.finish_caption, "Done");
        assert_eq!(config.next_caption, "Next");
        assert_eq!(config.settle_delay(), Duration::from_millis(400));
    }
}
