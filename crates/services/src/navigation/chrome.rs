use crate::config::NavigatorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextCaption {
    Next,
    /// Shown on the last slide, where advancing completes the lesson.
    Finish,
}

/// Derived state of the navigation controls for one slide position.
#[derive(Debug, Clone, PartialEq)]
pub struct NavChrome {
    /// 1-based position of the active slide.
    pub position: usize,
    pub total: usize,
    pub prev_enabled: bool,
    pub next_caption: NextCaption,
    pub next_label: String,
    pub next_enabled: bool,
}

impl NavChrome {
    #[must_use]
    pub fn at(index: usize, total: usize, config: &NavigatorConfig) -> Self {
        let is_last = index + 1 >= total;
        let (next_caption, next_label) = if is_last {
            (NextCaption::Finish, config.finish_caption.clone())
        } else {
            (NextCaption::Next, config.next_caption.clone())
        };
        Self {
            position: index + 1,
            total,
            prev_enabled: index > 0,
            next_caption,
            next_label,
            next_enabled: true,
        }
    }

    /// Page indicator text, e.g. `"3 / 10"`.
    #[must_use]
    pub fn indicator(&self) -> String {
        format!("{} / {}", self.position, self.total)
    }

    /// Fraction of the sequence reached, in `(0, 1]`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.position as f64 / self.total as f64
    }

    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.progress() * 100.0
    }

    /// Same chrome with the advance control disabled.
    #[must_use]
    pub fn with_next_disabled(mut self) -> Self {
        self.next_enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_slide_disables_prev() {
        let chrome = NavChrome::at(0, 4, &NavigatorConfig::default());
        assert!(!chrome.prev_enabled);
        assert!(chrome.next_enabled);
        assert_eq!(chrome.next_caption, NextCaption::Next);
        assert_eq!(chrome.indicator(), "1 / 4");
        assert!((chrome.progress() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn last_slide_uses_finish_caption() {
        let config = NavigatorConfig {
            finish_caption: "Done".into(),
            ..NavigatorConfig::default()
        };
        let chrome = NavChrome::at(3, 4, &config);
        assert!(chrome.prev_enabled);
        assert_eq!(chrome.next_caption, NextCaption::Finish);
        assert_eq!(chrome.next_label, "Done");
        assert!(chrome.next_enabled);
        assert!((chrome.progress_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_slide_is_first_and_last() {
        let chrome = NavChrome::at(0, 1, &NavigatorConfig::default());
        assert!(!chrome.prev_enabled);
        assert_eq!(chrome.next_caption, NextCaption::Finish);
    }
}
