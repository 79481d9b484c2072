use services::NavChrome;

/// Number of cells in the text progress bar.
pub const PROGRESS_WIDTH: usize = 10;

/// Text-ready navigation chrome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChromeVm {
    pub progress_bar: String,
    pub indicator: String,
    pub prev: String,
    pub next: String,
}

impl ChromeVm {
    #[must_use]
    pub fn from_chrome(chrome: &NavChrome) -> Self {
        let prev = if chrome.prev_enabled {
            "< Prev".to_owned()
        } else {
            "  Prev".to_owned()
        };
        let next = if chrome.next_enabled {
            format!("{} >", chrome.next_label)
        } else {
            format!("{}  ", chrome.next_label)
        };
        Self {
            progress_bar: progress_bar(chrome.progress(), PROGRESS_WIDTH),
            indicator: chrome.indicator(),
            prev,
            next,
        }
    }

    /// Full chrome line, e.g. `[###-------] 3 / 10  < Prev | Next >`.
    #[must_use]
    pub fn line(&self) -> String {
        format!(
            "{} {}  {} | {}",
            self.progress_bar, self.indicator, self.prev, self.next
        )
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use services::NavigatorConfig;

    use super::*;

    #[test]
    fn renders_middle_of_deck() {
        let chrome = NavChrome::at(2, 10, &NavigatorConfig::default());
        assert_eq!(
            ChromeVm::from_chrome(&chrome).line(),
            "[###-------] 3 / 10  < Prev | Next >"
        );
    }

    #[test]
    fn marks_disabled_controls() {
        let first = NavChrome::at(0, 2, &NavigatorConfig::default());
        assert_eq!(ChromeVm::from_chrome(&first).prev, "  Prev");

        let locked = NavChrome::at(1, 2, &NavigatorConfig::default()).with_next_disabled();
        let vm = ChromeVm::from_chrome(&locked);
        assert_eq!(vm.next, "Complete  ");
        assert_eq!(vm.progress_bar, "[##########]");
    }
}
