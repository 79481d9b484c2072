use serde::{Deserialize, Serialize};

use crate::config::NavigatorConfig;

/// Direction-neutral navigation request produced by any input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Advance,
    Retreat,
}

/// On-screen navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Prev,
    Next,
}

impl From<Control> for NavCommand {
    fn from(control: Control) -> Self {
        match control {
            Control::Prev => NavCommand::Retreat,
            Control::Next => NavCommand::Advance,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Maps a key name to a command. Keys are not mirrored for right-to-left text.
#[must_use]
pub fn command_for_key(key: &str) -> Option<NavCommand> {
    match key {
        "ArrowRight" | "ArrowDown" => Some(NavCommand::Advance),
        "ArrowLeft" | "ArrowUp" => Some(NavCommand::Retreat),
        _ => None,
    }
}

/// Classifies a finished touch gesture.
///
/// Only predominantly horizontal gestures longer than `threshold` count. A leftward
/// swipe advances in left-to-right text and retreats in right-to-left text.
#[must_use]
pub fn classify_swipe(dx: f64, dy: f64, threshold: f64, direction: TextDirection) -> Option<NavCommand> {
    if dx.abs() <= threshold || dx.abs() <= dy.abs() {
        return None;
    }
    let leftward = dx < 0.0;
    let advance = match direction {
        TextDirection::Ltr => leftward,
        TextDirection::Rtl => !leftward,
    };
    Some(if advance {
        NavCommand::Advance
    } else {
        NavCommand::Retreat
    })
}

/// Pairs touch-start and touch-end points into swipe commands.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    origin: Option<(f64, f64)>,
    threshold: f64,
    direction: TextDirection,
}

impl SwipeTracker {
    #[must_use]
    pub fn new(threshold: f64, direction: TextDirection) -> Self {
        Self {
            origin: None,
            threshold,
            direction,
        }
    }

    #[must_use]
    pub fn from_config(config: &NavigatorConfig) -> Self {
        Self::new(config.swipe_threshold, config.text_direction)
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
    }

    /// Ends the gesture. Without a matching start nothing is produced.
    pub fn touch_end(&mut self, x: f64, y: f64) -> Option<NavCommand> {
        let (start_x, start_y) = self.origin.take()?;
        classify_swipe(x - start_x, y - start_y, self.threshold, self.direction)
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }
}
