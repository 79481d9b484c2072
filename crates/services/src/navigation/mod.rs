mod chrome;
mod controller;
mod input;
mod state;
mod surface;

// Public API of the navigation subsystem.
pub use crate::error::NavigationError;
pub use chrome::{NavChrome, NextCaption};
pub use controller::SlideController;
pub use input::{Control, NavCommand, SwipeTracker, TextDirection, classify_swipe, command_for_key};
pub use state::{IgnoreReason, NavOutcome, NavState};
pub use surface::{RecordingSurface, SlideSurface};
