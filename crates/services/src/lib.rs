#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod lesson;
pub mod navigation;

pub use course_core::Clock;

pub use config::NavigatorConfig;
pub use error::{LessonError, NavigationError};
pub use lesson::{LessonController, LessonEffects, NoEffects};
pub use navigation::{
    Control, IgnoreReason, NavChrome, NavCommand, NavOutcome, NavState, NextCaption,
    RecordingSurface, SlideController, SlideSurface, SwipeTracker, TextDirection,
};
