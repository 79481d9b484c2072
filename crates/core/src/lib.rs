#![forbid(unsafe_code)]

pub mod model;
pub mod time;

pub use model::{
    Interaction, InteractionKind, InteractionResult, LessonStatus, Score, ScoreError,
    SessionDuration, SlideBookmark,
};
pub use time::Clock;
