mod bookmark;
mod duration;
mod interaction;
mod score;
mod status;

pub use bookmark::{BookmarkError, SlideBookmark};
pub use duration::SessionDuration;
pub use interaction::{Interaction, InteractionKind, InteractionResult};
pub use score::{Score, ScoreError};
pub use status::LessonStatus;
