//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted while building the slide navigator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationError {
    #[error("slide deck has no slides")]
    EmptyDeck,
}

/// Errors emitted while starting a lesson.
///
/// Host failures are not errors here; they degrade to missing persistence.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}
