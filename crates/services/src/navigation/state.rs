/// Transition phase of the navigator, overlaid on the current slide index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// Ready for the next request.
    Idle,
    /// Inside the synchronous part of a transition, hooks included.
    Transitioning { from: usize, to: usize },
    /// `slide` is playing its enter animation until `settle()` runs.
    Settling { slide: usize },
}

impl NavState {
    /// Whether a new transition may start from this phase.
    #[must_use]
    pub fn accepts_requests(self, lock_during_settle: bool) -> bool {
        match self {
            NavState::Idle => true,
            NavState::Transitioning { .. } => false,
            NavState::Settling { .. } => !lock_during_settle,
        }
    }
}

/// Why a navigation request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another transition owns the navigator.
    Busy,
    /// Retreat on the first slide.
    AtStart,
    OutOfRange,
    AlreadyCurrent,
    /// The caller has locked advancing past the finished lesson.
    Locked,
}

/// Result of one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved { from: usize, to: usize, animated: bool },
    /// Advance was requested on the last slide.
    Completed,
    Ignored(IgnoreReason),
}

impl NavOutcome {
    #[must_use]
    pub fn moved_to(&self) -> Option<usize> {
        match self {
            NavOutcome::Moved { to, .. } => Some(*to),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, NavOutcome::Ignored(_))
    }
}
