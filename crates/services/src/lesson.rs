//! Lesson lifecycle: ties slide navigation to the host session.
//!
//! The controller opens the session, restores the learner's bookmark, persists the
//! position on every slide change, marks completion when the learner advances past
//! the last slide, and closes the session on unload. Host failures never interrupt
//! the lesson; they are logged and the lesson carries on without persistence.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use course_core::{Clock, Interaction, InteractionResult, LessonStatus, Score, SessionDuration, SlideBookmark};
use runtime::{Outcome, SessionBridge};
use tracing::{debug, info, warn};

use crate::config::NavigatorConfig;
use crate::error::LessonError;
use crate::navigation::{
    Control, IgnoreReason, NavCommand, NavOutcome, SlideController, SlideSurface, classify_swipe,
    command_for_key,
};

/// Side effects a lesson wants on top of persistence, such as sounds or confetti.
///
/// Every method defaults to doing nothing.
pub trait LessonEffects {
    fn slide_changed(&mut self, _index: usize, _total: usize) {}
    fn lesson_completed(&mut self) {}
    fn answer_correct(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl LessonEffects for NoEffects {}

pub struct LessonController<S: SlideSurface> {
    bridge: SessionBridge,
    nav: SlideController<S>,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed: bool,
    next_interaction: usize,
    effects: Box<dyn LessonEffects>,
}

impl<S: SlideSurface> LessonController<S> {
    /// Opens the session and positions the deck at the stored bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`LessonError::Navigation`] when the surface has no slides.
    pub fn start(
        mut bridge: SessionBridge,
        surface: S,
        config: NavigatorConfig,
        clock: Clock,
    ) -> Result<Self, LessonError> {
        let opened = bridge.initialize();
        if let Some(rejection) = opened.rejection() {
            warn!(%rejection, "session did not open; progress will not be saved");
        }

        let nav = SlideController::new(surface, config)?;
        let next_interaction = bridge.interaction_count();
        let mut lesson = Self {
            bridge,
            nav,
            clock,
            started_at: clock.now(),
            completed: false,
            next_interaction,
            effects: Box::new(NoEffects),
        };

        if let Some(index) = lesson.resume() {
            info!(slide = index, "resumed from bookmark");
        }
        Ok(lesson)
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl LessonEffects + 'static) -> Self {
        self.effects = Box::new(effects);
        self
    }

    fn resume(&mut self) -> Option<usize> {
        let raw = self.bridge.bookmark();
        let bookmark = SlideBookmark::decode(&raw)?;
        if bookmark.index() == 0 {
            return None;
        }
        match self.nav.resume_from(bookmark.index()) {
            outcome @ NavOutcome::Moved { to, .. } => {
                self.apply(outcome);
                Some(to)
            }
            _ => {
                debug!(bookmark = %raw, "bookmark outside the deck; starting at the beginning");
                None
            }
        }
    }

    // ─── Navigation ────────────────────────────────────────────────────────────

    pub fn dispatch(&mut self, command: NavCommand) -> NavOutcome {
        if self.completed && command == NavCommand::Advance && self.nav.is_at_end() {
            return NavOutcome::Ignored(IgnoreReason::Locked);
        }
        let outcome = self.nav.handle(command);
        self.apply(outcome)
    }

    pub fn press(&mut self, control: Control) -> NavOutcome {
        self.dispatch(control.into())
    }

    pub fn key(&mut self, key: &str) -> Option<NavOutcome> {
        command_for_key(key).map(|command| self.dispatch(command))
    }

    pub fn swipe(&mut self, dx: f64, dy: f64) -> Option<NavOutcome> {
        let config = self.nav.config();
        classify_swipe(dx, dy, config.swipe_threshold, config.text_direction)
            .map(|command| self.dispatch(command))
    }

    pub fn go_to(&mut self, index: usize) -> NavOutcome {
        let outcome = self.nav.go_to(index);
        self.apply(outcome)
    }

    pub fn settle(&mut self) -> Option<usize> {
        self.nav.settle()
    }

    #[must_use]
    pub fn settle_delay(&self) -> Option<Duration> {
        self.nav.settle_delay()
    }

    fn apply(&mut self, outcome: NavOutcome) -> NavOutcome {
        match outcome {
            NavOutcome::Moved { to, .. } => {
                self.persist_position(to);
                self.effects.slide_changed(to, self.nav.total());
                if self.completed && self.nav.is_at_end() {
                    self.lock_finish_control();
                }
            }
            NavOutcome::Completed => self.finish(),
            NavOutcome::Ignored(_) => {}
        }
        outcome
    }

    fn persist_position(&self, index: usize) {
        let saved = self
            .bridge
            .set_bookmark(&SlideBookmark::new(index).encode())
            .and(self.bridge.commit());
        log_rejection("bookmark", &saved);
    }

    fn finish(&mut self) {
        let elapsed = self.elapsed();
        let saved = self
            .bridge
            .set_session_time(elapsed)
            .and(self.bridge.set_lesson_status(LessonStatus::Completed))
            .and(self.bridge.commit());
        log_rejection("completion", &saved);

        self.completed = true;
        info!(seconds = elapsed.as_secs(), "lesson completed");
        self.effects.lesson_completed();
        self.lock_finish_control();
    }

    fn lock_finish_control(&mut self) {
        let chrome = self.nav.chrome().with_next_disabled();
        self.nav.surface_mut().render_chrome(&chrome);
    }

    // ─── Assessment ────────────────────────────────────────────────────────────

    /// Appends `interaction` after the ones already stored on the host.
    pub fn record_interaction(&mut self, interaction: &Interaction) -> Outcome {
        let index = self.next_interaction;
        let outcome = self
            .bridge
            .record_interaction(index, interaction)
            .and(self.bridge.commit());
        if outcome.is_success() {
            self.next_interaction += 1;
        }
        log_rejection("interaction", &outcome);

        if interaction.result == InteractionResult::Correct {
            self.effects.answer_correct();
        }
        outcome
    }

    pub fn set_score(&self, score: &Score) -> Outcome {
        let outcome = self.bridge.set_score(score).and(self.bridge.commit());
        log_rejection("score", &outcome);
        outcome
    }

    pub fn set_status(&self, status: LessonStatus) -> Outcome {
        let outcome = self
            .bridge
            .set_lesson_status(status)
            .and(self.bridge.commit());
        log_rejection("status", &outcome);
        outcome
    }

    // ─── Shutdown ──────────────────────────────────────────────────────────────

    /// Saves time and position, then closes the session. Later calls do nothing.
    pub fn unload(&mut self) -> Outcome {
        if self.bridge.is_terminated() {
            return Outcome::Unchanged;
        }
        let elapsed = self.elapsed();
        let outcome = self
            .bridge
            .set_session_time(elapsed)
            .and(
                self.bridge
                    .set_bookmark(&SlideBookmark::new(self.nav.current_index()).encode()),
            )
            .and(self.bridge.commit())
            .and(self.bridge.terminate());
        log_rejection("unload", &outcome);
        outcome
    }

    // ─── Queries ───────────────────────────────────────────────────────────────

    #[must_use]
    pub fn elapsed(&self) -> SessionDuration {
        self.clock.elapsed_since(self.started_at)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.nav.current_index()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.nav.total()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn bridge(&self) -> &SessionBridge {
        &self.bridge
    }

    #[must_use]
    pub fn navigator(&self) -> &SlideController<S> {
        &self.nav
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        self.nav.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.nav.surface_mut()
    }

    pub fn into_surface(self) -> S {
        self.nav.into_surface()
    }

    /// Mutable access to the session clock; only meaningful for a fixed clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

fn log_rejection(what: &str, outcome: &Outcome) {
    if let Some(rejection) = outcome.rejection() {
        warn!(%rejection, "could not save {what}");
    }
}

impl<S: SlideSurface> fmt::Debug for LessonController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LessonController")
            .field("bridge", &self.bridge)
            .field("nav", &self.nav)
            .field("completed", &self.completed)
            .field("next_interaction", &self.next_interaction)
            .finish_non_exhaustive()
    }
}
