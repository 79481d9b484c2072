use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::config::NavigatorConfig;
use crate::error::NavigationError;

use super::chrome::NavChrome;
use super::input::{Control, NavCommand, classify_swipe, command_for_key};
use super::state::{IgnoreReason, NavOutcome, NavState};
use super::surface::SlideSurface;

type SlideChangeHook = Box<dyn FnMut(usize, usize)>;
type CompleteHook = Box<dyn FnMut()>;

/// Drives a fixed, ordered deck of slides on a [`SlideSurface`].
///
/// Exactly one slide is active at a time and the active index is always in range.
/// Animated transitions leave the controller in [`NavState::Settling`] until
/// [`SlideController::settle`] is called, typically after [`SlideController::settle_delay`].
pub struct SlideController<S: SlideSurface> {
    surface: S,
    total: usize,
    current: usize,
    state: NavState,
    config: NavigatorConfig,
    on_slide_change: Option<SlideChangeHook>,
    on_complete: Option<CompleteHook>,
}

impl<S: SlideSurface> SlideController<S> {
    /// Takes over `surface` and shows the first slide without animation.
    ///
    /// No slide-change hook fires for this initial paint.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::EmptyDeck`] when the surface has no slides.
    pub fn new(surface: S, config: NavigatorConfig) -> Result<Self, NavigationError> {
        let total = surface.slide_count();
        if total == 0 {
            return Err(NavigationError::EmptyDeck);
        }

        let mut controller = Self {
            surface,
            total,
            current: 0,
            state: NavState::Idle,
            config,
            on_slide_change: None,
            on_complete: None,
        };
        controller.present(0, false);
        Ok(controller)
    }

    /// Registers a hook called with `(new_index, total)` inside every transition.
    #[must_use]
    pub fn on_slide_change(mut self, hook: impl FnMut(usize, usize) + 'static) -> Self {
        self.on_slide_change = Some(Box::new(hook));
        self
    }

    /// Registers a hook called when advance is requested on the last slide.
    #[must_use]
    pub fn on_complete(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    // ─── Requests ──────────────────────────────────────────────────────────────

    pub fn advance(&mut self) -> NavOutcome {
        if self.is_busy() {
            return self.ignore(IgnoreReason::Busy);
        }
        if self.current + 1 < self.total {
            return self.transition(self.current + 1, true);
        }

        debug!(slide = self.current, "advance on last slide");
        if let Some(hook) = self.on_complete.as_mut() {
            hook();
        }
        NavOutcome::Completed
    }

    pub fn retreat(&mut self) -> NavOutcome {
        if self.is_busy() {
            return self.ignore(IgnoreReason::Busy);
        }
        if self.current == 0 {
            return self.ignore(IgnoreReason::AtStart);
        }
        self.transition(self.current - 1, true)
    }

    pub fn go_to(&mut self, index: usize) -> NavOutcome {
        if self.is_busy() {
            return self.ignore(IgnoreReason::Busy);
        }
        if index >= self.total {
            return self.ignore(IgnoreReason::OutOfRange);
        }
        if index == self.current {
            return self.ignore(IgnoreReason::AlreadyCurrent);
        }
        self.transition(index, true)
    }

    /// Jumps straight to `index` without animation, e.g. to restore a bookmark.
    ///
    /// Unlike [`SlideController::go_to`], the current index is accepted and repainted.
    pub fn resume_from(&mut self, index: usize) -> NavOutcome {
        if self.is_busy() {
            return self.ignore(IgnoreReason::Busy);
        }
        if index >= self.total {
            return self.ignore(IgnoreReason::OutOfRange);
        }
        self.transition(index, false)
    }

    pub fn handle(&mut self, command: NavCommand) -> NavOutcome {
        match command {
            NavCommand::Advance => self.advance(),
            NavCommand::Retreat => self.retreat(),
        }
    }

    pub fn press(&mut self, control: Control) -> NavOutcome {
        self.handle(control.into())
    }

    /// Returns `None` for keys that carry no navigation meaning.
    pub fn handle_key(&mut self, key: &str) -> Option<NavOutcome> {
        command_for_key(key).map(|command| self.handle(command))
    }

    /// Handles a finished touch gesture of `(dx, dy)` pixels.
    pub fn handle_swipe(&mut self, dx: f64, dy: f64) -> Option<NavOutcome> {
        classify_swipe(dx, dy, self.config.swipe_threshold, self.config.text_direction)
            .map(|command| self.handle(command))
    }

    /// Ends the running enter animation. Returns the slide that settled, if any.
    pub fn settle(&mut self) -> Option<usize> {
        let NavState::Settling { slide } = self.state else {
            return None;
        };
        self.surface.end_animation(slide);
        self.state = NavState::Idle;
        Some(slide)
    }

    // ─── Queries ───────────────────────────────────────────────────────────────

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        self.state
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.current + 1 == self.total
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.state.accepts_requests(self.config.lock_during_settle)
    }

    /// Delay until `settle()` is due, while an animation is running.
    #[must_use]
    pub fn settle_delay(&self) -> Option<Duration> {
        matches!(self.state, NavState::Settling { .. }).then(|| self.config.settle_delay())
    }

    #[must_use]
    pub fn chrome(&self) -> NavChrome {
        NavChrome::at(self.current, self.total, &self.config)
    }

    #[must_use]
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    // ─── Internals ─────────────────────────────────────────────────────────────

    fn ignore(&self, reason: IgnoreReason) -> NavOutcome {
        debug!(?reason, slide = self.current, "navigation request ignored");
        NavOutcome::Ignored(reason)
    }

    fn transition(&mut self, to: usize, animate: bool) -> NavOutcome {
        let from = self.current;
        self.state = NavState::Transitioning { from, to };
        self.current = to;
        self.present(to, animate);

        debug!(from, to, animate, "slide transition");
        if let Some(hook) = self.on_slide_change.as_mut() {
            hook(to, self.total);
        }

        self.state = if animate {
            NavState::Settling { slide: to }
        } else {
            NavState::Idle
        };
        NavOutcome::Moved {
            from,
            to,
            animated: animate,
        }
    }

    fn present(&mut self, index: usize, animate: bool) {
        for other in (0..self.total).filter(|&i| i != index) {
            self.surface.hide_slide(other);
        }
        self.surface.show_slide(index, animate);
        let chrome = self.chrome();
        self.surface.render_chrome(&chrome);
    }
}

impl<S: SlideSurface> fmt::Debug for SlideController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideController")
            .field("current", &self.current)
            .field("total", &self.total)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::navigation::RecordingSurface;

    fn controller(slides: usize) -> SlideController<RecordingSurface> {
        SlideController::new(RecordingSurface::new(slides), NavigatorConfig::default()).unwrap()
    }

    #[test]
    fn empty_deck_is_rejected() {
        let result = SlideController::new(RecordingSurface::new(0), NavigatorConfig::default());
        assert_eq!(result.unwrap_err(), NavigationError::EmptyDeck);
    }

    #[test]
    fn starts_on_first_slide_without_animation() {
        let nav = controller(3);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.state(), NavState::Idle);
        assert_eq!(nav.surface().visible_slides(), vec![0]);
        assert!(nav.surface().animating_slides().is_empty());
        assert_eq!(nav.surface().chrome().unwrap().indicator(), "1 / 3");
    }

    #[test]
    fn advance_animates_until_settled() {
        let mut nav = controller(3);
        assert_eq!(
            nav.advance(),
            NavOutcome::Moved { from: 0, to: 1, animated: true }
        );
        assert_eq!(nav.state(), NavState::Settling { slide: 1 });
        assert_eq!(nav.surface().animating_slides(), vec![1]);
        assert_eq!(nav.settle_delay(), Some(Duration::from_millis(400)));

        assert_eq!(nav.settle(), Some(1));
        assert_eq!(nav.state(), NavState::Idle);
        assert!(nav.surface().animating_slides().is_empty());
        assert_eq!(nav.settle(), None);
        assert_eq!(nav.settle_delay(), None);
    }

    #[test]
    fn retreat_on_first_slide_is_ignored() {
        let mut nav = controller(2);
        let renders = nav.surface().render_count();
        assert_eq!(nav.retreat(), NavOutcome::Ignored(IgnoreReason::AtStart));
        assert_eq!(nav.surface().render_count(), renders);
    }

    #[test]
    fn advance_on_last_slide_completes() {
        let completions = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&completions);
        let mut nav = controller(1).on_complete(move || *seen.borrow_mut() += 1);

        assert_eq!(nav.advance(), NavOutcome::Completed);
        assert_eq!(nav.advance(), NavOutcome::Completed);
        assert_eq!(*completions.borrow(), 2);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn go_to_checks_range_and_current() {
        let mut nav = controller(4);
        assert_eq!(nav.go_to(4), NavOutcome::Ignored(IgnoreReason::OutOfRange));
        assert_eq!(nav.go_to(0), NavOutcome::Ignored(IgnoreReason::AlreadyCurrent));
        assert_eq!(nav.go_to(3).moved_to(), Some(3));
        assert_eq!(nav.surface().visible_slides(), vec![3]);
    }

    #[test]
    fn resume_accepts_current_index_and_skips_animation() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&changes);
        let mut nav = controller(5).on_slide_change(move |index, total| seen.borrow_mut().push((index, total)));

        assert_eq!(
            nav.resume_from(0),
            NavOutcome::Moved { from: 0, to: 0, animated: false }
        );
        assert_eq!(nav.resume_from(3).moved_to(), Some(3));
        assert_eq!(nav.state(), NavState::Idle);
        assert!(nav.surface().animating_slides().is_empty());
        assert_eq!(nav.resume_from(9), NavOutcome::Ignored(IgnoreReason::OutOfRange));
        assert_eq!(*changes.borrow(), vec![(0, 5), (3, 5)]);
    }

    #[test]
    fn hook_sees_transitioning_state_sequence() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&changes);
        let mut nav = controller(3).on_slide_change(move |index, _| seen.borrow_mut().push(index));

        let _ = nav.advance();
        let _ = nav.advance();
        let _ = nav.retreat();
        assert_eq!(*changes.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn moving_while_settling_hides_the_animating_slide() {
        let mut nav = controller(3);
        let _ = nav.advance();
        assert_eq!(nav.advance().moved_to(), Some(2));
        assert_eq!(nav.surface().visible_slides(), vec![2]);
        assert_eq!(nav.surface().animating_slides(), vec![2]);
    }

    #[test]
    fn locked_settle_drops_requests() {
        let config = NavigatorConfig {
            lock_during_settle: true,
            ..NavigatorConfig::default()
        };
        let mut nav = SlideController::new(RecordingSurface::new(3), config).unwrap();
        let _ = nav.advance();
        assert_eq!(nav.advance(), NavOutcome::Ignored(IgnoreReason::Busy));
        assert_eq!(nav.current_index(), 1);

        nav.settle();
        assert_eq!(nav.advance().moved_to(), Some(2));
    }

    #[test]
    fn keys_and_swipes_route_to_commands() {
        let mut nav = controller(3);
        assert_eq!(nav.handle_key("ArrowDown").and_then(|o| o.moved_to()), Some(1));
        assert_eq!(nav.handle_key("Tab"), None);
        assert_eq!(nav.handle_swipe(120.0, 10.0).and_then(|o| o.moved_to()), Some(0));
        assert_eq!(nav.handle_swipe(30.0, 0.0), None);
        assert_eq!(nav.press(Control::Next).moved_to(), Some(1));
    }

    #[test]
    fn chrome_tracks_position() {
        let mut nav = controller(2);
        let _ = nav.advance();
        let chrome = nav.surface().chrome().unwrap();
        assert!(chrome.prev_enabled);
        assert_eq!(chrome.next_label, "Complete");
    }
}
