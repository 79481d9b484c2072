use super::chrome::NavChrome;

/// The presentation layer the navigator drives.
///
/// Slides are addressed by index in `0..slide_count()`. The navigator guarantees
/// that after each transition exactly one slide has been shown since it was last hidden.
pub trait SlideSurface {
    fn slide_count(&self) -> usize;

    /// Makes `index` the visible slide, optionally starting its enter animation.
    fn show_slide(&mut self, index: usize, animate: bool);

    /// Hides `index` and drops any running animation on it.
    fn hide_slide(&mut self, index: usize);

    /// Ends the enter animation on `index`.
    fn end_animation(&mut self, index: usize);

    fn render_chrome(&mut self, chrome: &NavChrome);
}

impl<S: SlideSurface + ?Sized> SlideSurface for Box<S> {
    fn slide_count(&self) -> usize {
        (**self).slide_count()
    }

    fn show_slide(&mut self, index: usize, animate: bool) {
        (**self).show_slide(index, animate);
    }

    fn hide_slide(&mut self, index: usize) {
        (**self).hide_slide(index);
    }

    fn end_animation(&mut self, index: usize) {
        (**self).end_animation(index);
    }

    fn render_chrome(&mut self, chrome: &NavChrome) {
        (**self).render_chrome(chrome);
    }
}

// ─── In-memory surface ─────────────────────────────────────────────────────────

/// Surface that only tracks visibility, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    visible: Vec<bool>,
    animating: Vec<bool>,
    chrome: Option<NavChrome>,
    renders: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(slide_count: usize) -> Self {
        Self {
            visible: vec![false; slide_count],
            animating: vec![false; slide_count],
            chrome: None,
            renders: 0,
        }
    }

    /// Indices of every visible slide, ascending.
    #[must_use]
    pub fn visible_slides(&self) -> Vec<usize> {
        indices(&self.visible)
    }

    #[must_use]
    pub fn animating_slides(&self) -> Vec<usize> {
        indices(&self.animating)
    }

    #[must_use]
    pub fn chrome(&self) -> Option<&NavChrome> {
        self.chrome.as_ref()
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

fn indices(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(index, set)| set.then_some(index))
        .collect()
}

impl SlideSurface for RecordingSurface {
    fn slide_count(&self) -> usize {
        self.visible.len()
    }

    fn show_slide(&mut self, index: usize, animate: bool) {
        if let Some(visible) = self.visible.get_mut(index) {
            *visible = true;
            self.animating[index] = animate;
        }
    }

    fn hide_slide(&mut self, index: usize) {
        if let Some(visible) = self.visible.get_mut(index) {
            *visible = false;
            self.animating[index] = false;
        }
    }

    fn end_animation(&mut self, index: usize) {
        if let Some(animating) = self.animating.get_mut(index) {
            *animating = false;
        }
    }

    fn render_chrome(&mut self, chrome: &NavChrome) {
        self.chrome = Some(chrome.clone());
        self.renders += 1;
    }
}
