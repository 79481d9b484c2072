use std::io::{self, Write};

use services::{NavChrome, SlideSurface};

use crate::content::SlideContent;
use crate::vm::ChromeVm;

/// Plain-text slide surface.
///
/// Surface calls only update state; [`TerminalSurface::paint`] writes the current
/// frame, so several updates during one transition produce a single frame.
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    out: W,
    slides: Vec<SlideContent>,
    visible: Option<usize>,
    animating: bool,
    chrome: Option<ChromeVm>,
    dirty: bool,
}

impl<W: Write> TerminalSurface<W> {
    #[must_use]
    pub fn new(out: W, slides: Vec<SlideContent>) -> Self {
        Self {
            out,
            slides,
            visible: None,
            animating: false,
            chrome: None,
            dirty: false,
        }
    }

    #[must_use]
    pub fn visible_slide(&self) -> Option<usize> {
        self.visible
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    #[must_use]
    pub fn chrome(&self) -> Option<&ChromeVm> {
        self.chrome.as_ref()
    }

    /// Writes the current frame if anything changed since the last paint.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn paint(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(slide) = self.visible.and_then(|index| self.slides.get(index)) {
            writeln!(self.out)?;
            writeln!(self.out, "== {} ==", slide.title)?;
            if !slide.body.is_empty() {
                writeln!(self.out, "{}", slide.body)?;
            }
        }
        if let Some(chrome) = &self.chrome {
            writeln!(self.out, "{}", chrome.line())?;
        }
        self.out.flush()?;
        self.dirty = false;
        Ok(())
    }

    /// Writes a single status line outside the frame.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SlideSurface for TerminalSurface<W> {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn show_slide(&mut self, index: usize, animate: bool) {
        self.visible = Some(index);
        self.animating = animate;
        self.dirty = true;
    }

    fn hide_slide(&mut self, index: usize) {
        if self.visible == Some(index) {
            self.visible = None;
            self.animating = false;
            self.dirty = true;
        }
    }

    fn end_animation(&mut self, index: usize) {
        if self.visible == Some(index) {
            self.animating = false;
        }
    }

    fn render_chrome(&mut self, chrome: &NavChrome) {
        let vm = ChromeVm::from_chrome(chrome);
        if self.chrome.as_ref() != Some(&vm) {
            self.chrome = Some(vm);
            self.dirty = true;
        }
    }
}
