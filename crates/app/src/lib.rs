//! Terminal course player: runs a slide course against a simulated LMS host.

#![forbid(unsafe_code)]

pub mod args;
pub mod error;
pub mod frames;
pub mod manifest;
pub mod player;
pub mod state;

use std::future::Future;
use std::io::Write;

use runtime::{InMemoryHost, SessionBridge};
use services::{Clock, LessonController};
use tokio::io::AsyncBufRead;
use tracing::warn;
use ui::TerminalSurface;

pub use args::{Args, ArgsError, DialectChoice, Parsed};
pub use error::AppError;
pub use manifest::CourseManifest;

/// Plays the course named by `args`, reading commands from `input` until it ends,
/// `q` is entered or `shutdown` resolves. Returns the writer the course was drawn on.
///
/// # Errors
///
/// Returns an error when the manifest or state file cannot be read or written,
/// when the course has no slides, or when input or output fails. The session is
/// closed and the state file saved before a terminal error is returned.
pub async fn play<R, W>(
    args: &Args,
    input: R,
    out: W,
    shutdown: impl Future<Output = ()>,
) -> Result<W, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let manifest = CourseManifest::load(&args.course)?;
    let snapshot = match &args.state {
        Some(path) => state::load(path)?,
        None => runtime::HostSnapshot::default(),
    };

    let host = InMemoryHost::from_snapshot(snapshot);
    let frame = frames::build(&host, args.dialect, args.depth);
    let bridge = SessionBridge::discover(&frame);

    let surface = TerminalSurface::new(out, manifest.slides);
    let mut lesson = LessonController::start(bridge, surface, manifest.navigation, Clock::System)?;

    // Terminal failures end the run but must not skip unload and the state save.
    let played = match lesson.surface_mut().notice(&format!("# {}", manifest.title)) {
        Ok(()) => player::run(&mut lesson, input, shutdown).await,
        Err(err) => Err(err.into()),
    };

    let closed = lesson.unload();
    if let Some(rejection) = closed.rejection() {
        warn!(%rejection, "session did not close cleanly");
    }
    let saved = match &args.state {
        Some(path) => state::save(path, &host.snapshot()),
        None => Ok(()),
    };
    played?;
    saved?;
    Ok(lesson.into_surface().into_inner())
}
