//! Interactive command loop for a running lesson.

use std::future::Future;
use std::io::Write;

use course_core::{Interaction, Score};
use services::{Control, LessonController, NavOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, sleep_until};
use tracing::debug;
use ui::TerminalSurface;
use ui::vm::format_elapsed;

use crate::error::AppError;

/// One line of learner input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Prev,
    /// 1-based slide number as shown in the indicator.
    GoTo(usize),
    Key(String),
    Swipe { dx: f64, dy: f64 },
    Answer {
        id: String,
        response: String,
        correct: String,
    },
    Score(f64),
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parses a line; blank lines yield `None`, anything unrecognized an error message.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();
        let command = match (verb, rest.as_slice()) {
            ("n" | "next", []) => Self::Next,
            ("p" | "prev", []) => Self::Prev,
            ("g" | "goto", [n]) => Self::GoTo(
                n.parse()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| format!("not a slide number: {n}"))?,
            ),
            ("key", [name]) => Self::Key((*name).to_owned()),
            ("swipe", [dx, dy]) => match (dx.parse(), dy.parse()) {
                (Ok(dx), Ok(dy)) => Self::Swipe { dx, dy },
                _ => return Err(format!("not a swipe: {dx} {dy}")),
            },
            ("answer", [id, response, correct]) => Self::Answer {
                id: (*id).to_owned(),
                response: (*response).to_owned(),
                correct: (*correct).to_owned(),
            },
            ("score", [raw]) => {
                Self::Score(raw.parse().map_err(|_| format!("not a score: {raw}"))?)
            }
            ("status", []) => Self::Status,
            ("h" | "help" | "?", []) => Self::Help,
            ("q" | "quit", []) => Self::Quit,
            _ => return Err(format!("unknown command: {}", line.trim())),
        };
        Ok(Some(command))
    }
}

const HELP: &str = "n, p, g <n>, key <name>, swipe <dx> <dy>, answer <id> <response> <correct>, score <percent>, status, q";

/// Reads commands until end of input, `q`, or `shutdown`, settling enter
/// animations as their delay elapses.
///
/// # Errors
///
/// Returns an error when reading input or writing output fails.
pub async fn run<R, W>(
    lesson: &mut LessonController<TerminalSurface<W>>,
    input: R,
    shutdown: impl Future<Output = ()>,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut settle_at: Option<Instant> = None;
    tokio::pin!(shutdown);

    lesson.surface_mut().paint()?;
    loop {
        tokio::select! {
            () = settle_timer(settle_at) => {
                lesson.settle();
                settle_at = None;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Some(NavOutcome::Moved { animated: true, .. }) = apply(lesson, command)? {
                            settle_at = lesson.settle_delay().map(|delay| Instant::now() + delay);
                        }
                    }
                    Err(message) => lesson.surface_mut().notice(&message)?,
                }
                lesson.surface_mut().paint()?;
            }
            () = &mut shutdown => {
                debug!("interrupted");
                break;
            }
        }
    }
    Ok(())
}

async fn settle_timer(at: Option<Instant>) {
    match at {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn apply<W: Write>(
    lesson: &mut LessonController<TerminalSurface<W>>,
    command: Command,
) -> Result<Option<NavOutcome>, AppError> {
    let outcome = match command {
        Command::Next => Some(lesson.press(Control::Next)),
        Command::Prev => Some(lesson.press(Control::Prev)),
        Command::GoTo(number) => Some(lesson.go_to(number - 1)),
        Command::Key(name) => lesson.key(&name),
        Command::Swipe { dx, dy } => lesson.swipe(dx, dy),
        Command::Answer {
            id,
            response,
            correct,
        } => {
            let interaction = Interaction::choice(id, response, correct);
            let verdict = interaction.result.as_str();
            let saved = lesson.record_interaction(&interaction);
            let note = if saved.is_success() { "" } else { " (not saved)" };
            lesson
                .surface_mut()
                .notice(&format!("answer {verdict}{note}"))?;
            None
        }
        Command::Score(raw) => {
            let message = match Score::percent(raw) {
                Ok(score) if lesson.set_score(&score).is_success() => format!("score {raw}"),
                Ok(_) => "score not saved".to_owned(),
                Err(err) => err.to_string(),
            };
            lesson.surface_mut().notice(&message)?;
            None
        }
        Command::Status => {
            let bridge = lesson.bridge();
            let learner = bridge.learner_name();
            let version = bridge
                .protocol_version()
                .map_or_else(|| "standalone".to_owned(), |v| v.to_string());
            let status = bridge
                .lesson_status()
                .map_or_else(|| "unknown".to_owned(), |s| s.to_string());
            let message = format!(
                "{} | {version} | {status} | {}",
                if learner.is_empty() { "anonymous" } else { learner.as_str() },
                format_elapsed(lesson.elapsed()),
            );
            lesson.surface_mut().notice(&message)?;
            None
        }
        Command::Help => {
            lesson.surface_mut().notice(HELP)?;
            None
        }
        Command::Quit => None,
    };
    if let Some(outcome) = outcome {
        debug!(?outcome, "navigation");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(Command::parse("n"), Ok(Some(Command::Next)));
        assert_eq!(Command::parse("  "), Ok(None));
        assert_eq!(Command::parse("g 3"), Ok(Some(Command::GoTo(3))));
        assert_eq!(
            Command::parse("swipe -80 4.5"),
            Ok(Some(Command::Swipe { dx: -80.0, dy: 4.5 }))
        );
        assert_eq!(
            Command::parse("key ArrowLeft"),
            Ok(Some(Command::Key("ArrowLeft".into())))
        );
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(Command::parse("g 0").is_err());
        assert!(Command::parse("g two").is_err());
        assert!(Command::parse("swipe left").is_err());
        assert!(Command::parse("jump").is_err());
    }
}
