use std::io;
use std::path::PathBuf;

use services::LessonError;
use thiserror::Error;

use crate::args::ArgsError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Lesson(#[from] LessonError),

    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] io::Error),
}
