//! Host data model persistence between runs.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use runtime::HostSnapshot;
use tracing::debug;

use crate::error::AppError;

/// Loads a snapshot; a missing file is an empty data model.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<HostSnapshot, AppError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved state; starting fresh");
            return Ok(HostSnapshot::default());
        }
        Err(source) => {
            return Err(AppError::Read {
                path: path.to_owned(),
                source,
            });
        }
    };
    serde_json::from_str(&raw).map_err(|source| AppError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// # Errors
///
/// Returns [`AppError::Write`] when the file cannot be written.
pub fn save(path: &Path, snapshot: &HostSnapshot) -> Result<(), AppError> {
    let write_err = |source| AppError::Write {
        path: path.to_owned(),
        source,
    };
    let raw = serde_json::to_string_pretty(snapshot).map_err(|err| write_err(err.into()))?;
    fs::write(path, raw).map_err(write_err)
}
