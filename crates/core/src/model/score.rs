use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score values must be finite (raw={raw}, min={min}, max={max})")]
    NonFinite { raw: f64, min: f64, max: f64 },

    #[error("score range is empty: min {min} must be below max {max}")]
    EmptyRange { min: f64, max: f64 },
}

/// Raw score with its range.
///
/// `raw` is not clamped into `[min, max]`; hosts decide how strict they are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    raw: f64,
    min: f64,
    max: f64,
}

impl Score {
    /// Default upper bound when a caller only supplies a raw value.
    pub const DEFAULT_MAX: f64 = 100.0;
    /// Default lower bound when a caller only supplies a raw value.
    pub const DEFAULT_MIN: f64 = 0.0;

    /// Build a validated score.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::NonFinite` for NaN or infinite inputs and
    /// `ScoreError::EmptyRange` when `max <= min`.
    pub fn new(raw: f64, min: f64, max: f64) -> Result<Self, ScoreError> {
        if !(raw.is_finite() && min.is_finite() && max.is_finite()) {
            return Err(ScoreError::NonFinite { raw, min, max });
        }
        if max <= min {
            return Err(ScoreError::EmptyRange { min, max });
        }
        Ok(Self { raw, min, max })
    }

    /// Score on the default 0..=100 scale.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::NonFinite` if `raw` is NaN or infinite.
    pub fn percent(raw: f64) -> Result<Self, ScoreError> {
        Self::new(raw, Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }

    #[must_use]
    pub fn raw(&self) -> f64 {
        self.raw
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Position of `raw` within the range: `(raw - min) / (max - min)`.
    #[must_use]
    pub fn scaled(&self) -> f64 {
        (self.raw - self.min) / (self.max - self.min)
    }

    /// `scaled()` as a two-decimal fixed-point string, e.g. `"0.70"`.
    #[must_use]
    pub fn scaled_text(&self) -> String {
        format!("{:.2}", self.scaled())
    }
}
