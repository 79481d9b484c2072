//! Per-dialect call dispatch and data-model vocabulary.
//!
//! A [`Dialect`] is chosen once, when the endpoint is discovered. The bridge
//! never branches on the protocol version itself.

mod current;
mod legacy;

use std::fmt;
use std::str::FromStr;

use course_core::{LessonStatus, Score, SessionDuration};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::discovery::Endpoint;

pub use current::CurrentDialect;
pub use legacy::LegacyDialect;

/// Bookmark field shared by both dialects.
pub const SUSPEND_DATA: &str = "cmi.suspend_data";
/// Interaction counter shared by both dialects.
pub const INTERACTION_COUNT: &str = "cmi.interactions._count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    /// SCORM 1.2.
    Legacy,
    /// SCORM 2004.
    Current,
}

impl ProtocolVersion {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolVersion::Legacy => "legacy",
            ProtocolVersion::Current => "current",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown protocol version: {0}")]
pub struct UnknownProtocol(pub String);

impl FromStr for ProtocolVersion {
    type Err = UnknownProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "1.2" => Ok(ProtocolVersion::Legacy),
            "current" | "2004" => Ok(ProtocolVersion::Current),
            other => Err(UnknownProtocol(other.to_owned())),
        }
    }
}

/// One data-model write: element name and value.
pub type DataWrite = (&'static str, String);

/// Strategy for one host dialect.
///
/// Wire methods return normalized booleans; vocabulary methods describe which
/// elements to touch and how values are encoded.
pub trait Dialect: Send + Sync {
    fn version(&self) -> ProtocolVersion;

    fn initialize(&self) -> bool;
    fn finish(&self) -> bool;
    fn get_value(&self, element: &str) -> String;
    fn set_value(&self, element: &str, value: &str) -> bool;
    fn commit(&self) -> bool;
    fn last_error_code(&self) -> String;
    fn error_string(&self, code: &str) -> String;

    /// Read the learner status, collapsing the dialect's fields into one value.
    fn read_status(&self) -> Option<LessonStatus>;

    fn status_writes(&self, status: LessonStatus) -> Vec<DataWrite>;
    fn score_writes(&self, score: &Score) -> Vec<DataWrite>;
    fn score_raw_element(&self) -> &'static str;
    fn session_time_element(&self) -> &'static str;

    /// Render a duration in this dialect's timespan format.
    fn timespan(&self, duration: SessionDuration) -> String;

    fn learner_name_element(&self) -> &'static str;
    fn learner_id_element(&self) -> &'static str;

    /// Name of the interaction sub-field holding the learner's answer.
    fn response_field(&self) -> &'static str;
}

/// Wrap a discovered endpoint in its dialect strategy.
#[must_use]
pub fn for_endpoint(endpoint: Endpoint) -> Box<dyn Dialect> {
    match endpoint {
        Endpoint::Current(api) => Box::new(CurrentDialect::new(api)),
        Endpoint::Legacy(api) => Box::new(LegacyDialect::new(api)),
    }
}

/// Decimal rendering used for numeric data-model values (`7`, `7.5`).
pub(crate) fn decimal(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_version_names() {
        assert_eq!("2004".parse::<ProtocolVersion>(), Ok(ProtocolVersion::Current));
        assert_eq!(" Legacy ".parse::<ProtocolVersion>(), Ok(ProtocolVersion::Legacy));
        assert!("none".parse::<ProtocolVersion>().is_err());
    }

    #[test]
    fn decimal_drops_trailing_zero() {
        assert_eq!(decimal(7.0), "7");
        assert_eq!(decimal(7.5), "7.5");
        assert_eq!(decimal(-1.0), "-1");
    }
}
