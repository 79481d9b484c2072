use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized learner status across both host dialects.
///
/// The legacy dialect stores all five values in one field. The current dialect
/// splits them into a completion dimension and a success dimension; see
/// [`LessonStatus::is_success_dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessonStatus {
    NotAttempted,
    Incomplete,
    Completed,
    Passed,
    Failed,
}

impl LessonStatus {
    /// Wire vocabulary shared by both dialects.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LessonStatus::NotAttempted => "not attempted",
            LessonStatus::Incomplete => "incomplete",
            LessonStatus::Completed => "completed",
            LessonStatus::Passed => "passed",
            LessonStatus::Failed => "failed",
        }
    }

    /// Parses a host-provided status value.
    ///
    /// Returns `None` for empty or unrecognized values (`unknown`, `browsed`),
    /// which callers treat the same as an absent status.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "not attempted" => Some(LessonStatus::NotAttempted),
            "incomplete" => Some(LessonStatus::Incomplete),
            "completed" => Some(LessonStatus::Completed),
            "passed" => Some(LessonStatus::Passed),
            "failed" => Some(LessonStatus::Failed),
            _ => None,
        }
    }

    /// True for `passed`/`failed`, the values carried by the success dimension.
    #[must_use]
    pub fn is_success_dimension(self) -> bool {
        matches!(self, LessonStatus::Passed | LessonStatus::Failed)
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_vocabulary() {
        for status in [
            LessonStatus::NotAttempted,
            LessonStatus::Incomplete,
            LessonStatus::Completed,
            LessonStatus::Passed,
            LessonStatus::Failed,
        ] {
            assert_eq!(LessonStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_values_are_absent() {
        assert_eq!(LessonStatus::parse(""), None);
        assert_eq!(LessonStatus::parse("unknown"), None);
        assert_eq!(LessonStatus::parse("browsed"), None);
    }

    #[test]
    fn only_pass_fail_are_success_dimension() {
        assert!(LessonStatus::Failed.is_success_dimension());
        assert!(!LessonStatus::Completed.is_success_dimension());
    }
}
