//! The two host API surfaces as the LMS exposes them.
//!
//! Method names follow the host's own function names so an adapter over a
//! real runtime is a one-to-one mapping. The empty-string parameter taken by
//! the lifecycle calls is part of both protocols and is passed through as is.

/// A value returned by a host call.
///
/// Hosts disagree on whether success is reported as a native boolean or as
/// the text `"true"`/`"false"`; both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostValue {
    Bool(bool),
    Text(String),
}

impl HostValue {
    /// Normalized success: `true` or `"true"`. Anything else is failure.
    #[must_use]
    pub fn is_true(&self) -> bool {
        match self {
            HostValue::Bool(value) => *value,
            HostValue::Text(text) => text == "true",
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Text(value.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::Text(value)
    }
}

/// Current-dialect surface (`API_1484_11`, SCORM 2004).
pub trait CurrentApi: Send + Sync {
    fn initialize(&self, param: &str) -> HostValue;
    fn terminate(&self, param: &str) -> HostValue;
    fn get_value(&self, element: &str) -> String;
    fn set_value(&self, element: &str, value: &str) -> HostValue;
    fn commit(&self, param: &str) -> HostValue;
    fn get_last_error(&self) -> String;
    fn get_error_string(&self, code: &str) -> String;
}

/// Legacy-dialect surface (`API`, SCORM 1.2).
pub trait LegacyApi: Send + Sync {
    fn lms_initialize(&self, param: &str) -> HostValue;
    fn lms_finish(&self, param: &str) -> HostValue;
    fn lms_get_value(&self, element: &str) -> String;
    fn lms_set_value(&self, element: &str, value: &str) -> HostValue;
    fn lms_commit(&self, param: &str) -> HostValue;
    fn lms_get_last_error(&self) -> String;
    fn lms_get_error_string(&self, code: &str) -> String;
}
