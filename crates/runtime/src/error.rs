//! Result types for host calls.
//!
//! Host failures are values, not panics: every write returns an [`Outcome`]
//! that callers may inspect or drop.

use std::fmt;

use thiserror::Error;

/// Host call that can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Initialize,
    Finish,
    SetValue,
    Commit,
}

impl fmt::Display for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostCall::Initialize => "initialize",
            HostCall::Finish => "finish",
            HostCall::SetValue => "set-value",
            HostCall::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Error code and text reported by the host after a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDiagnostic {
    pub code: String,
    pub message: String,
}

impl fmt::Display for HostDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "error {}", self.code)
        } else {
            write!(f, "error {}: {}", self.code, self.message)
        }
    }
}

/// A call the host answered with anything other than `true`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("host rejected {call}{}", describe(.element.as_deref(), .diagnostic.as_ref()))]
pub struct Rejection {
    pub call: HostCall,
    pub element: Option<String>,
    pub diagnostic: Option<HostDiagnostic>,
}

fn describe(element: Option<&str>, diagnostic: Option<&HostDiagnostic>) -> String {
    let mut out = String::new();
    if let Some(element) = element {
        out.push_str(&format!(" of {element}"));
    }
    if let Some(diagnostic) = diagnostic {
        out.push_str(&format!(" ({diagnostic})"));
    }
    out
}

/// Result of a bridge write or lifecycle call.
#[must_use = "a rejected host call is only visible through its outcome"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The host accepted the call.
    Applied,
    /// Nothing to do (already initialized, already terminated, ...).
    Unchanged,
    /// No host endpoint; the call was a local no-op.
    Standalone,
    Rejected(Rejection),
}

impl Outcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Rejected(_))
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Combine two outcomes of one logical operation, keeping the first rejection.
    pub fn and(self, next: Outcome) -> Outcome {
        match (self, next) {
            (rejected @ Outcome::Rejected(_), _) => rejected,
            (_, rejected @ Outcome::Rejected(_)) => rejected,
            (Outcome::Applied, _) | (_, Outcome::Applied) => Outcome::Applied,
            (Outcome::Standalone, _) | (_, Outcome::Standalone) => Outcome::Standalone,
            (Outcome::Unchanged, Outcome::Unchanged) => Outcome::Unchanged,
        }
    }

    /// Convert into a `Result` for callers that want `?` propagation.
    ///
    /// # Errors
    ///
    /// Returns the `Rejection` if the host refused the call.
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            Outcome::Rejected(rejection) => Err(rejection),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(call: HostCall) -> Outcome {
        Outcome::Rejected(Rejection {
            call,
            element: None,
            diagnostic: None,
        })
    }

    #[test]
    fn and_keeps_first_rejection() {
        let combined = Outcome::Applied
            .and(rejected(HostCall::SetValue))
            .and(rejected(HostCall::Commit));
        assert_eq!(combined.rejection().map(|r| r.call), Some(HostCall::SetValue));
    }

    #[test]
    fn and_prefers_applied_over_noops() {
        assert_eq!(Outcome::Unchanged.and(Outcome::Applied), Outcome::Applied);
        assert_eq!(Outcome::Unchanged.and(Outcome::Unchanged), Outcome::Unchanged);
    }

    #[test]
    fn rejection_message_includes_diagnostic() {
        let rejection = Rejection {
            call: HostCall::SetValue,
            element: Some("cmi.suspend_data".into()),
            diagnostic: Some(HostDiagnostic {
                code: "301".into(),
                message: "Not initialized".into(),
            }),
        };
        assert_eq!(
            rejection.to_string(),
            "host rejected set-value of cmi.suspend_data (error 301: Not initialized)"
        );
    }
}
