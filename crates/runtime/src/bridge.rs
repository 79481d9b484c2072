use std::fmt;
use std::sync::Arc;

use course_core::{Interaction, LessonStatus, Score, SessionDuration};
use tracing::{debug, info, warn};

use crate::dialect::{self, DataWrite, Dialect, INTERACTION_COUNT, ProtocolVersion, SUSPEND_DATA};
use crate::discovery::{self, Endpoint};
use crate::error::{HostCall, HostDiagnostic, Outcome, Rejection};
use crate::frame::Frame;

/// Legacy hosts only guarantee 4096 characters of suspend data.
pub const LEGACY_SUSPEND_DATA_LIMIT: usize = 4096;

//
// ─── BRIDGE ────────────────────────────────────────────────────────────────────
//

/// One learner session with the host.
///
/// Without a host endpoint the bridge runs in standalone mode: writes report
/// [`Outcome::Standalone`] and reads return empty defaults, so callers never
/// branch on whether an LMS is present.
pub struct SessionBridge {
    dialect: Option<Box<dyn Dialect>>,
    initialized: bool,
    terminated: bool,
}

impl SessionBridge {
    /// Discover the host from `frame` and bind to whichever dialect it speaks.
    #[must_use]
    pub fn discover(frame: &Arc<dyn Frame>) -> Self {
        match discovery::discover(frame) {
            Some(endpoint) => Self::from_endpoint(endpoint),
            None => {
                info!("no LMS endpoint found; running standalone");
                Self::standalone()
            }
        }
    }

    #[must_use]
    pub fn from_endpoint(endpoint: Endpoint) -> Self {
        info!(dialect = %endpoint.version(), "bound to LMS endpoint");
        Self {
            dialect: Some(dialect::for_endpoint(endpoint)),
            initialized: false,
            terminated: false,
        }
    }

    #[must_use]
    pub fn standalone() -> Self {
        Self {
            dialect: None,
            initialized: false,
            terminated: false,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.dialect.is_some()
    }

    #[must_use]
    pub fn protocol_version(&self) -> Option<ProtocolVersion> {
        self.dialect.as_ref().map(|d| d.version())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    //
    // ─── LIFECYCLE ─────────────────────────────────────────────────────────────
    //

    /// Open the session. Idempotent once it has succeeded.
    ///
    /// On first success an absent or `not attempted` status is promoted to
    /// `incomplete` and committed immediately.
    pub fn initialize(&mut self) -> Outcome {
        if self.initialized {
            return Outcome::Unchanged;
        }
        let Some(dialect) = self.dialect.as_deref() else {
            self.initialized = true;
            return Outcome::Standalone;
        };

        if !dialect.initialize() {
            let rejection = reject(dialect, HostCall::Initialize, None);
            warn!(%rejection, "LMS initialize failed");
            return Outcome::Rejected(rejection);
        }
        self.initialized = true;
        info!(dialect = %dialect.version(), "LMS session initialized");

        if matches!(self.lesson_status(), None | Some(LessonStatus::NotAttempted)) {
            debug!("defaulting lesson status to incomplete");
            let defaulted = self
                .set_lesson_status(LessonStatus::Incomplete)
                .and(self.commit());
            if let Some(rejection) = defaulted.rejection() {
                warn!(%rejection, "could not default lesson status");
            }
        }
        Outcome::Applied
    }

    /// Close the session. A no-op if never initialized or already terminated.
    pub fn terminate(&mut self) -> Outcome {
        if self.terminated || !self.initialized {
            return Outcome::Unchanged;
        }
        let Some(dialect) = self.dialect.as_deref() else {
            self.terminated = true;
            return Outcome::Standalone;
        };

        if dialect.finish() {
            self.terminated = true;
            info!("LMS session terminated");
            Outcome::Applied
        } else {
            let rejection = reject(dialect, HostCall::Finish, None);
            warn!(%rejection, "LMS finish failed");
            Outcome::Rejected(rejection)
        }
    }

    //
    // ─── PRIMITIVES ────────────────────────────────────────────────────────────
    //

    /// Read a data-model element; empty in standalone mode.
    #[must_use]
    pub fn get_value(&self, element: &str) -> String {
        self.dialect
            .as_deref()
            .map(|d| d.get_value(element))
            .unwrap_or_default()
    }

    pub fn set_value(&self, element: &str, value: &str) -> Outcome {
        let Some(dialect) = self.dialect.as_deref() else {
            return Outcome::Standalone;
        };
        if dialect.set_value(element, value) {
            debug!(element, value, "stored");
            Outcome::Applied
        } else {
            let rejection = reject(dialect, HostCall::SetValue, Some(element));
            warn!(%rejection, "LMS rejected write");
            Outcome::Rejected(rejection)
        }
    }

    /// Ask the host to persist everything written so far.
    pub fn commit(&self) -> Outcome {
        let Some(dialect) = self.dialect.as_deref() else {
            return Outcome::Standalone;
        };
        if dialect.commit() {
            Outcome::Applied
        } else {
            let rejection = reject(dialect, HostCall::Commit, None);
            warn!(%rejection, "LMS commit failed");
            Outcome::Rejected(rejection)
        }
    }

    /// The host's most recent error, if it reports one.
    #[must_use]
    pub fn last_error(&self) -> Option<HostDiagnostic> {
        self.dialect.as_deref().and_then(diagnostic)
    }

    fn write_all(&self, writes: Vec<DataWrite>) -> Outcome {
        writes
            .into_iter()
            .fold(Outcome::Unchanged, |acc, (element, value)| {
                acc.and(self.set_value(element, &value))
            })
    }

    //
    // ─── PROGRESS RECORD ───────────────────────────────────────────────────────
    //

    /// Current status; under the current dialect pass/fail wins over completion.
    #[must_use]
    pub fn lesson_status(&self) -> Option<LessonStatus> {
        self.dialect.as_deref().and_then(|d| d.read_status())
    }

    pub fn set_lesson_status(&self, status: LessonStatus) -> Outcome {
        match self.dialect.as_deref() {
            Some(dialect) => self.write_all(dialect.status_writes(status)),
            None => Outcome::Standalone,
        }
    }

    pub fn set_score(&self, score: &Score) -> Outcome {
        match self.dialect.as_deref() {
            Some(dialect) => self.write_all(dialect.score_writes(score)),
            None => Outcome::Standalone,
        }
    }

    /// Raw score, or `0.0` when absent or unparsable.
    #[must_use]
    pub fn score(&self) -> f64 {
        let Some(dialect) = self.dialect.as_deref() else {
            return 0.0;
        };
        dialect
            .get_value(dialect.score_raw_element())
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    pub fn set_session_time(&self, duration: SessionDuration) -> Outcome {
        match self.dialect.as_deref() {
            Some(dialect) => {
                self.set_value(dialect.session_time_element(), &dialect.timespan(duration))
            }
            None => Outcome::Standalone,
        }
    }

    /// Opaque resume data; empty when absent.
    #[must_use]
    pub fn bookmark(&self) -> String {
        self.get_value(SUSPEND_DATA)
    }

    pub fn set_bookmark(&self, data: &str) -> Outcome {
        if self.protocol_version() == Some(ProtocolVersion::Legacy)
            && data.chars().count() > LEGACY_SUSPEND_DATA_LIMIT
        {
            warn!(
                len = data.chars().count(),
                limit = LEGACY_SUSPEND_DATA_LIMIT,
                "suspend data exceeds legacy host limit"
            );
        }
        self.set_value(SUSPEND_DATA, data)
    }

    #[must_use]
    pub fn learner_name(&self) -> String {
        self.dialect
            .as_deref()
            .map(|d| d.get_value(d.learner_name_element()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn learner_id(&self) -> String {
        self.dialect
            .as_deref()
            .map(|d| d.get_value(d.learner_id_element()))
            .unwrap_or_default()
    }

    /// Number of interactions the host already holds; `0` when unknown.
    #[must_use]
    pub fn interaction_count(&self) -> usize {
        self.get_value(INTERACTION_COUNT).trim().parse().unwrap_or(0)
    }

    /// Write one interaction record under `cmi.interactions.{index}`.
    pub fn record_interaction(&self, index: usize, interaction: &Interaction) -> Outcome {
        let Some(dialect) = self.dialect.as_deref() else {
            return Outcome::Standalone;
        };
        let prefix = format!("cmi.interactions.{index}");
        let mut writes = vec![
            (format!("{prefix}.id"), interaction.id_or_default(index)),
            (format!("{prefix}.type"), interaction.kind.as_str().to_owned()),
            (
                format!("{prefix}.{}", dialect.response_field()),
                interaction.learner_response.clone(),
            ),
            (
                format!("{prefix}.correct_responses.0.pattern"),
                interaction.correct_response.clone(),
            ),
            (format!("{prefix}.result"), interaction.result.as_str().to_owned()),
        ];
        if let Some(latency) = interaction.latency {
            writes.push((format!("{prefix}.latency"), dialect.timespan(latency)));
        }
        if let Some(weighting) = interaction.weighting {
            writes.push((format!("{prefix}.weighting"), dialect::decimal(weighting)));
        }

        writes
            .into_iter()
            .fold(Outcome::Unchanged, |acc, (element, value)| {
                acc.and(self.set_value(&element, &value))
            })
    }
}

impl fmt::Debug for SessionBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBridge")
            .field("protocol_version", &self.protocol_version())
            .field("initialized", &self.initialized)
            .field("terminated", &self.terminated)
            .finish()
    }
}

fn diagnostic(dialect: &dyn Dialect) -> Option<HostDiagnostic> {
    let code = dialect.last_error_code();
    let code = code.trim();
    if code.is_empty() || code == "0" {
        return None;
    }
    Some(HostDiagnostic {
        code: code.to_owned(),
        message: dialect.error_string(code),
    })
}

fn reject(dialect: &dyn Dialect, call: HostCall, element: Option<&str>) -> Rejection {
    Rejection {
        call,
        element: element.map(str::to_owned),
        diagnostic: diagnostic(dialect),
    }
}
