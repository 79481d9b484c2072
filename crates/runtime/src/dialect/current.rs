use std::sync::Arc;

use course_core::{LessonStatus, Score, SessionDuration};

use super::{DataWrite, Dialect, ProtocolVersion, decimal};
use crate::host::CurrentApi;

const COMPLETION_STATUS: &str = "cmi.completion_status";
const SUCCESS_STATUS: &str = "cmi.success_status";

/// SCORM 2004: completion and success are separate dimensions.
pub struct CurrentDialect {
    api: Arc<dyn CurrentApi>,
}

impl CurrentDialect {
    #[must_use]
    pub fn new(api: Arc<dyn CurrentApi>) -> Self {
        Self { api }
    }
}

impl Dialect for CurrentDialect {
    fn version(&self) -> ProtocolVersion {
        ProtocolVersion::Current
    }

    fn initialize(&self) -> bool {
        self.api.initialize("").is_true()
    }

    fn finish(&self) -> bool {
        self.api.terminate("").is_true()
    }

    fn get_value(&self, element: &str) -> String {
        self.api.get_value(element)
    }

    fn set_value(&self, element: &str, value: &str) -> bool {
        self.api.set_value(element, value).is_true()
    }

    fn commit(&self) -> bool {
        self.api.commit("").is_true()
    }

    fn last_error_code(&self) -> String {
        self.api.get_last_error()
    }

    fn error_string(&self, code: &str) -> String {
        self.api.get_error_string(code)
    }

    fn read_status(&self) -> Option<LessonStatus> {
        let success = LessonStatus::parse(&self.get_value(SUCCESS_STATUS));
        if let Some(status) = success.filter(|s| s.is_success_dimension()) {
            return Some(status);
        }
        LessonStatus::parse(&self.get_value(COMPLETION_STATUS))
    }

    fn status_writes(&self, status: LessonStatus) -> Vec<DataWrite> {
        if status.is_success_dimension() {
            vec![
                (SUCCESS_STATUS, status.as_str().to_owned()),
                (COMPLETION_STATUS, LessonStatus::Completed.as_str().to_owned()),
            ]
        } else {
            vec![(COMPLETION_STATUS, status.as_str().to_owned())]
        }
    }

    fn score_writes(&self, score: &Score) -> Vec<DataWrite> {
        vec![
            ("cmi.score.scaled", score.scaled_text()),
            ("cmi.score.raw", decimal(score.raw())),
            ("cmi.score.max", decimal(score.max())),
            ("cmi.score.min", decimal(score.min())),
        ]
    }

    fn score_raw_element(&self) -> &'static str {
        "cmi.score.raw"
    }

    fn session_time_element(&self) -> &'static str {
        "cmi.session_time"
    }

    fn timespan(&self, duration: SessionDuration) -> String {
        duration.iso8601()
    }

    fn learner_name_element(&self) -> &'static str {
        "cmi.learner_name"
    }

    fn learner_id_element(&self) -> &'static str {
        "cmi.learner_id"
    }

    fn response_field(&self) -> &'static str {
        "learner_response"
    }
}
