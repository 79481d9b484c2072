use std::sync::Arc;

use course_core::{LessonStatus, Score, SessionDuration};

use super::{DataWrite, Dialect, ProtocolVersion, decimal};
use crate::host::LegacyApi;

const LESSON_STATUS: &str = "cmi.core.lesson_status";

/// SCORM 1.2: one combined status field, no scaled score.
pub struct LegacyDialect {
    api: Arc<dyn LegacyApi>,
}

impl LegacyDialect {
    #[must_use]
    pub fn new(api: Arc<dyn LegacyApi>) -> Self {
        Self { api }
    }
}

impl Dialect for LegacyDialect {
    fn version(&self) -> ProtocolVersion {
        ProtocolVersion::Legacy
    }

    fn initialize(&self) -> bool {
        self.api.lms_initialize("").is_true()
    }

    fn finish(&self) -> bool {
        self.api.lms_finish("").is_true()
    }

    fn get_value(&self, element: &str) -> String {
        self.api.lms_get_value(element)
    }

    fn set_value(&self, element: &str, value: &str) -> bool {
        self.api.lms_set_value(element, value).is_true()
    }

    fn commit(&self) -> bool {
        self.api.lms_commit("").is_true()
    }

    fn last_error_code(&self) -> String {
        self.api.lms_get_last_error()
    }

    fn error_string(&self, code: &str) -> String {
        self.api.lms_get_error_string(code)
    }

    fn read_status(&self) -> Option<LessonStatus> {
        LessonStatus::parse(&self.get_value(LESSON_STATUS))
    }

    fn status_writes(&self, status: LessonStatus) -> Vec<DataWrite> {
        vec![(LESSON_STATUS, status.as_str().to_owned())]
    }

    fn score_writes(&self, score: &Score) -> Vec<DataWrite> {
        vec![
            ("cmi.core.score.raw", decimal(score.raw())),
            ("cmi.core.score.max", decimal(score.max())),
            ("cmi.core.score.min", decimal(score.min())),
        ]
    }

    fn score_raw_element(&self) -> &'static str {
        "cmi.core.score.raw"
    }

    fn session_time_element(&self) -> &'static str {
        "cmi.core.session_time"
    }

    fn timespan(&self, duration: SessionDuration) -> String {
        duration.clock_time()
    }

    fn learner_name_element(&self) -> &'static str {
        "cmi.core.student_name"
    }

    fn learner_id_element(&self) -> &'static str {
        "cmi.core.student_id"
    }

    fn response_field(&self) -> &'static str {
        "student_response"
    }
}
