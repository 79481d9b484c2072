use serde::{Deserialize, Serialize};

use crate::model::SessionDuration;

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// Interaction type, written to `cmi.interactions.n.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionKind {
    TrueFalse,
    #[default]
    Choice,
    FillIn,
    Matching,
    Performance,
    Sequencing,
    Likert,
    Numeric,
    Other,
}

impl InteractionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionKind::TrueFalse => "true-false",
            InteractionKind::Choice => "choice",
            InteractionKind::FillIn => "fill-in",
            InteractionKind::Matching => "matching",
            InteractionKind::Performance => "performance",
            InteractionKind::Sequencing => "sequencing",
            InteractionKind::Likert => "likert",
            InteractionKind::Numeric => "numeric",
            InteractionKind::Other => "other",
        }
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionResult {
    Correct,
    Incorrect,
    Unanticipated,
    Neutral,
}

impl InteractionResult {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionResult::Correct => "correct",
            InteractionResult::Incorrect => "incorrect",
            InteractionResult::Unanticipated => "unanticipated",
            InteractionResult::Neutral => "neutral",
        }
    }

    #[must_use]
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            InteractionResult::Correct
        } else {
            InteractionResult::Incorrect
        }
    }
}

//
// ─── INTERACTION ───────────────────────────────────────────────────────────────
//

/// One learner response to a graded prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: Option<String>,
    #[serde(default)]
    pub kind: InteractionKind,
    pub learner_response: String,
    pub correct_response: String,
    pub result: InteractionResult,
    pub latency: Option<SessionDuration>,
    pub weighting: Option<f64>,
}

impl Interaction {
    /// A choice interaction graded by comparing the response to the expected pattern.
    #[must_use]
    pub fn choice(
        id: impl Into<String>,
        learner_response: impl Into<String>,
        correct_response: impl Into<String>,
    ) -> Self {
        let learner_response = learner_response.into();
        let correct_response = correct_response.into();
        let result = InteractionResult::from_correct(learner_response == correct_response);
        Self {
            id: Some(id.into()),
            kind: InteractionKind::Choice,
            learner_response,
            correct_response,
            result,
            latency: None,
            weighting: None,
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: SessionDuration) -> Self {
        self.latency = Some(latency);
        self
    }

    #[must_use]
    pub fn with_weighting(mut self, weighting: f64) -> Self {
        self.weighting = Some(weighting);
        self
    }

    /// Identifier to write, falling back to `interaction_{index}`.
    #[must_use]
    pub fn id_or_default(&self, index: usize) -> String {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| format!("interaction_{index}"), str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_grades_by_pattern() {
        assert_eq!(Interaction::choice("q1", "b", "b").result, InteractionResult::Correct);
        assert_eq!(Interaction::choice("q1", "a", "b").result, InteractionResult::Incorrect);
    }

    #[test]
    fn missing_id_uses_index() {
        let mut interaction = Interaction::choice("", "a", "a");
        assert_eq!(interaction.id_or_default(4), "interaction_4");
        interaction.id = None;
        assert_eq!(interaction.id_or_default(0), "interaction_0");
    }

    #[test]
    fn kind_defaults_to_choice_when_deserialized() {
        let raw = r#"{"id":null,"learner_response":"a","correct_response":"b","result":"incorrect","latency":null,"weighting":null}"#;
        let interaction: Interaction = serde_json::from_str(raw).unwrap();
        assert_eq!(interaction.kind, InteractionKind::Choice);
    }
}
