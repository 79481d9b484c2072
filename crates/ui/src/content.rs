use serde::{Deserialize, Serialize};

/// Text of one slide as listed in a course manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl SlideContent {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}
