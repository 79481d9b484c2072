use std::fs;
use std::path::Path;

use serde::Deserialize;
use services::NavigatorConfig;
use ui::SlideContent;

use crate::error::AppError;

/// A course file: its title, the ordered slides, and optional navigator settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseManifest {
    pub title: String,
    pub slides: Vec<SlideContent>,
    #[serde(default)]
    pub navigation: NavigatorConfig,
}

impl CourseManifest {
    /// # Errors
    ///
    /// Returns [`AppError::Read`] or [`AppError::Parse`] for unreadable or malformed files.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| AppError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use services::TextDirection;

    use super::*;

    #[test]
    fn navigation_section_is_optional() {
        let manifest: CourseManifest =
            serde_json::from_str(r#"{"title":"Intro","slides":[{"title":"One"}]}"#).unwrap();
        assert_eq!(manifest.navigation, NavigatorConfig::default());
        assert_eq!(manifest.slides.len(), 1);
    }

    #[test]
    fn reads_navigation_overrides() {
        let manifest: CourseManifest = serde_json::from_str(
            r#"{
                "title": "يوم التأسيس",
                "slides": [{"title": "One", "body": "..."}],
                "navigation": {"text_direction": "rtl", "settle_delay_ms": 250}
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.navigation.text_direction, TextDirection::Rtl);
        assert_eq!(manifest.navigation.settle_delay_ms, 250);
    }
}
