use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookmarkError {
    #[error("bookmark is empty")]
    Empty,
    #[error("bookmark is not a slide index: {raw:?}")]
    NotAnIndex { raw: String },
}

/// Resume token stored in the host's bookmark field: a decimal slide index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlideBookmark(usize);

impl SlideBookmark {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }

    /// Lenient decode used when resuming: malformed input becomes `None`.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    #[must_use]
    pub fn encode(&self) -> String {
        self.0.to_string()
    }
}

impl FromStr for SlideBookmark {
    type Err = BookmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BookmarkError::Empty);
        }
        trimmed
            .parse::<usize>()
            .map(Self)
            .map_err(|_| BookmarkError::NotAnIndex { raw: s.to_owned() })
    }
}

impl fmt::Display for SlideBookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_trimmed_index() {
        assert_eq!(SlideBookmark::decode(" 7 "), Some(SlideBookmark::new(7)));
        assert_eq!(SlideBookmark::new(12).encode(), "12");
    }

    #[test]
    fn malformed_bookmarks_are_rejected() {
        assert_eq!("".parse::<SlideBookmark>(), Err(BookmarkError::Empty));
        assert!(matches!(
            "{\"v\":1}".parse::<SlideBookmark>(),
            Err(BookmarkError::NotAnIndex { .. })
        ));
        assert_eq!(SlideBookmark::decode("-1"), None);
    }
}
