use std::sync::Arc;

use crate::host::{CurrentApi, LegacyApi};

/// One execution context in the embedding hierarchy (a window or sub-frame).
///
/// A topmost frame may report itself as its own parent, the way browser
/// windows do; discovery treats that the same as having no parent.
pub trait Frame: Send + Sync {
    /// The current-dialect endpoint exposed directly on this frame.
    fn current_api(&self) -> Option<Arc<dyn CurrentApi>>;

    /// The legacy-dialect endpoint exposed directly on this frame.
    fn legacy_api(&self) -> Option<Arc<dyn LegacyApi>>;

    fn parent(&self) -> Option<Arc<dyn Frame>>;

    /// The frame that opened this one, if it was opened as a pop-up.
    fn opener(&self) -> Option<Arc<dyn Frame>>;
}

/// Identity comparison that ignores vtable pointers.
#[must_use]
pub fn same_frame(a: &Arc<dyn Frame>, b: &Arc<dyn Frame>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
