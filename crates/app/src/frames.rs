use std::sync::Arc;

use runtime::{Frame, InMemoryFrame, InMemoryHost};

use crate::args::DialectChoice;

/// Builds the window the course runs in: `depth` frames below a top window that
/// exposes `host` through the chosen API.
#[must_use]
pub fn build(host: &InMemoryHost, dialect: DialectChoice, depth: usize) -> Arc<dyn Frame> {
    let top = match dialect {
        DialectChoice::Current => InMemoryFrame::empty().with_current(Arc::new(host.clone())),
        DialectChoice::Legacy => InMemoryFrame::empty().with_legacy(Arc::new(host.clone())),
        DialectChoice::None => InMemoryFrame::empty(),
    }
    .into_top();
    InMemoryFrame::nested_under(top, depth)
}

#[cfg(test)]
mod tests {
    use runtime::{MAX_FRAME_HOPS, ProtocolVersion, discover};

    use super::*;

    #[test]
    fn chosen_dialect_is_discoverable() {
        let host = InMemoryHost::new();
        let frame = build(&host, DialectChoice::Legacy, 3);
        assert_eq!(discover(&frame).map(|e| e.version()), Some(ProtocolVersion::Legacy));
    }

    #[test]
    fn none_and_too_deep_are_standalone() {
        let host = InMemoryHost::new();
        assert!(discover(&build(&host, DialectChoice::None, 0)).is_none());
        assert!(discover(&build(&host, DialectChoice::Current, MAX_FRAME_HOPS)).is_none());
    }
}
