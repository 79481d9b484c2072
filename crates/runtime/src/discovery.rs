use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::dialect::ProtocolVersion;
use crate::frame::{Frame, same_frame};
use crate::host::{CurrentApi, LegacyApi};

/// Upper bound on parent hops, guarding against malformed (cyclic) embeddings.
pub const MAX_FRAME_HOPS: usize = 500;

/// A located host endpoint, tagged with the dialect it speaks.
#[derive(Clone)]
pub enum Endpoint {
    Current(Arc<dyn CurrentApi>),
    Legacy(Arc<dyn LegacyApi>),
}

impl Endpoint {
    #[must_use]
    pub fn version(&self) -> ProtocolVersion {
        match self {
            Endpoint::Current(_) => ProtocolVersion::Current,
            Endpoint::Legacy(_) => ProtocolVersion::Legacy,
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Endpoint").field(&self.version()).finish()
    }
}

/// Locate the host endpoint starting at `start`.
///
/// Walks up the parent chain checking each frame for a current-dialect
/// endpoint, then a legacy one. If the chain is exhausted, the search is
/// repeated once from the frame that opened `start`. Returns `None` when no
/// endpoint is reachable.
#[must_use]
pub fn discover(start: &Arc<dyn Frame>) -> Option<Endpoint> {
    if let Some(endpoint) = search_ancestors(Arc::clone(start)) {
        return Some(endpoint);
    }

    let opener = start.opener()?;
    debug!("host not found among ancestors; retrying from opener");
    search_ancestors(opener)
}

fn search_ancestors(mut frame: Arc<dyn Frame>) -> Option<Endpoint> {
    for hop in 0..MAX_FRAME_HOPS {
        if let Some(api) = frame.current_api() {
            debug!(hop, "found current-dialect host endpoint");
            return Some(Endpoint::Current(api));
        }
        if let Some(api) = frame.legacy_api() {
            debug!(hop, "found legacy-dialect host endpoint");
            return Some(Endpoint::Legacy(api));
        }

        match frame.parent() {
            Some(parent) if !same_frame(&parent, &frame) => frame = parent,
            _ => return None,
        }
    }

    debug!(max_hops = MAX_FRAME_HOPS, "frame walk hit hop limit");
    None
}
