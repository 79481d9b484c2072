use std::sync::Arc;

use runtime::{
    CurrentApi, Frame, InMemoryFrame, InMemoryHost, LegacyApi, MAX_FRAME_HOPS, ProtocolVersion,
    SessionBridge, discover,
};

fn host_top(host: &InMemoryHost, version: ProtocolVersion) -> Arc<dyn Frame> {
    let frame = InMemoryFrame::empty();
    match version {
        ProtocolVersion::Current => frame.with_current(Arc::new(host.clone())),
        ProtocolVersion::Legacy => frame.with_legacy(Arc::new(host.clone())),
    }
    .into_top()
}

#[test]
fn finds_endpoint_on_current_frame() {
    let host = InMemoryHost::new();
    let frame = host_top(&host, ProtocolVersion::Legacy);
    let endpoint = discover(&frame).expect("endpoint");
    assert_eq!(endpoint.version(), ProtocolVersion::Legacy);
}

#[test]
fn current_dialect_wins_on_same_level() {
    let host = InMemoryHost::new();
    let current: Arc<dyn CurrentApi> = Arc::new(host.clone());
    let legacy: Arc<dyn LegacyApi> = Arc::new(host);
    let frame = InMemoryFrame::empty()
        .with_legacy(legacy)
        .with_current(current)
        .into_top();

    assert_eq!(discover(&frame).unwrap().version(), ProtocolVersion::Current);
}

#[test]
fn nearer_legacy_beats_farther_current() {
    let host = InMemoryHost::new();
    let top = host_top(&host, ProtocolVersion::Current);
    let middle = InMemoryFrame::empty()
        .with_legacy(Arc::new(host))
        .with_parent(top)
        .into_frame();
    let inner = InMemoryFrame::nested_under(middle, 2);

    assert_eq!(discover(&inner).unwrap().version(), ProtocolVersion::Legacy);
}

#[test]
fn walks_up_nested_frames_within_hop_limit() {
    let host = InMemoryHost::new();
    let top = host_top(&host, ProtocolVersion::Current);
    let inner = InMemoryFrame::nested_under(top, MAX_FRAME_HOPS - 1);

    assert!(discover(&inner).is_some());
}

#[test]
fn gives_up_past_hop_limit() {
    let host = InMemoryHost::new();
    let top = host_top(&host, ProtocolVersion::Current);
    let inner = InMemoryFrame::nested_under(top, MAX_FRAME_HOPS);

    assert!(discover(&inner).is_none());
}

#[test]
fn stops_at_self_parented_top() {
    let top = InMemoryFrame::empty().into_top();
    let inner = InMemoryFrame::nested_under(top, 3);
    assert!(discover(&inner).is_none());
}

#[test]
fn retries_once_from_opener() {
    let host = InMemoryHost::new();
    let opener_top = host_top(&host, ProtocolVersion::Legacy);
    let opener = InMemoryFrame::nested_under(opener_top, 1);
    let popup = InMemoryFrame::empty().with_opener(opener).into_top();

    assert_eq!(discover(&popup).unwrap().version(), ProtocolVersion::Legacy);
}

#[test]
fn opener_retry_does_not_chain() {
    let host = InMemoryHost::new();
    let grand_opener = host_top(&host, ProtocolVersion::Current);
    let opener = InMemoryFrame::empty().with_opener(grand_opener).into_top();
    let popup = InMemoryFrame::empty().with_opener(opener).into_top();

    assert!(discover(&popup).is_none());
}

#[test]
fn bridge_without_endpoint_is_standalone() {
    let frame = InMemoryFrame::empty().into_top();
    let bridge = SessionBridge::discover(&frame);
    assert!(!bridge.is_available());
    assert_eq!(bridge.protocol_version(), None);
}
