//! In-memory host and frame implementations for testing and prototyping.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::{Deserialize, Serialize};

use crate::dialect::{INTERACTION_COUNT, ProtocolVersion};
use crate::frame::Frame;
use crate::host::{CurrentApi, HostValue, LegacyApi};

//
// ─── HOST ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    NotInitialized,
    Running,
    Terminated,
}

/// Persisted data-model values, without any session lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub values: BTreeMap<String, String>,
}

#[derive(Debug)]
struct HostState {
    values: BTreeMap<String, String>,
    lifecycle: Lifecycle,
    last_error: &'static str,
    text_replies: bool,
    reject_writes: bool,
    record_writes: bool,
    writes: Vec<(String, String)>,
    commits: usize,
}

impl HostState {
    fn new(values: BTreeMap<String, String>) -> Self {
        Self {
            values,
            lifecycle: Lifecycle::NotInitialized,
            last_error: "0",
            text_replies: false,
            reject_writes: false,
            record_writes: false,
            writes: Vec::new(),
            commits: 0,
        }
    }

    fn reply(&mut self, ok: bool, error: &'static str) -> HostValue {
        self.last_error = if ok { "0" } else { error };
        if self.text_replies {
            HostValue::Text(ok.to_string())
        } else {
            HostValue::Bool(ok)
        }
    }

    fn initialize(&mut self, version: ProtocolVersion) -> HostValue {
        match self.lifecycle {
            Lifecycle::NotInitialized => {
                self.lifecycle = Lifecycle::Running;
                self.reply(true, "0")
            }
            Lifecycle::Running => self.reply(false, codes::already_initialized(version)),
            Lifecycle::Terminated => self.reply(false, codes::terminated(version)),
        }
    }

    fn finish(&mut self, version: ProtocolVersion) -> HostValue {
        match self.lifecycle {
            Lifecycle::Running => {
                self.lifecycle = Lifecycle::Terminated;
                self.reply(true, "0")
            }
            Lifecycle::NotInitialized => self.reply(false, codes::not_initialized(version)),
            Lifecycle::Terminated => self.reply(false, codes::terminated(version)),
        }
    }

    fn get(&mut self, version: ProtocolVersion, element: &str) -> String {
        if let Some(code) = self.lifecycle_error(version) {
            self.last_error = code;
            return String::new();
        }
        self.last_error = "0";
        if element == INTERACTION_COUNT {
            return self.interaction_count().to_string();
        }
        self.values.get(element).cloned().unwrap_or_default()
    }

    fn set(&mut self, version: ProtocolVersion, element: &str, value: &str) -> HostValue {
        if let Some(code) = self.lifecycle_error(version) {
            return self.reply(false, code);
        }
        if self.reject_writes {
            return self.reply(false, codes::general(version));
        }
        if self.record_writes {
            self.writes.push((element.to_owned(), value.to_owned()));
        }
        self.values.insert(element.to_owned(), value.to_owned());
        self.reply(true, "0")
    }

    fn commit(&mut self, version: ProtocolVersion) -> HostValue {
        if let Some(code) = self.lifecycle_error(version) {
            return self.reply(false, code);
        }
        self.commits += 1;
        self.reply(true, "0")
    }

    fn lifecycle_error(&self, version: ProtocolVersion) -> Option<&'static str> {
        match self.lifecycle {
            Lifecycle::Running => None,
            Lifecycle::NotInitialized => Some(codes::not_initialized(version)),
            Lifecycle::Terminated => Some(codes::terminated(version)),
        }
    }

    fn interaction_count(&self) -> usize {
        self.values
            .keys()
            .filter_map(|key| key.strip_prefix("cmi.interactions."))
            .filter_map(|rest| rest.split('.').next())
            .filter_map(|index| index.parse::<usize>().ok())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

mod codes {
    use crate::dialect::ProtocolVersion;

    pub(super) fn general(version: ProtocolVersion) -> &'static str {
        match version {
            ProtocolVersion::Legacy => "101",
            ProtocolVersion::Current => "351",
        }
    }

    pub(super) fn already_initialized(version: ProtocolVersion) -> &'static str {
        match version {
            ProtocolVersion::Legacy => "101",
            ProtocolVersion::Current => "103",
        }
    }

    pub(super) fn not_initialized(version: ProtocolVersion) -> &'static str {
        match version {
            ProtocolVersion::Legacy => "301",
            ProtocolVersion::Current => "122",
        }
    }

    pub(super) fn terminated(version: ProtocolVersion) -> &'static str {
        match version {
            ProtocolVersion::Legacy => "101",
            ProtocolVersion::Current => "104",
        }
    }

    pub(super) fn describe(code: &str) -> &'static str {
        match code {
            "0" => "No error",
            "101" => "General exception",
            "103" => "Already initialized",
            "104" => "Content instance terminated",
            "122" | "301" => "Not initialized",
            "351" => "General set failure",
            _ => "",
        }
    }
}

/// Key/value host that answers both dialects over the same data.
///
/// Cloning shares state, so a test can keep a handle while the bridge owns another.
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    state: Arc<Mutex<HostState>>,
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::from_snapshot(HostSnapshot::default())
    }

    #[must_use]
    pub fn from_snapshot(snapshot: HostSnapshot) -> Self {
        Self {
            state: Arc::new(Mutex::new(HostState::new(snapshot.values))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            values: self.lock().values.clone(),
        }
    }

    /// Preload a value, bypassing the session lifecycle.
    pub fn seed(&self, element: &str, value: &str) {
        self.lock()
            .values
            .insert(element.to_owned(), value.to_owned());
    }

    /// Inspect a stored value, bypassing the session lifecycle.
    #[must_use]
    pub fn value(&self, element: &str) -> Option<String> {
        self.lock().values.get(element).cloned()
    }

    /// Reply with `"true"`/`"false"` text instead of native booleans.
    pub fn set_text_replies(&self, enabled: bool) {
        self.lock().text_replies = enabled;
    }

    /// Refuse every subsequent write.
    pub fn set_reject_writes(&self, enabled: bool) {
        self.lock().reject_writes = enabled;
    }

    /// Keep a log of accepted writes for [`writes`](Self::writes). Off by default.
    pub fn set_record_writes(&self, enabled: bool) {
        self.lock().record_writes = enabled;
    }

    /// Accepted writes in call order, since recording was enabled.
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.lock().writes.clone()
    }

    /// Number of accepted writes to `element`.
    #[must_use]
    pub fn writes_to(&self, element: &str) -> usize {
        self.lock()
            .writes
            .iter()
            .filter(|(key, _)| key == element)
            .count()
    }

    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.lock().commits
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock().lifecycle == Lifecycle::Running
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.lock().lifecycle == Lifecycle::Terminated
    }
}

impl CurrentApi for InMemoryHost {
    fn initialize(&self, _param: &str) -> HostValue {
        self.lock().initialize(ProtocolVersion::Current)
    }

    fn terminate(&self, _param: &str) -> HostValue {
        self.lock().finish(ProtocolVersion::Current)
    }

    fn get_value(&self, element: &str) -> String {
        self.lock().get(ProtocolVersion::Current, element)
    }

    fn set_value(&self, element: &str, value: &str) -> HostValue {
        self.lock().set(ProtocolVersion::Current, element, value)
    }

    fn commit(&self, _param: &str) -> HostValue {
        self.lock().commit(ProtocolVersion::Current)
    }

    fn get_last_error(&self) -> String {
        self.lock().last_error.to_owned()
    }

    fn get_error_string(&self, code: &str) -> String {
        codes::describe(code).to_owned()
    }
}

impl LegacyApi for InMemoryHost {
    fn lms_initialize(&self, _param: &str) -> HostValue {
        self.lock().initialize(ProtocolVersion::Legacy)
    }

    fn lms_finish(&self, _param: &str) -> HostValue {
        self.lock().finish(ProtocolVersion::Legacy)
    }

    fn lms_get_value(&self, element: &str) -> String {
        self.lock().get(ProtocolVersion::Legacy, element)
    }

    fn lms_set_value(&self, element: &str, value: &str) -> HostValue {
        self.lock().set(ProtocolVersion::Legacy, element, value)
    }

    fn lms_commit(&self, _param: &str) -> HostValue {
        self.lock().commit(ProtocolVersion::Legacy)
    }

    fn lms_get_last_error(&self) -> String {
        self.lock().last_error.to_owned()
    }

    fn lms_get_error_string(&self, code: &str) -> String {
        codes::describe(code).to_owned()
    }
}

//
// ─── FRAMES ────────────────────────────────────────────────────────────────────
//

enum ParentLink {
    None,
    Itself(Weak<InMemoryFrame>),
    Frame(Arc<dyn Frame>),
}

/// A frame in a simulated embedding hierarchy.
pub struct InMemoryFrame {
    current: Option<Arc<dyn CurrentApi>>,
    legacy: Option<Arc<dyn LegacyApi>>,
    parent: ParentLink,
    opener: Option<Arc<dyn Frame>>,
}

impl InMemoryFrame {
    /// A frame with no endpoints and no relatives.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            current: None,
            legacy: None,
            parent: ParentLink::None,
            opener: None,
        }
    }

    #[must_use]
    pub fn with_current(mut self, api: Arc<dyn CurrentApi>) -> Self {
        self.current = Some(api);
        self
    }

    #[must_use]
    pub fn with_legacy(mut self, api: Arc<dyn LegacyApi>) -> Self {
        self.legacy = Some(api);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: Arc<dyn Frame>) -> Self {
        self.parent = ParentLink::Frame(parent);
        self
    }

    #[must_use]
    pub fn with_opener(mut self, opener: Arc<dyn Frame>) -> Self {
        self.opener = Some(opener);
        self
    }

    /// Finish as a topmost window whose parent is itself.
    #[must_use]
    pub fn into_top(self) -> Arc<dyn Frame> {
        let frame: Arc<InMemoryFrame> = Arc::new_cyclic(|weak| InMemoryFrame {
            parent: ParentLink::Itself(weak.clone()),
            ..self
        });
        frame
    }

    #[must_use]
    pub fn into_frame(self) -> Arc<dyn Frame> {
        Arc::new(self)
    }

    /// A chain of `depth` empty frames under `top`; returns the innermost.
    #[must_use]
    pub fn nested_under(top: Arc<dyn Frame>, depth: usize) -> Arc<dyn Frame> {
        (0..depth).fold(top, |parent, _| {
            InMemoryFrame::empty().with_parent(parent).into_frame()
        })
    }
}

impl Frame for InMemoryFrame {
    fn current_api(&self) -> Option<Arc<dyn CurrentApi>> {
        self.current.clone()
    }

    fn legacy_api(&self) -> Option<Arc<dyn LegacyApi>> {
        self.legacy.clone()
    }

    fn parent(&self) -> Option<Arc<dyn Frame>> {
        match &self.parent {
            ParentLink::None => None,
            ParentLink::Itself(weak) => weak.upgrade().map(|frame| frame as Arc<dyn Frame>),
            ParentLink::Frame(parent) => Some(Arc::clone(parent)),
        }
    }

    fn opener(&self) -> Option<Arc<dyn Frame>> {
        self.opener.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_before_initialize_fail_with_dialect_code() {
        let host = InMemoryHost::new();
        host.set_record_writes(true);
        assert!(!LegacyApi::lms_set_value(&host, "cmi.suspend_data", "1").is_true());
        assert_eq!(host.lms_get_last_error(), "301");
        assert!(!CurrentApi::set_value(&host, "cmi.suspend_data", "1").is_true());
        assert_eq!(CurrentApi::get_last_error(&host), "122");
        assert!(host.writes().is_empty());
    }

    #[test]
    fn write_log_is_opt_in() {
        let host = InMemoryHost::new();
        CurrentApi::initialize(&host, "");
        CurrentApi::set_value(&host, "cmi.suspend_data", "1");
        assert!(host.writes().is_empty());

        host.set_record_writes(true);
        CurrentApi::set_value(&host, "cmi.suspend_data", "2");
        assert_eq!(host.writes(), vec![("cmi.suspend_data".to_owned(), "2".to_owned())]);
        assert_eq!(host.value("cmi.suspend_data").as_deref(), Some("2"));
    }

    #[test]
    fn text_replies_are_strings() {
        let host = InMemoryHost::new();
        host.set_text_replies(true);
        assert_eq!(CurrentApi::initialize(&host, ""), HostValue::Text("true".into()));
        assert_eq!(CurrentApi::initialize(&host, ""), HostValue::Text("false".into()));
        assert_eq!(CurrentApi::get_last_error(&host), "103");
    }

    #[test]
    fn counts_distinct_interaction_indices() {
        let host = InMemoryHost::new();
        host.seed("cmi.interactions.0.id", "q1");
        host.seed("cmi.interactions.0.result", "correct");
        host.seed("cmi.interactions.1.id", "q2");
        CurrentApi::initialize(&host, "");
        assert_eq!(CurrentApi::get_value(&host, INTERACTION_COUNT), "2");
    }

    #[test]
    fn snapshot_survives_new_session() {
        let host = InMemoryHost::new();
        LegacyApi::lms_initialize(&host, "");
        LegacyApi::lms_set_value(&host, "cmi.suspend_data", "4");
        LegacyApi::lms_finish(&host, "");

        let restored = InMemoryHost::from_snapshot(host.snapshot());
        assert!(!restored.is_running());
        assert_eq!(restored.value("cmi.suspend_data").as_deref(), Some("4"));
    }

    #[test]
    fn top_frame_is_its_own_parent() {
        let top = InMemoryFrame::empty().into_top();
        let parent = top.parent().unwrap();
        assert!(crate::frame::same_frame(&top, &parent));
    }
}
