//! Session bridge between course content and the hosting LMS runtime.
//!
//! The host may speak either of two incompatible protocol dialects (SCORM 1.2,
//! called *legacy* here, and SCORM 2004, called *current*). [`SessionBridge`]
//! discovers which one is reachable and hides the difference from callers.

#![forbid(unsafe_code)]

pub mod bridge;
pub mod dialect;
pub mod discovery;
pub mod error;
pub mod frame;
pub mod host;
pub mod memory;

pub use bridge::SessionBridge;
pub use dialect::ProtocolVersion;
pub use discovery::{Endpoint, MAX_FRAME_HOPS, discover};
pub use error::{HostCall, HostDiagnostic, Outcome, Rejection};
pub use frame::Frame;
pub use host::{CurrentApi, HostValue, LegacyApi};
pub use memory::{HostSnapshot, InMemoryFrame, InMemoryHost};
