//! Thin DevTools plumbing: target discovery, a request/response client,
//! and the editor surface driven through in-page evaluation.

mod client;
mod discovery;
mod surface;

pub use client::CdpClient;
pub use discovery::{DEFAULT_DEBUG_PORT, DESIGNER_TARGET, DebugTarget, find_target, list_targets};
pub use surface::CdpSurface;
