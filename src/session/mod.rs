//! Per-request countdown sessions and the streaming frame loop.

/// Streaming frame loop and the `render` entry points.
pub mod driver;
/// Resolved, clamped per-request state.
pub mod encode_session;
/// Request parameters and engine options.
pub mod request;
