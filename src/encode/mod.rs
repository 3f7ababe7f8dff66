//! Encoding: the incremental container interface, its GIF implementation and output sinks.
//!
//! Encoders push each frame's bytes into a [`sink::ByteSink`] as soon as the frame is encoded,
//! so a slow consumer throttles rendering instead of growing a buffer.

/// Incremental animated-container encoder interface.
pub mod container;
/// GIF89a implementation of [`container::ContainerEncoder`].
pub mod gif_stream;
/// Backpressure-aware byte sinks.
pub mod sink;
