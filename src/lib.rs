//! Countdown GIF renderer.
//!
//! Renders the time left until a target instant as an animated GIF, one anti-aliased text frame
//! per second, and streams the encoded bytes out as each frame is finished:
//!
//! - Describe the countdown with a [`CountdownRequest`] and resolve it into an [`EncodeSession`]
//! - Drive it through a [`StreamingEncodeDriver`] (or just call [`render`]) into a [`ByteSink`]
//!
//! Text is drawn white on black and quantized into a small [`Palette`] ramp between the
//! requested background and text colors, so every frame shares one color table.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Container encoding and output sinks.
pub mod encode;
/// Text rasterization and quantization.
pub mod render;
/// Per-request sessions and the streaming frame loop.
pub mod session;
/// Target-time parsing and countdown text templates.
pub mod time;

pub use crate::foundation::core::{
    Canvas, MAX_CANVAS_EDGE, MAX_FORMAT_CHARS, MAX_FRAMES, MAX_MESSAGE_CHARS, MIN_CANVAS_EDGE,
    MIN_FRAMES, Rgb8,
};
pub use crate::foundation::error::{CountdownError, CountdownResult};

pub use crate::encode::container::{ContainerEncoder, LOOP_FOREVER};
pub use crate::encode::gif_stream::GifStreamEncoder;
pub use crate::encode::sink::{ByteSink, ChannelSink, InMemorySink, WriterSink};
pub use crate::render::cpu::{CpuTextRasterizer, FontSource};
pub use crate::render::frame::IndexedFrame;
pub use crate::render::glyph::GlyphRasterizer;
pub use crate::render::palette::Palette;
pub use crate::render::surface::Surface;
pub use crate::render::text_frame::{TextFrameRasterizer, fit_font_size};
pub use crate::session::driver::{
    FRAME_DELAY_MS, RenderStats, StreamingEncodeDriver, preview_frame, render, render_at,
    render_session,
};
pub use crate::session::encode_session::EncodeSession;
pub use crate::session::request::{CountdownRequest, RenderOptions};
pub use crate::time::duration::{Remaining, TimeParts, parse_target_time, parse_target_time_in};
pub use crate::time::template::{FormatTemplate, TemplateFormatter};
