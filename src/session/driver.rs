use chrono::{DateTime, Utc};

use crate::encode::container::{ContainerEncoder, LOOP_FOREVER};
use crate::encode::gif_stream::GifStreamEncoder;
use crate::encode::sink::ByteSink;
use crate::foundation::error::CountdownResult;
use crate::render::cpu::{CpuTextRasterizer, FontSource};
use crate::render::frame::IndexedFrame;
use crate::render::glyph::GlyphRasterizer;
use crate::render::text_frame::TextFrameRasterizer;
use crate::session::encode_session::EncodeSession;
use crate::session::request::{CountdownRequest, RenderOptions};

/// Delay between countdown frames.
pub const FRAME_DELAY_MS: u32 = 1_000;

/// Outcome of one streamed countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames written to the container.
    pub frames: u32,
    /// Bytes accepted by the sink.
    pub bytes: u64,
    /// The target had already passed, so only the fallback frame was written.
    pub expired: bool,
}

/// Runs the frame loop of one session against a [`ContainerEncoder`].
///
/// Frames are rasterized and handed to the encoder one at a time; the next frame is not drawn
/// until the encoder has pushed the previous one to its sink.
pub struct StreamingEncodeDriver<E> {
    encoder: E,
}

impl<E: ContainerEncoder> StreamingEncodeDriver<E> {
    /// Drive `encoder`.
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    /// The wrapped encoder.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Release the wrapped encoder.
    pub fn into_encoder(self) -> E {
        self.encoder
    }

    /// Stream every frame of `session`, then finish the container.
    ///
    /// A sink failure aborts the loop at once; nothing more is rendered or retried.
    #[tracing::instrument(
        name = "countdown_stream",
        skip_all,
        fields(
            width = session.canvas.width,
            height = session.canvas.height,
            frames = session.frame_count,
        )
    )]
    pub fn run<R: GlyphRasterizer>(
        &mut self,
        session: EncodeSession,
        rasterizer: R,
    ) -> CountdownResult<RenderStats> {
        let result = self.stream(session, rasterizer);
        if let Err(e) = &result
            && e.is_sink_failure()
        {
            tracing::warn!(
                error = %e,
                bytes = self.encoder.bytes_emitted(),
                "output closed mid-stream, abandoning countdown"
            );
        }
        result
    }

    fn stream<R: GlyphRasterizer>(
        &mut self,
        session: EncodeSession,
        rasterizer: R,
    ) -> CountdownResult<RenderStats> {
        let EncodeSession {
            canvas,
            frame_count,
            palette,
            formatter,
            mut remaining,
        } = session;

        self.encoder.begin(canvas.width, canvas.height)?;
        self.encoder.set_loop(LOOP_FOREVER)?;
        self.encoder.set_frame_delay(FRAME_DELAY_MS)?;
        self.encoder.set_global_palette(&palette)?;

        let mut frames = TextFrameRasterizer::new(rasterizer, canvas, palette)?;

        // A target already in the past gets a single fallback frame.
        let expired = remaining.is_expired();
        let total = if expired { 1 } else { frame_count };

        for index in 0..total {
            let text = formatter.display_text(remaining);
            let frame = frames.rasterize(&text)?;
            self.encoder.write_frame(&frame)?;
            tracing::debug!(
                index,
                text = %text,
                bytes = self.encoder.bytes_emitted(),
                "frame emitted"
            );
            remaining.advance_one_second();
        }

        self.encoder.finish()?;

        let stats = RenderStats {
            frames: total,
            bytes: self.encoder.bytes_emitted(),
            expired,
        };
        tracing::info!(
            frames = stats.frames,
            bytes = stats.bytes,
            expired,
            "countdown stream finished"
        );
        Ok(stats)
    }
}

/// Render `request` as an animated GIF into `sink`, using the configured font.
///
/// The target time is validated before the font is loaded or any byte is written.
pub fn render<S: ByteSink>(
    request: &CountdownRequest,
    options: &RenderOptions,
    sink: S,
) -> CountdownResult<RenderStats> {
    render_at(request, options, sink, Utc::now())
}

/// [`render`] with an explicit current instant.
pub fn render_at<S: ByteSink>(
    request: &CountdownRequest,
    options: &RenderOptions,
    sink: S,
    now: DateTime<Utc>,
) -> CountdownResult<RenderStats> {
    let session = EncodeSession::from_request(request, options, now)?;
    let font = FontSource::discover(options.font_path.as_deref())?;
    let rasterizer = CpuTextRasterizer::new(&font)?;
    tracing::debug!(font = font.origin(), family = rasterizer.family_name(), "font loaded");
    render_session(session, rasterizer, sink)
}

/// Stream an already resolved session through `rasterizer` into `sink` as GIF.
pub fn render_session<R: GlyphRasterizer, S: ByteSink>(
    session: EncodeSession,
    rasterizer: R,
    sink: S,
) -> CountdownResult<RenderStats> {
    let mut driver = StreamingEncodeDriver::new(GifStreamEncoder::new(sink));
    driver.run(session, rasterizer)
}

/// Rasterize only the first frame of `session`, e.g. for a still preview.
pub fn preview_frame<R: GlyphRasterizer>(
    session: &EncodeSession,
    rasterizer: R,
) -> CountdownResult<IndexedFrame> {
    let mut frames = TextFrameRasterizer::new(rasterizer, session.canvas, session.palette.clone())?;
    frames.rasterize(&session.first_text())
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
