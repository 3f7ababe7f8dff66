use std::borrow::Cow;
use std::io::Write;

use crate::encode::container::{ContainerEncoder, LOOP_FOREVER};
use crate::encode::sink::ByteSink;
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::frame::IndexedFrame;
use crate::render::palette::Palette;

/// Buffers encoder output and hands it to the sink one frame at a time.
struct ChunkWriter<S> {
    sink: S,
    pending: Vec<u8>,
    emitted: u64,
}

impl<S: ByteSink> ChunkWriter<S> {
    fn new(sink: S) -> Self {
        Self {
            sink,
            pending: Vec::new(),
            emitted: 0,
        }
    }

    /// Push everything buffered so far; blocks on sink backpressure.
    fn emit(&mut self) -> CountdownResult<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }
        self.sink.accept(&self.pending)?;
        let n = self.pending.len();
        self.emitted += n as u64;
        self.pending.clear();
        Ok(n)
    }
}

impl<S> Write for ChunkWriter<S> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

enum State<S> {
    Configuring(ChunkWriter<S>),
    Streaming(gif::Encoder<ChunkWriter<S>>),
    Finished(ChunkWriter<S>),
    Failed,
}

/// [`ContainerEncoder`] producing GIF89a with a single global color table.
///
/// The header and color table go out together with the first frame; `finish` writes the
/// trailer and closes the sink.
pub struct GifStreamEncoder<S> {
    size: Option<(u16, u16)>,
    repeat: gif::Repeat,
    delay_cs: u16,
    palette: Option<Vec<u8>>,
    state: State<S>,
    frames_written: u32,
}

impl<S: ByteSink> GifStreamEncoder<S> {
    /// Create an encoder writing to `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            size: None,
            repeat: gif::Repeat::Infinite,
            delay_cs: 0,
            palette: None,
            state: State::Configuring(ChunkWriter::new(sink)),
            frames_written: 0,
        }
    }

    /// Frames encoded so far.
    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }

    /// Recover the sink once the stream is finished (or before it started).
    pub fn into_sink(self) -> Option<S> {
        match self.state {
            State::Configuring(w) | State::Finished(w) => Some(w.sink),
            State::Streaming(_) | State::Failed => None,
        }
    }

    fn ensure_configurable(&self) -> CountdownResult<()> {
        match self.state {
            State::Configuring(_) => Ok(()),
            _ => Err(CountdownError::encode(
                "gif encoder settings are fixed once frames are written",
            )),
        }
    }

    fn start(&mut self, writer: ChunkWriter<S>) -> CountdownResult<gif::Encoder<ChunkWriter<S>>> {
        let (width, height) = self
            .size
            .ok_or_else(|| CountdownError::encode("gif encoder not started (call begin)"))?;
        let palette = self
            .palette
            .as_deref()
            .ok_or_else(|| CountdownError::encode("gif encoder has no global palette"))?;

        let mut encoder = gif::Encoder::new(writer, width, height, palette)
            .map_err(|e| CountdownError::encode(format!("failed to write gif header: {e}")))?;
        encoder
            .set_repeat(self.repeat)
            .map_err(|e| CountdownError::encode(format!("failed to write loop extension: {e}")))?;
        Ok(encoder)
    }

    fn encode_frame(
        &self,
        encoder: &mut gif::Encoder<ChunkWriter<S>>,
        frame: &IndexedFrame,
    ) -> CountdownResult<()> {
        let (width, height) = self
            .size
            .ok_or_else(|| CountdownError::encode("gif encoder not started (call begin)"))?;
        if frame.width != u32::from(width) || frame.height != u32::from(height) {
            return Err(CountdownError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, width, height
            )));
        }
        if frame.indices.len() != usize::from(width) * usize::from(height) {
            return Err(CountdownError::encode(
                "frame.indices size mismatch with width*height",
            ));
        }

        let gif_frame = gif::Frame {
            width,
            height,
            delay: self.delay_cs,
            buffer: Cow::Borrowed(frame.indices.as_slice()),
            ..gif::Frame::default()
        };
        encoder
            .write_frame(&gif_frame)
            .map_err(|e| CountdownError::encode(format!("failed to encode gif frame: {e}")))
    }
}

impl<S: ByteSink> ContainerEncoder for GifStreamEncoder<S> {
    fn begin(&mut self, width: u32, height: u32) -> CountdownResult<()> {
        self.ensure_configurable()?;
        if width == 0 || height == 0 {
            return Err(CountdownError::encode("gif width/height must be non-zero"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| CountdownError::encode("gif width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| CountdownError::encode("gif height exceeds u16"))?;
        self.size = Some((w, h));
        Ok(())
    }

    fn set_loop(&mut self, count: u16) -> CountdownResult<()> {
        self.ensure_configurable()?;
        self.repeat = if count == LOOP_FOREVER {
            gif::Repeat::Infinite
        } else {
            gif::Repeat::Finite(count)
        };
        Ok(())
    }

    fn set_frame_delay(&mut self, delay_ms: u32) -> CountdownResult<()> {
        self.ensure_configurable()?;
        // GIF delays are in hundredths of a second.
        self.delay_cs = u16::try_from(delay_ms / 10).unwrap_or(u16::MAX);
        Ok(())
    }

    fn set_global_palette(&mut self, palette: &Palette) -> CountdownResult<()> {
        self.ensure_configurable()?;
        if palette.colors().len() > 256 {
            return Err(CountdownError::encode(
                "gif color tables hold at most 256 entries",
            ));
        }
        self.palette = Some(palette.to_rgb_bytes());
        Ok(())
    }

    fn write_frame(&mut self, frame: &IndexedFrame) -> CountdownResult<()> {
        let mut encoder = match std::mem::replace(&mut self.state, State::Failed) {
            State::Configuring(writer) => self.start(writer)?,
            State::Streaming(encoder) => encoder,
            State::Finished(writer) => {
                self.state = State::Finished(writer);
                return Err(CountdownError::encode("gif encoder already finished"));
            }
            State::Failed => return Err(CountdownError::encode("gif encoder previously failed")),
        };

        self.encode_frame(&mut encoder, frame)?;
        encoder.get_mut().emit()?;
        self.frames_written += 1;
        self.state = State::Streaming(encoder);
        Ok(())
    }

    fn finish(&mut self) -> CountdownResult<()> {
        let encoder = match std::mem::replace(&mut self.state, State::Failed) {
            State::Configuring(writer) => self.start(writer)?,
            State::Streaming(encoder) => encoder,
            State::Finished(writer) => {
                self.state = State::Finished(writer);
                return Ok(());
            }
            State::Failed => return Err(CountdownError::encode("gif encoder previously failed")),
        };

        let mut writer = encoder
            .into_inner()
            .map_err(|e| CountdownError::encode(format!("failed to write gif trailer: {e}")))?;
        writer.emit()?;
        writer.sink.close()?;
        self.state = State::Finished(writer);
        Ok(())
    }

    fn bytes_emitted(&self) -> u64 {
        match &self.state {
            State::Configuring(w) | State::Finished(w) => w.emitted,
            State::Streaming(enc) => enc.get_ref().emitted,
            State::Failed => 0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif_stream.rs"]
mod tests;
