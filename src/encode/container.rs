use crate::foundation::error::CountdownResult;
use crate::render::frame::IndexedFrame;
use crate::render::palette::Palette;

/// Loop count meaning "repeat forever".
pub const LOOP_FOREVER: u16 = 0;

/// Incremental writer for an animated indexed-color container.
///
/// Call order: `begin`, then the `set_*` methods, then `write_frame` once per frame, then
/// `finish`. Each `write_frame` pushes that frame's encoded bytes to the output before
/// returning, so at most one frame is buffered at a time.
pub trait ContainerEncoder {
    /// Fix the logical screen size.
    fn begin(&mut self, width: u32, height: u32) -> CountdownResult<()>;

    /// Number of times the animation repeats; [`LOOP_FOREVER`] repeats forever.
    fn set_loop(&mut self, count: u16) -> CountdownResult<()>;

    /// Delay between frames.
    fn set_frame_delay(&mut self, delay_ms: u32) -> CountdownResult<()>;

    /// Color table shared by every frame.
    fn set_global_palette(&mut self, palette: &Palette) -> CountdownResult<()>;

    /// Encode one frame and push its bytes downstream.
    fn write_frame(&mut self, frame: &IndexedFrame) -> CountdownResult<()>;

    /// Write trailing structures and close the output.
    fn finish(&mut self) -> CountdownResult<()>;

    /// Bytes handed to the output so far.
    fn bytes_emitted(&self) -> u64;
}
