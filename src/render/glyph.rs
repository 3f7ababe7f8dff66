use crate::foundation::core::Rgb8;
use crate::foundation::error::CountdownResult;
use crate::render::surface::Surface;

/// Text measurement and painting for a single configured font.
///
/// Implementations must be deterministic: the same text at the same size measures and paints
/// identically. Measured width is expected to grow with size.
pub trait GlyphRasterizer {
    /// Advance width of `text` laid out on one line at `size_px`.
    fn measure_text(&mut self, text: &str, size_px: f32) -> CountdownResult<f32>;

    /// Paint `text` in `ink` at `size_px`, centered horizontally and vertically on `surface`.
    ///
    /// Existing surface pixels outside the glyph coverage are left as the surface backdrop;
    /// glyph edges blend between backdrop and ink.
    fn paint(
        &mut self,
        surface: &mut Surface,
        text: &str,
        size_px: f32,
        ink: Rgb8,
    ) -> CountdownResult<()>;
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for &mut R {
    fn measure_text(&mut self, text: &str, size_px: f32) -> CountdownResult<f32> {
        (**self).measure_text(text, size_px)
    }

    fn paint(
        &mut self,
        surface: &mut Surface,
        text: &str,
        size_px: f32,
        ink: Rgb8,
    ) -> CountdownResult<()> {
        (**self).paint(surface, text, size_px, ink)
    }
}
