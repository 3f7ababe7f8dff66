use crate::{
    foundation::core::{Canvas, Rgb8},
    foundation::error::CountdownResult,
    render::frame::IndexedFrame,
    render::glyph::GlyphRasterizer,
    render::palette::Palette,
    render::surface::Surface,
};

/// Smallest font size the fitter will pick.
pub const MIN_FONT_SIZE: u32 = 10;
/// Horizontal room (in pixels) kept free around the text.
pub const TEXT_MARGIN_PX: f32 = 20.0;
/// Starting guess for a glyph's advance, as a fraction of the font size.
pub const CHAR_WIDTH_ESTIMATE: f64 = 0.60;

/// Pick the font size for `text` on a canvas `canvas_width` pixels wide.
///
/// Starts from `floor(width / (chars * 0.6))` (at least [`MIN_FONT_SIZE`]) and steps down one
/// size at a time until the measured width plus [`TEXT_MARGIN_PX`] fits. Falls back to
/// [`MIN_FONT_SIZE`] when nothing larger fits.
pub fn fit_font_size<R: GlyphRasterizer + ?Sized>(
    rasterizer: &mut R,
    text: &str,
    canvas_width: u32,
) -> CountdownResult<u32> {
    let chars = text.chars().count();
    let estimate = if chars == 0 {
        0
    } else {
        (f64::from(canvas_width) / (chars as f64 * CHAR_WIDTH_ESTIMATE)).floor() as u32
    };

    let mut size = estimate.max(MIN_FONT_SIZE);
    while size > MIN_FONT_SIZE {
        let measured = rasterizer.measure_text(text, size as f32)?;
        if measured + TEXT_MARGIN_PX <= canvas_width as f32 {
            break;
        }
        size -= 1;
    }
    Ok(size)
}

/// Turns display text into indexed frames for one animation.
///
/// Text is always drawn white on black so a pixel's channel sum measures glyph coverage; the
/// configured colors only enter through the shared [`Palette`]. The raster surface is reused
/// across frames.
pub struct TextFrameRasterizer<R> {
    rasterizer: R,
    canvas: Canvas,
    palette: Palette,
    surface: Surface,
}

impl<R: GlyphRasterizer> TextFrameRasterizer<R> {
    /// Allocate the raster surface for `canvas`.
    pub fn new(rasterizer: R, canvas: Canvas, palette: Palette) -> CountdownResult<Self> {
        let surface = Surface::new(canvas)?;
        Ok(Self {
            rasterizer,
            canvas,
            palette,
            surface,
        })
    }

    /// The palette frames are quantized against.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Canvas size of produced frames.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Fit, paint and quantize `text` into a new frame.
    pub fn rasterize(&mut self, text: &str) -> CountdownResult<IndexedFrame> {
        let size = fit_font_size(&mut self.rasterizer, text, self.canvas.width)?;

        self.surface.clear(Rgb8::BLACK);
        self.rasterizer
            .paint(&mut self.surface, text, size as f32, Rgb8::WHITE)?;

        let mut indices = Vec::with_capacity(self.canvas.pixel_count());
        for px in self.surface.data().chunks_exact(4) {
            let intensity = u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2]);
            indices.push(self.palette.index_for_intensity(intensity));
        }

        tracing::trace!(text, size, "rasterized text frame");
        Ok(IndexedFrame {
            width: self.canvas.width,
            height: self.canvas.height,
            indices,
        })
    }

    /// Release the glyph rasterizer.
    pub fn into_rasterizer(self) -> R {
        self.rasterizer
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text_frame.rs"]
mod tests;
