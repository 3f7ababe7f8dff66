use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{CountdownError, CountdownResult};

/// CPU raster target that glyph rasterizers paint into.
///
/// Pixels are RGBA8, row-major, tightly packed. Everything painted here is opaque, so the
/// premultiplied storage reads back as plain RGB.
pub struct Surface {
    width: u16,
    height: u16,
    backdrop: Rgb8,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    /// Allocate a surface the size of `canvas`, cleared to black.
    pub fn new(canvas: Canvas) -> CountdownResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| CountdownError::validation("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| CountdownError::validation("surface height exceeds u16"))?;

        let mut surface = Self {
            width,
            height,
            backdrop: Rgb8::BLACK,
            pixmap: vello_cpu::Pixmap::new(width, height),
        };
        surface.clear(Rgb8::BLACK);
        Ok(surface)
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Color of the most recent [`Surface::clear`].
    pub fn backdrop(&self) -> Rgb8 {
        self.backdrop
    }

    /// Fill every pixel with an opaque color.
    pub fn clear(&mut self, color: Rgb8) {
        self.backdrop = color;
        let rgba = [color.r, color.g, color.b, 255];
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Mutable raw RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("backdrop", &self.backdrop)
            .finish()
    }
}
