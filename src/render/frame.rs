use crate::foundation::core::Rgb8;
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::palette::Palette;

/// One second of the countdown as palette indices, one byte per pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Palette index per pixel.
    pub indices: Vec<u8>,
}

impl IndexedFrame {
    /// Expand indices through `palette` into packed RGB8 pixels.
    pub fn to_rgb8(&self, palette: &Palette) -> CountdownResult<Vec<u8>> {
        let colors = palette.colors();
        let mut out = Vec::with_capacity(self.indices.len() * 3);
        for &i in &self.indices {
            let c: Rgb8 = *colors.get(usize::from(i)).ok_or_else(|| {
                CountdownError::validation(format!(
                    "palette index {i} out of range (palette has {} entries)",
                    colors.len()
                ))
            })?;
            out.extend_from_slice(&c.to_array());
        }
        Ok(out)
    }

    /// Count pixels whose index is not the background.
    pub fn inked_pixels(&self) -> usize {
        self.indices.iter().filter(|&&i| i != 0).count()
    }
}
