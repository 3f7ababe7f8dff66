//! Text rasterization: color ramp, raster surface, glyph backends and the frame rasterizer.

/// `vello_cpu` + Parley glyph backend and font loading.
pub mod cpu;
pub(crate) mod frame;
pub(crate) mod glyph;
pub(crate) mod palette;
pub(crate) mod surface;
pub(crate) mod text_frame;
