use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;

use crate::{
    foundation::core::Rgb8,
    foundation::error::{CountdownError, CountdownResult},
    render::glyph::GlyphRasterizer,
    render::surface::Surface,
};

/// Environment variable naming the font file to render with.
pub const FONT_ENV_VAR: &str = "COUNTDOWN_GIF_FONT";

/// Font files tried, in order, when neither an explicit path nor [`FONT_ENV_VAR`] is set.
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Raw font file bytes plus where they came from.
#[derive(Clone)]
pub struct FontSource {
    bytes: Arc<Vec<u8>>,
    origin: String,
}

impl FontSource {
    /// Wrap in-memory font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            origin: "<memory>".to_owned(),
        }
    }

    /// Read a font file.
    pub fn from_path(path: &Path) -> CountdownResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read font file '{}'", path.display()))?;
        Ok(Self {
            bytes: Arc::new(bytes),
            origin: path.display().to_string(),
        })
    }

    /// Resolve the font to use: `explicit`, then [`FONT_ENV_VAR`], then
    /// [`DEFAULT_FONT_CANDIDATES`].
    pub fn discover(explicit: Option<&Path>) -> CountdownResult<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        if let Some(path) = std::env::var_os(FONT_ENV_VAR).filter(|v| !v.is_empty()) {
            return Self::from_path(&PathBuf::from(path));
        }
        DEFAULT_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| p.is_file())
            .map(Self::from_path)
            .unwrap_or_else(|| {
                Err(CountdownError::font(format!(
                    "no font found; pass a font file or set {FONT_ENV_VAR}"
                )))
            })
    }

    /// Human-readable origin (a path, or `<memory>`).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Font file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSource")
            .field("origin", &self.origin)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// [`GlyphRasterizer`] backed by Parley shaping and `vello_cpu` glyph filling.
pub struct CpuTextRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuTextRasterizer {
    /// Register the font and prepare shaping contexts.
    pub fn new(source: &FontSource) -> CountdownResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(source.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CountdownError::font(format!(
                "no font families registered from '{}'",
                source.origin()
            ))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CountdownError::font("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family_name, origin = source.origin(), "font registered");

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(source.bytes().to_vec()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
            ctx: None,
        })
    }

    /// Family name read from the font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        ink: Rgb8,
    ) -> CountdownResult<parley::Layout<Rgb8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CountdownError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(ink));

        let mut layout: parley::Layout<Rgb8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl GlyphRasterizer for CpuTextRasterizer {
    fn measure_text(&mut self, text: &str, size_px: f32) -> CountdownResult<f32> {
        Ok(self.layout(text, size_px, Rgb8::WHITE)?.width())
    }

    fn paint(
        &mut self,
        surface: &mut Surface,
        text: &str,
        size_px: f32,
        ink: Rgb8,
    ) -> CountdownResult<()> {
        let layout = self.layout(text, size_px, ink)?;
        let (width, height) = (surface.width(), surface.height());

        // Center the line box: horizontal middle of the advance, vertical middle of the line.
        let x = (f32::from(width) - layout.width()) / 2.0;
        let y = (f32::from(height) - layout.height()) / 2.0;

        let backdrop = surface.backdrop();
        let ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        let ctx = self.ctx.insert(ctx);
        ctx.reset();

        // Rendering replaces every pixel, so the backdrop is painted first.
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            backdrop.r, backdrop.g, backdrop.b, 255,
        ));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(x),
            f64::from(y),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, 255,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(surface.pixmap_mut());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
