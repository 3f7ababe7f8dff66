use crate::foundation::core::Rgb8;

/// Antialiasing levels used when none is configured.
pub const DEFAULT_ANTIALIAS_LEVELS: u8 = 8;
/// Fewest accepted antialiasing levels.
pub const MIN_ANTIALIAS_LEVELS: u8 = 4;
/// Most accepted antialiasing levels.
pub const MAX_ANTIALIAS_LEVELS: u8 = 32;
/// Ink intensity of a fully inked pixel (sum of three saturated channels).
pub const MAX_INK_INTENSITY: u16 = 3 * 255;

/// Background-to-foreground color ramp shared by every frame of one animation.
///
/// Entry `0` is exactly the background, entry `levels` exactly the foreground; entries in between
/// are linear blends at fractions `i / levels`, with channels truncated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    levels: u8,
    colors: Vec<Rgb8>,
}

impl Palette {
    /// Build the ramp; `levels` is clamped into `[MIN_ANTIALIAS_LEVELS, MAX_ANTIALIAS_LEVELS]`.
    pub fn build(background: Rgb8, foreground: Rgb8, levels: u8) -> Self {
        let levels = levels.clamp(MIN_ANTIALIAS_LEVELS, MAX_ANTIALIAS_LEVELS);
        let step = 1.0 / f64::from(levels);

        let mut colors = Vec::with_capacity(usize::from(levels) + 1);
        colors.push(background);

        // The fraction accumulates per step and is pinned to 1.0 on the last entry.
        let mut c = 0.0f64;
        for i in 1..=levels {
            c = if i == levels { 1.0 } else { c + step };
            let d = 1.0 - c;
            let mix = |bg: u8, fg: u8| (f64::from(bg) * d + f64::from(fg) * c) as u8;
            colors.push(Rgb8::new(
                mix(background.r, foreground.r),
                mix(background.g, foreground.g),
                mix(background.b, foreground.b),
            ));
        }

        Self { levels, colors }
    }

    /// Number of antialiasing levels (the highest valid index).
    pub fn levels(&self) -> u8 {
        self.levels
    }

    /// Ramp entries, background first.
    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    /// Ramp as packed `r, g, b` bytes, the layout color tables are written in.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Map an ink intensity (`0..=765`) to a ramp index via `round(intensity * levels / 765)`.
    ///
    /// Zero intensity is pure background and maps to index `0` without any float math.
    #[inline]
    pub fn index_for_intensity(&self, intensity: u16) -> u8 {
        if intensity == 0 {
            return 0;
        }
        let idx = (f64::from(intensity) * f64::from(self.levels) / f64::from(MAX_INK_INTENSITY))
            .round();
        (idx as u8).min(self.levels)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/palette.rs"]
mod tests;
