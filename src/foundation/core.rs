use crate::foundation::error::{CountdownError, CountdownResult};

/// Smallest accepted canvas edge in pixels.
pub const MIN_CANVAS_EDGE: u32 = 150;
/// Largest accepted canvas edge in pixels.
pub const MAX_CANVAS_EDGE: u32 = 600;
/// Smallest frame budget for one animation.
pub const MIN_FRAMES: u32 = 1;
/// Largest frame budget for one animation.
pub const MAX_FRAMES: u32 = 90;
/// Maximum length of a format template, in characters.
pub const MAX_FORMAT_CHARS: usize = 80;
/// Maximum length of the fallback message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 100;

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RRGGBB` (optionally prefixed with `#`, case-insensitive).
    pub fn from_hex(s: &str) -> CountdownResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> CountdownResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| CountdownError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CountdownError::validation(format!(
                "hex color must be RRGGBB (case-insensitive), got \"{s}\""
            )));
        }

        Ok(Self::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        ))
    }

    /// Channels as an array, in `[r, g, b]` order.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Output canvas dimensions in pixels, always within the accepted edge bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, clamping both edges into `[MIN_CANVAS_EDGE, MAX_CANVAS_EDGE]`.
    pub fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: width.clamp(MIN_CANVAS_EDGE, MAX_CANVAS_EDGE),
            height: height.clamp(MIN_CANVAS_EDGE, MAX_CANVAS_EDGE),
        }
    }

    /// Number of pixels on the canvas.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Clamp a requested frame budget into `[MIN_FRAMES, MAX_FRAMES]`.
pub fn clamp_frames(frames: u32) -> u32 {
    frames.clamp(MIN_FRAMES, MAX_FRAMES)
}

/// Keep at most `max_chars` characters of `s`.
pub fn clamp_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_end, _)) => s[..byte_end].to_owned(),
        None => s.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
