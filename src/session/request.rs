use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::render::palette::DEFAULT_ANTIALIAS_LEVELS;
use crate::time::template::{DEFAULT_FORMAT, DEFAULT_MESSAGE};

/// Parameters of one countdown render, as an HTTP query or JSON document carries them.
///
/// Only `time` is required. Numeric fields are clamped later rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownRequest {
    /// Target-time literal (RFC 3339, local date-time, or bare date).
    pub time: String,
    /// Canvas width in pixels.
    #[serde(default = "default_edge")]
    pub width: u32,
    /// Canvas height in pixels.
    #[serde(default = "default_edge")]
    pub height: u32,
    /// Text color as `RRGGBB`.
    #[serde(default = "default_color")]
    pub color: String,
    /// Background color as `RRGGBB`.
    #[serde(default = "default_bg")]
    pub bg: String,
    /// Number of one-second frames to emit.
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Countdown template.
    #[serde(default = "default_format")]
    pub format: String,
    /// Text shown once the target has passed.
    #[serde(default = "default_message")]
    pub message: String,
}

impl CountdownRequest {
    /// A request for `time` with every other field at its default.
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            width: default_edge(),
            height: default_edge(),
            color: default_color(),
            bg: default_bg(),
            frames: default_frames(),
            format: default_format(),
            message: default_message(),
        }
    }

    /// Parse a JSON request document.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let req: Self = serde_json::from_str(s)?;
        Ok(req)
    }
}

fn default_edge() -> u32 {
    200
}

fn default_color() -> String {
    "000000".to_owned()
}

fn default_bg() -> String {
    "ffffff".to_owned()
}

fn default_frames() -> u32 {
    30
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_owned()
}

fn default_message() -> String {
    DEFAULT_MESSAGE.to_owned()
}

/// Engine settings owned by the deployment rather than by individual requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Shades between background and text color; clamped into `[4, 32]`.
    pub antialias_levels: u8,
    /// Font file to render with. `None` falls back to the environment and system fonts.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            antialias_levels: DEFAULT_ANTIALIAS_LEVELS,
            font_path: None,
        }
    }
}
