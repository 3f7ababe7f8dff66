use chrono::{DateTime, Utc};

use crate::foundation::core::{Canvas, Rgb8, clamp_frames};
use crate::foundation::error::CountdownResult;
use crate::render::palette::Palette;
use crate::session::request::{CountdownRequest, RenderOptions};
use crate::time::duration::{Remaining, parse_target_time};
use crate::time::template::{FormatTemplate, TemplateFormatter};

/// Everything one animation needs, resolved and clamped.
///
/// Owned by a single request; nothing here is shared between concurrent renders.
#[derive(Clone, Debug)]
pub struct EncodeSession {
    pub(crate) canvas: Canvas,
    pub(crate) frame_count: u32,
    pub(crate) palette: Palette,
    pub(crate) formatter: TemplateFormatter,
    pub(crate) remaining: Remaining,
}

impl EncodeSession {
    /// Resolve `request` against the instant `now`.
    ///
    /// The target time is parsed first: an unparseable literal fails with
    /// [`crate::CountdownError::InvalidTime`] before anything else is built.
    pub fn from_request(
        request: &CountdownRequest,
        options: &RenderOptions,
        now: DateTime<Utc>,
    ) -> CountdownResult<Self> {
        let target = parse_target_time(&request.time)?;
        Self::for_target(request, options, target, now)
    }

    /// Like [`EncodeSession::from_request`] with an already resolved target instant.
    pub fn for_target(
        request: &CountdownRequest,
        options: &RenderOptions,
        target: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> CountdownResult<Self> {
        let foreground = Rgb8::from_hex(&request.color)?;
        let background = Rgb8::from_hex(&request.bg)?;

        Ok(Self {
            canvas: Canvas::clamped(request.width, request.height),
            frame_count: clamp_frames(request.frames),
            palette: Palette::build(background, foreground, options.antialias_levels),
            formatter: TemplateFormatter::new(FormatTemplate::new(&request.format), &request.message),
            remaining: Remaining::between(target, now),
        })
    }

    /// Clamped canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Clamped frame budget.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Color ramp shared by every frame.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Template and fallback message.
    pub fn formatter(&self) -> &TemplateFormatter {
        &self.formatter
    }

    /// Time left at the first frame.
    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    /// Text of the first frame.
    pub fn first_text(&self) -> String {
        self.formatter.display_text(self.remaining)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/encode_session.rs"]
mod tests;
