//! Placeholder expansion for countdown text.
//!
//! A template mixes literal text with `%`-tokens and optional bracket groups:
//!
//! | token | value                          |
//! |-------|--------------------------------|
//! | `%d`  | days                           |
//! | `%h`  | hours, unpadded                |
//! | `%m`  | minutes, unpadded              |
//! | `%s`  | seconds, unpadded              |
//! | `%H`  | hours, zero-padded to 2        |
//! | `%M`  | minutes, zero-padded to 2      |
//! | `%S`  | seconds, zero-padded to 2      |
//!
//! After substitution, a group `[<digits>:<text>]` is deleted when its digit label is all
//! zeros, and otherwise replaced by `<text>`. Zero groups are removed in a first pass over the
//! whole string before the remaining groups are unwrapped.

use crate::foundation::core::{MAX_FORMAT_CHARS, MAX_MESSAGE_CHARS, clamp_chars};
use crate::time::duration::{Remaining, TimeParts};

/// Template used when none is configured.
pub const DEFAULT_FORMAT: &str = "%H:%M:%S";
/// Fallback message used when none is configured.
pub const DEFAULT_MESSAGE: &str = "Expired!";

#[derive(Clone, Copy, Debug)]
enum Field {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    fn value(self, parts: &TimeParts) -> i64 {
        match self {
            Self::Days => parts.days,
            Self::Hours => parts.hours,
            Self::Minutes => parts.minutes,
            Self::Seconds => parts.seconds,
        }
    }
}

fn token(c: char) -> Option<(Field, bool)> {
    match c {
        'd' => Some((Field::Days, false)),
        'h' => Some((Field::Hours, false)),
        'm' => Some((Field::Minutes, false)),
        's' => Some((Field::Seconds, false)),
        'H' => Some((Field::Hours, true)),
        'M' => Some((Field::Minutes, true)),
        'S' => Some((Field::Seconds, true)),
        _ => None,
    }
}

/// Placeholder template, at most [`MAX_FORMAT_CHARS`] characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatTemplate(String);

impl FormatTemplate {
    /// Build a template, keeping only the first [`MAX_FORMAT_CHARS`] characters.
    pub fn new(template: &str) -> Self {
        Self(clamp_chars(template, MAX_FORMAT_CHARS))
    }

    /// The (clamped) template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute every token with a value from `parts`, then resolve bracket groups.
    pub fn expand(&self, parts: &TimeParts) -> String {
        let substituted = substitute_tokens(&self.0, parts);
        let without_zero_groups = rewrite_groups(&substituted, |label, _| {
            if label.bytes().all(|b| b == b'0') {
                Some("")
            } else {
                None
            }
        });
        rewrite_groups(&without_zero_groups, |_, body| Some(body))
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

/// Renders a [`Remaining`] as display text, or the fallback message once expired.
#[derive(Clone, Debug)]
pub struct TemplateFormatter {
    template: FormatTemplate,
    message: String,
}

impl TemplateFormatter {
    /// Build a formatter; the message is clamped to [`MAX_MESSAGE_CHARS`] characters.
    pub fn new(template: FormatTemplate, message: &str) -> Self {
        Self {
            template,
            message: clamp_chars(message, MAX_MESSAGE_CHARS),
        }
    }

    /// The template in use.
    pub fn template(&self) -> &FormatTemplate {
        &self.template
    }

    /// The (clamped) fallback message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Display text for one frame.
    pub fn display_text(&self, remaining: Remaining) -> String {
        match remaining.parts() {
            Some(parts) => self.template.expand(&parts),
            None => self.message.clone(),
        }
    }
}

fn substitute_tokens(template: &str, parts: &TimeParts) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied().and_then(token) {
            Some((field, padded)) => {
                chars.next();
                let v = field.value(parts);
                if padded {
                    out.push_str(&format!("{v:02}"));
                } else {
                    out.push_str(&v.to_string());
                }
            }
            None => out.push('%'),
        }
    }
    out
}

struct BracketGroup<'a> {
    label: &'a str,
    body: &'a str,
    len: usize,
}

/// Match `[<ascii digits>:<anything but ']'>]` at the start of `s`.
fn bracket_group(s: &str) -> Option<BracketGroup<'_>> {
    let inner = s.strip_prefix('[')?;
    let label_len = inner.find(|c: char| !c.is_ascii_digit())?;
    if label_len == 0 || !inner[label_len..].starts_with(':') {
        return None;
    }
    let after_colon = &inner[label_len + 1..];
    let close = after_colon.find(']')?;
    Some(BracketGroup {
        label: &inner[..label_len],
        body: &after_colon[..close],
        len: 1 + label_len + 1 + close + 1,
    })
}

/// Left-to-right, non-overlapping rewrite of bracket groups.
///
/// `replace(label, body)` returns the replacement text, or `None` to leave the group as is.
fn rewrite_groups<'s>(s: &'s str, replace: impl Fn(&'s str, &'s str) -> Option<&'s str>) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];
        match bracket_group(candidate).and_then(|g| replace(g.label, g.body).map(|r| (r, g.len))) {
            Some((replacement, len)) => {
                out.push_str(replacement);
                rest = &candidate[len..];
            }
            None => {
                out.push('[');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/time/template.rs"]
mod tests;
