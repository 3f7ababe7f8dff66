//! Target-time parsing, countdown arithmetic and display-text templates.

pub(crate) mod duration;
pub(crate) mod template;
