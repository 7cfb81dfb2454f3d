//! Format module — message shaping before fan-out.
//!
//! - `utf8.rs`: sanitizes arbitrary bytes into valid text
//! - `ansi.rs`: color palette, color stripping, and colored emission

pub mod ansi;
pub mod utf8;

pub use ansi::{strip_colors, strip_colors_from, wrap_and_emit, Color, RESET};
pub use utf8::convert;
