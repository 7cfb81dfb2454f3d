//! ANSI color handling for terminal output
//!
//! Messages relayed from hosts frequently carry their own color codes
//! (`puppet module list`, test runners, etc). Those are stripped before the
//! logger applies its own severity color, and the logger's color wrapping
//! lives here as well.

use std::borrow::Cow;
use std::io::{self, Write};

const ESC: u8 = 0x1b;

/// Escape sent after every colored message.
pub const RESET: &str = "\x1b[00;00m";

/// Terminal palette used by the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Normal,
    BrightNormal,
    Black,
    Grey,
    Red,
    BrightRed,
    Green,
    BrightGreen,
    Yellow,
    BrightYellow,
    Blue,
    BrightBlue,
    Magenta,
    BrightMagenta,
    Cyan,
    BrightCyan,
    White,
    BrightWhite,
}

impl Color {
    pub fn code(&self) -> &'static str {
        match self {
            Color::Normal => "\x1b[00;00m",
            Color::BrightNormal => "\x1b[00;01m",
            Color::Black => "\x1b[00;30m",
            Color::Grey => "\x1b[01;30m",
            Color::Red => "\x1b[00;31m",
            Color::BrightRed => "\x1b[01;31m",
            Color::Green => "\x1b[00;32m",
            Color::BrightGreen => "\x1b[01;32m",
            Color::Yellow => "\x1b[00;33m",
            Color::BrightYellow => "\x1b[01;33m",
            Color::Blue => "\x1b[00;34m",
            Color::BrightBlue => "\x1b[01;34m",
            Color::Magenta => "\x1b[00;35m",
            Color::BrightMagenta => "\x1b[01;35m",
            Color::Cyan => "\x1b[00;36m",
            Color::BrightCyan => "\x1b[01;36m",
            Color::White => "\x1b[00;37m",
            Color::BrightWhite => "\x1b[01;37m",
        }
    }
}

/// Length of the color sequence (`ESC [ <digits and ;> m`) starting at `start`,
/// or `None` if the bytes there are not a complete color sequence.
fn color_sequence_len(input: &[u8], start: usize) -> Option<usize> {
    if input.get(start) != Some(&ESC) || input.get(start + 1) != Some(&b'[') {
        return None;
    }
    let mut i = start + 2;
    while i < input.len() {
        match input[i] {
            b'0'..=b'9' | b';' => i += 1,
            b'm' => return Some(i + 1 - start),
            _ => return None,
        }
    }
    None
}

/// Strip ANSI color sequences from a string
///
/// Only SGR sequences (`\x1b[...m`) are removed. Cursor movement, OSC
/// hyperlinks and stray ESC bytes are left exactly as they were.
///
/// Returns Cow::Borrowed if no color codes were found.
pub fn strip_colors(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    if !bytes.contains(&ESC) {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut copied_from = 0;
    let mut i = 0;
    let mut stripped = false;

    while i < bytes.len() {
        if bytes[i] == ESC {
            if let Some(len) = color_sequence_len(bytes, i) {
                // ESC and the sequence body are ASCII, so these are char boundaries
                output.push_str(&input[copied_from..i]);
                i += len;
                copied_from = i;
                stripped = true;
                continue;
            }
        }
        i += 1;
    }

    if !stripped {
        return Cow::Borrowed(input);
    }
    output.push_str(&input[copied_from..]);
    Cow::Owned(output)
}

/// Strip color sequences from every element of a sequence, keeping its shape.
pub fn strip_colors_from<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| strip_colors(line.as_ref()).into_owned())
        .collect()
}

/// Write `message` plus a newline, wrapped in `start_code` / [`RESET`] when
/// `color` is set.
///
/// The colored form is three separate writes (start code, message line,
/// reset). Once the start code is out, the reset is attempted even if the
/// message line fails, so the terminal is not left colored.
pub fn wrap_and_emit<W>(writer: &mut W, color: bool, start_code: &str, message: &str) -> io::Result<()>
where
    W: Write + ?Sized,
{
    if color {
        writer.write_all(start_code.as_bytes())?;
    }
    let mut line = String::with_capacity(message.len() + 1);
    line.push_str(message);
    line.push('\n');
    if let Err(e) = writer.write_all(line.as_bytes()) {
        if color {
            let _ = writer.write_all(RESET.as_bytes());
        }
        return Err(e);
    }
    if color {
        writer.write_all(RESET.as_bytes())?;
    }
    writer.flush()
}
