//! UTF-8 sanitization for host output.
//!
//! Output captured from remote commands is arbitrary bytes. Before it reaches
//! any sink, every invalid byte sequence is dropped (not replaced) so the
//! remaining text, escape sequences included, comes through intact.

use std::borrow::Cow;

/// Convert arbitrary bytes into valid UTF-8 text.
///
/// Valid input is returned borrowed and unchanged. Otherwise each invalid
/// sequence is removed and everything around it kept. Never fails; the
/// worst case is an empty string.
pub fn convert(input: &[u8]) -> Cow<'_, str> {
    let mut rest = match std::str::from_utf8(input) {
        Ok(valid) => return Cow::Borrowed(valid),
        Err(_) => input,
    };

    let mut output = String::with_capacity(input.len());
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                output.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                // `valid_up_to` bytes are already known to be UTF-8
                if let Ok(prefix) = std::str::from_utf8(valid) {
                    output.push_str(prefix);
                }
                match e.error_len() {
                    Some(bad) => rest = &after[bad..],
                    // Truncated sequence at the very end of the input
                    None => break,
                }
            }
        }
    }

    Cow::Owned(output)
}
