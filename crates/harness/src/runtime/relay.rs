//! Relay — streams raw host output through the logger line by line.

use std::io::{self, BufRead};

use logger::Logger;

/// Read `reader` to the end, emitting each line via `host_output`.
///
/// Lines are split on `\n` as raw bytes, so invalid UTF-8 from the host is
/// handed to the logger's sanitizer instead of failing the read. Returns the
/// number of lines relayed.
pub fn relay<R: BufRead>(mut reader: R, logger: &Logger) -> io::Result<usize> {
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let mut line = buf.as_slice();
        if let Some(stripped) = line.strip_suffix(b"\n") {
            line = stripped.strip_suffix(b"\r").unwrap_or(stripped);
        }
        logger.host_output(line);
        count += 1;
    }

    tracing::debug!(lines = count, "Host output relay finished");
    Ok(count)
}
