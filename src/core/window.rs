// BootDiff - core/window.rs
//
// Last-N-lines windowing of rendered diff text. A boot that hangs or
// fails usually diverges at the tail of the log, so attributing only the
// final lines of the diff cuts most of the noise.
// Core layer: pure logic, no I/O.

use crate::util::error::WindowError;

/// Number of newline-delimited lines in `text`.
///
/// A trailing fragment without a newline counts as a line.
pub fn line_count(text: &str) -> usize {
    text.split_inclusive('\n').count()
}

/// Return the exact trailing `n` lines of `diff_text`.
///
/// Every returned line is newline-terminated and the result is always a
/// contiguous suffix of the input (plus a final newline if the input's
/// last line lacked one). Out-of-range requests are rejected, never
/// clamped.
pub fn window(n: usize, diff_text: &str) -> Result<String, WindowError> {
    if n == 0 {
        return Err(WindowError::NoLinesRequested);
    }
    if diff_text.is_empty() {
        return Err(WindowError::EmptyDiff);
    }

    let available = line_count(diff_text);
    if n > available {
        return Err(WindowError::OutOfBounds {
            requested: n,
            available,
        });
    }

    let mut out = String::new();
    for line in diff_text.split_inclusive('\n').skip(available - n) {
        out.push_str(line);
        if !line.ends_with('\n') {
            out.push('\n');
        }
    }

    tracing::debug!(requested = n, available, "Diff window extracted");
    Ok(out)
}
