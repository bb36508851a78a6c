//! Thread identification
//!
//! Recovers the identifier of the current thread from the runtime's own
//! diagnostic rendering of the thread handle. This renders and parses text on
//! every call, so it is meant for debugging and tracing only, never for hot
//! paths.

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use stackprobe_shared::types::frame::ThreadId;
use std::io::Write;

/// Bytes of diagnostic text captured; enough for the header, nothing more
///
/// `ThreadId(` plus up to 20 digits and `)` needs 30 bytes. With 26 the closing
/// `)` is cut off once an id reaches 17 digits (10^16 and up), and
/// [`current_id`] reports 0 for such threads.
pub const HEADER_BUDGET: usize = 26;

/// A word, separator, the numeric id, then a closing separator.
///
/// Matches both `ThreadId(7)` and `goroutine 7 [running]:` shaped headers.
static HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+[\s(]+(\d+)[\s)]").unwrap());

/// Identifier of the current thread, or 0 when it cannot be determined
///
/// Real identifiers start at 1, so 0 always means unknown.
pub fn current_id() -> ThreadId {
    try_current_id().unwrap_or(0)
}

/// Identifier of the current thread, `None` when the header cannot be parsed
pub fn try_current_id() -> Option<ThreadId> {
    let mut buf = [0u8; HEADER_BUDGET];
    let len = snapshot_header(&mut buf);
    parse_header(&buf[..len])
}

/// Write the current thread's diagnostic header into `buf`, truncating at its end
fn snapshot_header(buf: &mut [u8; HEADER_BUDGET]) -> usize {
    let mut writer: &mut [u8] = &mut buf[..];
    // A full buffer only truncates the header.
    let _ = write!(writer, "{:?}", std::thread::current().id());
    HEADER_BUDGET - writer.len()
}

/// Extract the numeric thread id from the start of a diagnostic header
pub fn parse_header(header: &[u8]) -> Option<ThreadId> {
    let captures = HEADER_PATTERN.captures(header)?;
    let digits = std::str::from_utf8(captures.get(1)?.as_bytes()).ok()?;
    digits.parse().ok()
}
