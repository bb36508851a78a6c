//! Stack rendering
//!
//! Renders the retained frames of a stack as a numbered, indented trace:
//!
//! ```text
//! 1.  app::handler
//!     /app/src/handler.rs:42
//! 2.  app::main
//!     /app/src/main.rs:7
//! ```
//!
//! The pad after the index shrinks to one space from index 10 onward so the
//! function names stay aligned.

use crate::source::{CallStack, FrameSource};
use crate::walker::{locate_start, Walk};
use stackprobe_shared::types::frame::{FilterSet, Frame};
use std::io::{self, Write};

/// Collect the retained frames of `source`
pub fn walk<S: FrameSource + ?Sized>(source: &S, filters: &FilterSet, skip: usize) -> Vec<Frame> {
    Walk::new(source, filters, skip).collect()
}

/// Render the retained frames of `source` as a numbered trace
pub fn render<S: FrameSource + ?Sized>(source: &S, filters: &FilterSet, skip: usize) -> String {
    let mut buffer = String::new();
    for (i, frame) in Walk::new(source, filters, skip).enumerate() {
        push_entry(&mut buffer, i + 1, &frame);
    }
    buffer
}

/// Render already collected frames, numbering them from 1
pub fn format_frames(frames: &[Frame]) -> String {
    let mut buffer = String::new();
    for (i, frame) in frames.iter().enumerate() {
        push_entry(&mut buffer, i + 1, frame);
    }
    buffer
}

fn push_entry(buffer: &mut String, index: usize, frame: &Frame) {
    let pad = if index > 9 { " " } else { "  " };
    buffer.push_str(&format!(
        "{}.{}{}\n    {}:{}\n",
        index, pad, frame.function, frame.file, frame.line
    ));
}

/// Formatted stack trace of the calling thread
///
/// `skip` drops that many frames from the top, after the library's own frames
/// have been removed.
#[inline(never)]
pub fn stack(skip: usize) -> String {
    stack_with_filters(&FilterSet::new(), skip)
}

/// Like [`stack`], also excluding frames whose file contains `filter`
#[inline(never)]
pub fn stack_with_filter(filter: &str, skip: usize) -> String {
    stack_with_filters(&FilterSet::new().with(filter), skip)
}

/// Like [`stack`], also excluding frames whose file contains any of `filters`
#[inline(never)]
pub fn stack_with_filters(filters: &FilterSet, skip: usize) -> String {
    let call_stack = CallStack::capture();
    render(&call_stack, filters, skip)
}

/// Write the formatted stack trace of the calling thread to `writer`
#[inline(never)]
pub fn write_stack<W: Write>(writer: &mut W, skip: usize) -> io::Result<()> {
    writer.write_all(stack(skip).as_bytes())?;
    writer.flush()
}

/// Write the formatted stack trace of the calling thread to stderr
#[inline(never)]
pub fn print_stack(skip: usize) {
    // Errors on a closed stderr are ignored.
    let _ = write_stack(&mut io::stderr().lock(), skip);
}

/// `(file, line)` of the nearest caller outside `filters`
#[inline(never)]
pub fn caller_location(filters: &FilterSet) -> Option<(String, u32)> {
    let call_stack = CallStack::capture();
    let cursor = locate_start(&call_stack, filters);
    cursor.found.then(|| (cursor.frame.file, cursor.frame.line))
}
