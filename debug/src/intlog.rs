//! Internal developer logging
//!
//! Lines are written to stdout only when the debug gate is on, see
//! [`crate::config::is_debug_enabled`]. Each line carries a timestamp, the
//! `[INTE]` tag, the caller's `file:line` and the current tracing span, if
//! any. The error variants append the caller's stack.

use crate::caller::caller_with_filter;
use crate::config::is_debug_enabled;
use crate::formatter::stack_with_filters;
use stackprobe_shared::types::frame::FilterSet;
use stackprobe_shared::utils::time::log_timestamp;
use std::fmt::Display;

/// Source path of this logger, kept out of caller lookups and stacks
const STACK_FILTER_KEY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/intlog.rs");

const TAG: &str = "[INTE]";

/// Print `content` when debug is enabled
pub fn print(content: impl Display) {
    if !is_debug_enabled() {
        return;
    }
    emit(&content.to_string(), false);
}

/// Print `content` followed by the caller stack when debug is enabled
pub fn error(content: impl Display) {
    if !is_debug_enabled() {
        return;
    }
    emit(&content.to_string(), true);
}

/// Print the output of `f`, calling it only when debug is enabled
pub fn print_with<F: FnOnce() -> String>(f: F) {
    if !is_debug_enabled() {
        return;
    }
    let content = f();
    if content.is_empty() {
        return;
    }
    emit(&content, false);
}

/// Like [`print_with`], followed by the caller stack
pub fn error_with<F: FnOnce() -> String>(f: F) {
    if !is_debug_enabled() {
        return;
    }
    let content = f();
    if content.is_empty() {
        return;
    }
    emit(&content, true);
}

fn emit(content: &str, with_stack: bool) {
    print!("{}", entry(content, with_stack));
}

/// Build the log entry `emit` would print from the calling location
///
/// Not gated: the caller decides whether the entry is wanted.
#[inline(never)]
pub fn entry(content: &str, with_stack: bool) -> String {
    let filters = FilterSet::new().with(STACK_FILTER_KEY);
    let location = caller_with_filter(&filters, 0)
        .map(|caller| caller.file_line_short())
        .unwrap_or_default();
    let span = tracing::Span::current().id().map(|id| id.into_u64());
    let stack = with_stack.then(|| stack_with_filters(&filters, 0));
    format_entry(&log_timestamp(), &location, span, content, stack.as_deref())
}

/// Build one log entry, including the trailing newline
pub fn format_entry(
    timestamp: &str,
    location: &str,
    span: Option<u64>,
    content: &str,
    stack: Option<&str>,
) -> String {
    let mut buffer = String::new();
    buffer.push_str(timestamp);
    buffer.push(' ');
    buffer.push_str(TAG);
    buffer.push(' ');
    buffer.push_str(location);
    buffer.push(' ');
    if let Some(id) = span {
        buffer.push_str(&format!("{{{}}} ", id));
    }
    buffer.push_str(content);
    buffer.push('\n');
    if let Some(stack) = stack {
        buffer.push_str("Caller Stack:\n");
        buffer.push_str(stack);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::set_debug_enabled;

    #[test]
    fn test_format_entry_plain() {
        let entry = format_entry("2024-05-01 13:04:05.000", "main.rs:12", None, "ready", None);
        assert_eq!(entry, "2024-05-01 13:04:05.000 [INTE] main.rs:12 ready\n");
    }

    #[test]
    fn test_format_entry_with_span_and_stack() {
        let entry = format_entry(
            "2024-05-01 13:04:05.000",
            "main.rs:12",
            Some(3),
            "failed",
            Some("1.  app::main\n    /app/src/main.rs:12\n"),
        );
        assert_eq!(
            entry,
            "2024-05-01 13:04:05.000 [INTE] main.rs:12 {3} failed\n\
             Caller Stack:\n\
             1.  app::main\n    /app/src/main.rs:12\n"
        );
    }

    #[test]
    fn test_disabled_skips_closure() {
        set_debug_enabled(false);
        let mut called = false;
        print_with(|| {
            called = true;
            "never".to_string()
        });
        assert!(!called);
    }
}
