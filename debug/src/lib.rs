//! Call-stack debugging utilities
//!
//! This library captures and formats the call stack of the current thread,
//! leaving out its own frames and any frames whose source path matches a
//! caller-supplied filter, and recovers an identifier for the current thread.
//!
//! ```ignore
//! use stackprobe_debug::{stack, stack_with_filter};
//!
//! eprint!("{}", stack(0));
//! eprint!("{}", stack_with_filter("/vendor/", 1));
//! ```
//!
//! Capturing a stack or a thread id is expensive; gate calls behind a debug
//! check such as [`config::is_debug_enabled`].

pub mod caller;
pub mod config;
pub mod formatter;
pub mod intlog;
pub mod source;
pub mod tid;
pub mod walker;

pub use caller::{
    caller, caller_directory, caller_file_line, caller_file_line_short, caller_file_path,
    caller_function, caller_package, caller_with_filter, func_name, func_path, Caller,
};
pub use crate::config::{is_debug_enabled, set_debug_enabled, ConfigError, DebugConfig};
pub use formatter::{
    caller_location, format_frames, print_stack, render, stack, stack_with_filter,
    stack_with_filters, walk, write_stack,
};
pub use source::{CallStack, FrameList, FrameSource, RawFrame};
pub use tid::{current_id, try_current_id};
pub use walker::{locate_start, Walk, MAX_CALLER_DEPTH};

pub use stackprobe_shared::types::frame::{Cursor, FilterSet, Frame, ThreadId};
