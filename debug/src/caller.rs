//! Caller lookup
//!
//! Helpers that return a single piece of information about the nearest caller
//! outside this library: its function, module path, file, directory or line.

use crate::source::{entry_symbol_name, CallStack};
use crate::walker::Walk;
use serde::{Deserialize, Serialize};
use stackprobe_shared::types::frame::{FilterSet, Frame};
use std::path::Path;

/// Separator between module path segments in a function name
const PATH_SEPARATOR: &str = "::";

/// The resolved location of a caller frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Fully qualified function name, or "unknown"
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl Caller {
    /// Function name without its module path
    pub fn function_name(&self) -> &str {
        split_path(&self.function).1
    }

    /// Module path of the function, empty for a bare name
    pub fn package(&self) -> &str {
        split_path(&self.function).0
    }

    /// Directory containing the caller's source file
    pub fn directory(&self) -> String {
        Path::new(&self.file)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `path:line`
    pub fn file_line(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }

    /// `basename:line`
    pub fn file_line_short(&self) -> String {
        let base = Path::new(&self.file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.clone());
        format!("{}:{}", base, self.line)
    }
}

impl From<Frame> for Caller {
    fn from(frame: Frame) -> Self {
        Self {
            function: frame.function,
            file: frame.file,
            line: frame.line,
        }
    }
}

/// Strip trailing closure segments so a closure reports its enclosing function
fn enclosing_function(mut name: &str) -> &str {
    while let Some(pos) = name.rfind(PATH_SEPARATOR) {
        let last = &name[pos + PATH_SEPARATOR.len()..];
        // legacy mangling renders `{{closure}}`, v0 renders `{closure#0}`
        if !(last.starts_with("{{closure}}") || last.starts_with("{closure#")) {
            break;
        }
        name = &name[..pos];
    }
    name
}

/// Split `a::b::c` into `("a::b", "c")`, looking through closures
fn split_path(name: &str) -> (&str, &str) {
    let name = enclosing_function(name);
    match name.rfind(PATH_SEPARATOR) {
        Some(pos) => (&name[..pos], &name[pos + PATH_SEPARATOR.len()..]),
        None => ("", name),
    }
}

/// The nearest caller, `skip` frames further out
#[inline(never)]
pub fn caller(skip: usize) -> Option<Caller> {
    caller_with_filter(&FilterSet::new(), skip)
}

/// The nearest caller outside `filters`, `skip` frames further out
#[inline(never)]
pub fn caller_with_filter(filters: &FilterSet, skip: usize) -> Option<Caller> {
    let call_stack = CallStack::capture();
    let mut walk = Walk::new(&call_stack, filters, skip);
    walk.next().map(Caller::from)
}

/// Function name of the caller, without its module path
#[inline(never)]
pub fn caller_function(skip: usize) -> Option<String> {
    caller(skip).map(|c| c.function_name().to_string())
}

/// Module path of the caller's function
#[inline(never)]
pub fn caller_package(skip: usize) -> Option<String> {
    caller(skip).map(|c| c.package().to_string())
}

/// Absolute source file of the caller
#[inline(never)]
pub fn caller_file_path(skip: usize) -> Option<String> {
    caller(skip).map(|c| c.file)
}

/// Directory of the caller's source file
#[inline(never)]
pub fn caller_directory(skip: usize) -> Option<String> {
    caller(skip).map(|c| c.directory())
}

/// `path:line` of the caller
#[inline(never)]
pub fn caller_file_line(skip: usize) -> Option<String> {
    caller(skip).map(|c| c.file_line())
}

/// `basename:line` of the caller
#[inline(never)]
pub fn caller_file_line_short(skip: usize) -> Option<String> {
    caller(skip).map(|c| c.file_line_short())
}

/// Fully qualified name of the function whose entry point is `addr`
///
/// ```ignore
/// let path = func_path(my_handler as *const () as usize);
/// ```
pub fn func_path(addr: usize) -> Option<String> {
    entry_symbol_name(addr)
}

/// Name of the function whose entry point is `addr`, without its module path
pub fn func_name(addr: usize) -> Option<String> {
    entry_symbol_name(addr).map(|name| split_path(&name).1.to_string())
}
