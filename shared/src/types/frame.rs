//! Call-stack data structures
//!
//! These types describe a single captured call-stack frame, the walker cursor
//! pointing at one, and the path filters applied while walking.

use serde::{Deserialize, Serialize};

/// Function name used when the runtime cannot resolve a program counter
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// Identifier of a thread of control. 0 means unknown.
pub type ThreadId = u64;

/// A single frame in a captured call stack
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Frame {
    /// Program counter (return address) of the frame
    pub pc: usize,

    /// Function name, or [`UNKNOWN_FUNCTION`]
    pub function: String,

    /// Absolute source file path
    pub file: String,

    /// Line number within `file`
    pub line: u32,
}

impl Frame {
    /// Create a frame whose function name has not been resolved
    pub fn new_unresolved(pc: usize, file: impl Into<String>, line: u32) -> Self {
        Self {
            pc,
            function: UNKNOWN_FUNCTION.to_string(),
            file: file.into(),
            line,
        }
    }

    /// Replace the function name, falling back to [`UNKNOWN_FUNCTION`]
    pub fn with_function(mut self, function: Option<String>) -> Self {
        self.function = function.unwrap_or_else(|| UNKNOWN_FUNCTION.to_string());
        self
    }

    /// Check if the function name has been resolved
    pub fn is_symbolized(&self) -> bool {
        self.function != UNKNOWN_FUNCTION
    }

    /// `file:line` of the frame
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

/// Starting point of a stack walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// The first retained frame (meaningless when `found` is false)
    pub frame: Frame,

    /// Physical depth of `frame` within the captured stack
    pub depth_index: usize,

    /// Whether any frame survived the filters
    pub found: bool,
}

impl Cursor {
    /// A cursor for a walk that ran out of frames
    pub fn not_found() -> Self {
        Self {
            frame: Frame::new_unresolved(0, String::new(), 0),
            depth_index: 0,
            found: false,
        }
    }
}

/// Ordered set of path substrings used to exclude frames
///
/// A frame is excluded when its file path contains any non-empty entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter, returning the set for chaining
    pub fn with(mut self, filter: impl Into<String>) -> Self {
        self.filters.push(filter.into());
        self
    }

    pub fn push(&mut self, filter: impl Into<String>) {
        self.filters.push(filter.into());
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(String::as_str)
    }

    /// Check whether `file` contains any of the filters
    pub fn matches(&self, file: &str) -> bool {
        self.filters
            .iter()
            .any(|filter| !filter.is_empty() && file.contains(filter.as_str()))
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&[&str]> for FilterSet {
    fn from(filters: &[&str]) -> Self {
        filters.iter().copied().collect()
    }
}

impl From<Vec<String>> for FilterSet {
    fn from(filters: Vec<String>) -> Self {
        Self { filters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_new_unresolved() {
        let frame = Frame::new_unresolved(0xdeadbeef, "/src/main.rs", 12);
        assert_eq!(frame.pc, 0xdeadbeef);
        assert_eq!(frame.function, "unknown");
        assert!(!frame.is_symbolized());
    }

    #[test]
    fn test_frame_with_function() {
        let frame = Frame::new_unresolved(0x1000, "/src/main.rs", 3)
            .with_function(Some("app::main".to_string()));
        assert!(frame.is_symbolized());
        assert_eq!(frame.location(), "/src/main.rs:3");

        let frame = frame.with_function(None);
        assert_eq!(frame.function, UNKNOWN_FUNCTION);
    }

    #[test]
    fn test_filter_set_matches_substring() {
        let filters = FilterSet::from(&["/testhelpers/", "vendor"][..]);
        assert!(filters.matches("/home/me/app/testhelpers/mod.rs"));
        assert!(filters.matches("/home/me/app/vendor/lib.rs"));
        assert!(!filters.matches("/home/me/app/src/lib.rs"));
    }

    #[test]
    fn test_empty_filter_set_excludes_nothing() {
        let filters = FilterSet::new();
        assert!(filters.is_empty());
        assert!(!filters.matches("/any/file.rs"));
    }

    #[test]
    fn test_empty_filter_string_is_ignored() {
        let filters = FilterSet::new().with("");
        assert_eq!(filters.len(), 1);
        assert!(!filters.matches("/any/file.rs"));
    }

    #[test]
    fn test_cursor_not_found() {
        let cursor = Cursor::not_found();
        assert!(!cursor.found);
        assert_eq!(cursor.depth_index, 0);
    }

    #[test]
    fn test_frame_json_shape() {
        let frame = Frame::new_unresolved(16, "/a.rs", 1).with_function(Some("f".into()));
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["function"], "f");
        assert_eq!(json["line"], 1);
    }
}
