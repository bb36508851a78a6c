//! Frame walking
//!
//! [`locate_start`] finds the first frame that survives the filters and
//! returns it as a [`Cursor`]. [`Walk`] resumes from that cursor and yields
//! every further retained frame, so a skip count is applied relative to the
//! filtered starting point rather than to the raw physical depth.

use crate::source::{FrameSource, RawFrame};
use once_cell::sync::Lazy;
use stackprobe_shared::types::frame::{Cursor, FilterSet, Frame};
use std::path::MAIN_SEPARATOR;

/// Maximum number of frames inspected by a single walk
pub const MAX_CALLER_DEPTH: usize = 1000;

/// First depth inspected. [`crate::CallStack`] already drops its own frames.
pub const WALK_START: usize = 0;

/// Source directory of this crate; its frames never appear in output.
pub static SELF_FILTER_KEY: Lazy<String> = Lazy::new(|| {
    format!(
        "{}{sep}src{sep}",
        env!("CARGO_MANIFEST_DIR"),
        sep = MAIN_SEPARATOR
    )
});

/// Standard library sources as recorded in toolchain debug info
const TOOLCHAIN_FILTER_KEY: &str = "/rustc/";

/// Check whether a frame from `file` should be left out of a walk
///
/// Frames without a location, frames from this crate and from the standard
/// library are always excluded, on top of the caller's `filters`.
pub fn is_filtered(file: &str, filters: &FilterSet) -> bool {
    if file.is_empty() {
        return true;
    }
    if file.contains(SELF_FILTER_KEY.as_str()) || file.contains(TOOLCHAIN_FILTER_KEY) {
        return true;
    }
    filters.matches(file)
}

/// Find the first frame not excluded by [`is_filtered`]
pub fn locate_start<S: FrameSource + ?Sized>(source: &S, filters: &FilterSet) -> Cursor {
    for depth in WALK_START..MAX_CALLER_DEPTH {
        let Some(raw) = source.query_frame(depth) else {
            break;
        };
        if is_filtered(&raw.file, filters) {
            continue;
        }
        return Cursor {
            frame: Frame::new_unresolved(raw.pc, raw.file, raw.line),
            depth_index: depth,
            found: true,
        };
    }
    Cursor::not_found()
}

/// Iterator over the retained frames of a stack, outermost last
///
/// Starts `skip` physical frames past the located cursor and stops at the end
/// of the stack or at [`MAX_CALLER_DEPTH`].
pub struct Walk<'a, S: FrameSource + ?Sized> {
    source: &'a S,
    filters: &'a FilterSet,
    cursor: Option<Cursor>,
    depth: usize,
}

impl<'a, S: FrameSource + ?Sized> Walk<'a, S> {
    pub fn new(source: &'a S, filters: &'a FilterSet, skip: usize) -> Self {
        let cursor = locate_start(source, filters);
        let depth = if cursor.found {
            cursor.depth_index.saturating_add(skip)
        } else {
            MAX_CALLER_DEPTH
        };
        Self {
            source,
            filters,
            cursor: cursor.found.then_some(cursor),
            depth,
        }
    }

    /// Depth of the next frame to inspect
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn next_raw(&mut self) -> Option<RawFrame> {
        match self.cursor.take() {
            Some(cursor) if cursor.depth_index == self.depth => Some(RawFrame {
                pc: cursor.frame.pc,
                file: cursor.frame.file,
                line: cursor.frame.line,
            }),
            _ => self.source.query_frame(self.depth),
        }
    }
}

impl<S: FrameSource + ?Sized> Iterator for Walk<'_, S> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        while self.depth < MAX_CALLER_DEPTH {
            let depth = self.depth;
            let raw = self.next_raw()?;
            self.depth += 1;
            if is_filtered(&raw.file, self.filters) {
                continue;
            }
            let name = self.source.resolve_name(depth);
            return Some(Frame::new_unresolved(raw.pc, raw.file, raw.line).with_function(name));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FrameList;

    fn frame(pc: usize, file: &str, function: &str) -> Frame {
        Frame::new_unresolved(pc, file, pc as u32).with_function(Some(function.to_string()))
    }

    fn sample() -> FrameList {
        FrameList::new(vec![
            frame(1, "/app/vendor/log.rs", "log::emit"),
            frame(2, "", "anonymous"),
            frame(3, "/app/src/handler.rs", "app::handler"),
            frame(4, "/app/src/main.rs", "app::main"),
        ])
    }

    #[test]
    fn test_locate_start_skips_filtered_frames() {
        let source = sample();
        let filters = FilterSet::new().with("/vendor/");

        let cursor = locate_start(&source, &filters);
        assert!(cursor.found);
        assert_eq!(cursor.depth_index, 2);
        assert_eq!(cursor.frame.file, "/app/src/handler.rs");
        assert_eq!(cursor.frame.line, 3);
    }

    #[test]
    fn test_locate_start_exhausted() {
        let source = sample();
        let filters = FilterSet::new().with("/app/");

        let cursor = locate_start(&source, &filters);
        assert!(!cursor.found);
    }

    #[test]
    fn test_empty_source_not_found() {
        let source = FrameList::default();
        assert!(!locate_start(&source, &FilterSet::new()).found);
        assert_eq!(Walk::new(&source, &FilterSet::new(), 0).count(), 0);
    }

    #[test]
    fn test_builtin_filters() {
        let none = FilterSet::new();
        assert!(is_filtered("", &none));
        assert!(is_filtered("/rustc/abc123/library/std/src/rt.rs", &none));
        assert!(is_filtered(&format!("{}walker.rs", SELF_FILTER_KEY.as_str()), &none));
        assert!(!is_filtered("/app/src/main.rs", &none));
    }

    #[test]
    fn test_walk_applies_skip_after_cursor() {
        let source = sample();
        let filters = FilterSet::new().with("/vendor/");

        let names: Vec<_> = Walk::new(&source, &filters, 1)
            .map(|f| f.function)
            .collect();
        assert_eq!(names, vec!["app::main"]);
    }

    #[test]
    fn test_walk_depth_is_monotonic() {
        let source = sample();
        let filters = FilterSet::new();
        let mut walk = Walk::new(&source, &filters, 0);
        let mut last = walk.depth();
        while walk.next().is_some() {
            assert!(walk.depth() > last);
            last = walk.depth();
        }
    }

    #[test]
    fn test_walk_is_bounded() {
        let frames = (1..=MAX_CALLER_DEPTH + 50)
            .map(|pc| frame(pc, "/app/src/deep.rs", "app::recurse"))
            .collect::<Vec<_>>();
        let source = FrameList::new(frames);

        assert_eq!(Walk::new(&source, &FilterSet::new(), 0).count(), MAX_CALLER_DEPTH);
        assert_eq!(
            Walk::new(&source, &FilterSet::new(), 10).count(),
            MAX_CALLER_DEPTH - 10
        );
    }

    #[test]
    fn test_inlined_frames_keep_their_own_names() {
        // g inlined into f: both depths share one program counter
        let source = FrameList::new(vec![
            Frame::new_unresolved(0x40, "/app/src/g.rs", 3).with_function(Some("app::g".into())),
            Frame::new_unresolved(0x40, "/app/src/f.rs", 9).with_function(Some("app::f".into())),
            frame(0x80, "/app/src/main.rs", "app::main"),
        ]);

        let names: Vec<_> = Walk::new(&source, &FilterSet::new(), 0)
            .map(|f| f.function)
            .collect();
        assert_eq!(names, vec!["app::g", "app::f", "app::main"]);

        let skipped = Walk::new(&source, &FilterSet::new(), 1).next().unwrap();
        assert_eq!(skipped.function, "app::f");
    }

    #[test]
    fn test_huge_skip_yields_nothing() {
        let source = sample();
        assert_eq!(Walk::new(&source, &FilterSet::new(), usize::MAX).count(), 0);
    }
}
