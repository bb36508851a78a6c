//! Frame sources
//!
//! A [`FrameSource`] answers two questions about a call stack: what is at a
//! given depth, and what is the name of the function active at that depth.
//! [`CallStack`] answers them for the live stack of the calling thread using
//! the `backtrace` crate; [`FrameList`] replays a fixed list of frames.

use crate::walker::MAX_CALLER_DEPTH;
use stackprobe_shared::types::frame::Frame;
use std::cell::RefCell;
use std::ffi::c_void;
use tracing::{trace, warn};

/// Frames captured beyond the depth limit so the capture's own frames can be dropped
const CAPTURE_SLACK: usize = 32;

/// Location of one frame, before name resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub pc: usize,
    /// Empty when the runtime has no location for the frame
    pub file: String,
    pub line: u32,
}

/// Minimal runtime capability needed to walk a stack
pub trait FrameSource {
    /// Location of the frame at `depth`, or `None` once the stack is exhausted
    fn query_frame(&self, depth: usize) -> Option<RawFrame>;

    /// Name of the function active at `depth`, if the runtime can resolve it
    ///
    /// Several depths share one program counter when calls were inlined, so
    /// names are looked up by depth rather than by address.
    fn resolve_name(&self, depth: usize) -> Option<String>;
}

/// One logical frame: a physical frame, or one call inlined into it
#[derive(Debug, Clone)]
struct ResolvedFrame {
    raw: RawFrame,
    name: Option<String>,
}

/// Snapshot of the calling thread's stack
///
/// Depth 0 is the function that called [`CallStack::capture`]. Every call
/// inlined into a physical frame gets its own depth, innermost first, so a
/// depth always stands for one active function invocation. Physical frames
/// are symbolized lazily, as deeper depths are queried.
pub struct CallStack {
    physical: Vec<backtrace::Frame>,
    logical: RefCell<Logical>,
}

#[derive(Default)]
struct Logical {
    frames: Vec<ResolvedFrame>,
    /// Next physical frame to symbolize
    next: usize,
}

impl CallStack {
    /// Capture the current stack, at most [`MAX_CALLER_DEPTH`] frames deep
    #[inline(never)]
    pub fn capture() -> Self {
        let marker = Self::capture as *const () as usize;
        let limit = MAX_CALLER_DEPTH + CAPTURE_SLACK;
        let mut frames = Vec::new();
        let mut own_frames = None;

        backtrace::trace(|frame| {
            if own_frames.is_none() && frame.symbol_address() as usize == marker {
                own_frames = Some(frames.len() + 1);
            }
            frames.push(frame.clone());
            frames.len() < limit
        });

        match own_frames {
            Some(count) => {
                frames.drain(..count);
            }
            None => warn!("capture frame not found on the stack, keeping all frames"),
        }
        frames.truncate(MAX_CALLER_DEPTH);
        trace!("captured {} physical stack frames", frames.len());

        Self {
            physical: frames,
            logical: RefCell::new(Logical::default()),
        }
    }

    /// Number of logical frames, symbolizing the whole stack if needed
    pub fn len(&self) -> usize {
        self.expand_to(MAX_CALLER_DEPTH);
        self.logical.borrow().frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.physical.is_empty()
    }

    /// Symbolize physical frames until `depth` exists or the stack runs out
    fn expand_to(&self, depth: usize) {
        let mut logical = self.logical.borrow_mut();
        while logical.frames.len() <= depth
            && logical.frames.len() < MAX_CALLER_DEPTH
            && logical.next < self.physical.len()
        {
            let frame = &self.physical[logical.next];
            logical.next += 1;
            let pc = frame.ip() as usize;
            let before = logical.frames.len();

            // Inlined calls yield several symbols, innermost first.
            backtrace::resolve_frame(frame, |symbol| {
                logical.frames.push(ResolvedFrame {
                    raw: RawFrame {
                        pc,
                        file: symbol
                            .filename()
                            .map(|path| path.to_string_lossy().into_owned())
                            .unwrap_or_default(),
                        line: symbol.lineno().unwrap_or(0),
                    },
                    name: symbol.name().map(|n| format!("{:#}", n)),
                });
            });

            if logical.frames.len() == before {
                logical.frames.push(ResolvedFrame {
                    raw: RawFrame {
                        pc,
                        file: String::new(),
                        line: 0,
                    },
                    name: None,
                });
            }
        }
        logical.frames.truncate(MAX_CALLER_DEPTH);
    }

    fn resolved(&self, depth: usize) -> Option<ResolvedFrame> {
        self.expand_to(depth);
        self.logical.borrow().frames.get(depth).cloned()
    }
}

impl FrameSource for CallStack {
    fn query_frame(&self, depth: usize) -> Option<RawFrame> {
        self.resolved(depth).map(|frame| frame.raw)
    }

    fn resolve_name(&self, depth: usize) -> Option<String> {
        self.resolved(depth).and_then(|frame| frame.name)
    }
}

/// Demangled name of the function a return address points into
///
/// `backtrace` steps return addresses back by one byte before lookup, which
/// lands inside the calling instruction.
pub fn symbol_name(ip: usize) -> Option<String> {
    let mut name = None;
    backtrace::resolve(ip as *mut c_void, |symbol| {
        if name.is_none() {
            name = symbol.name().map(|n| format!("{:#}", n));
        }
    });
    name
}

/// Demangled name of the function starting at `entry`
///
/// Entry addresses are exact, so this undoes the return-address adjustment
/// made by [`symbol_name`].
pub fn entry_symbol_name(entry: usize) -> Option<String> {
    symbol_name(entry.wrapping_add(1))
}

/// A fixed list of frames, replayed in order
///
/// Useful for re-rendering frames captured earlier or elsewhere.
#[derive(Debug, Clone, Default)]
pub struct FrameList {
    frames: Vec<Frame>,
}

impl FrameList {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}

impl FrameSource for FrameList {
    fn query_frame(&self, depth: usize) -> Option<RawFrame> {
        self.frames.get(depth).map(|frame| RawFrame {
            pc: frame.pc,
            file: frame.file.clone(),
            line: frame.line,
        })
    }

    fn resolve_name(&self, depth: usize) -> Option<String> {
        self.frames
            .get(depth)
            .filter(|frame| frame.is_symbolized())
            .map(|frame| frame.function.clone())
    }
}

impl From<Vec<Frame>> for FrameList {
    fn from(frames: Vec<Frame>) -> Self {
        Self::new(frames)
    }
}
