//! Shared types and utilities for stackprobe
//!
//! This crate contains the frame data structures produced by the stack walker
//! and small utilities (string hashes, timestamps) used by the debug library
//! and the command-line interface.

pub mod types;
pub mod utils;

// Re-export commonly used types
pub use types::frame::*;
