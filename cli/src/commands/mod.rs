//! Subcommand implementations

pub mod caller;
pub mod hash;
pub mod stack;
pub mod tid;
