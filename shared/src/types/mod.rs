//! Data types shared across crates

pub mod frame;
