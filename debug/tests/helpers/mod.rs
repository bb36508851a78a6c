#![allow(dead_code)]

use stackprobe_debug::{caller_with_filter, stack, stack_with_filter, Caller, FilterSet};

/// Render the stack from inside a helper file, optionally filtering it out
#[inline(never)]
pub fn trace_from_helper(filter: Option<&str>) -> String {
    let trace = match filter {
        Some(filter) => stack_with_filter(filter, 0),
        None => stack(0),
    };
    std::hint::black_box(trace)
}

/// Look up the nearest caller outside `filter` from inside a helper file
#[inline(never)]
pub fn caller_from_helper(filter: &str) -> Option<Caller> {
    std::hint::black_box(caller_with_filter(&FilterSet::new().with(filter), 0))
}

/// A plain function for name lookups by entry address
#[inline(never)]
pub fn named_handler() -> u32 {
    std::hint::black_box(7)
}
