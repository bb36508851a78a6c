//! Stack command implementation

use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use stackprobe_debug::{format_frames, intlog, walk, CallStack, FilterSet};
use tracing::debug;

#[derive(Args, Debug)]
pub struct StackArgs {
    /// Leave out frames whose file path contains this substring (repeatable)
    #[arg(short, long = "filter")]
    pub filters: Vec<String>,

    /// Frames to drop from the top of the trace
    #[arg(short, long, default_value = "0")]
    pub skip: usize,

    /// Print frames as JSON instead of the numbered trace
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StackArgs) -> Result<()> {
    let filters = FilterSet::from(args.filters);
    intlog::print(format_args!(
        "rendering stack with {} filter(s), skip {}",
        filters.len(),
        args.skip
    ));

    let call_stack = CallStack::capture();
    debug!("captured {} frames", call_stack.len());
    let frames = walk(&call_stack, &filters, args.skip);

    if args.json {
        let json = serde_json::to_string_pretty(&frames).context("Failed to serialize frames")?;
        println!("{}", json);
        return Ok(());
    }

    if frames.is_empty() {
        output::warning("No frames left after filtering");
        return Ok(());
    }
    print!("{}", format_frames(&frames));
    Ok(())
}
