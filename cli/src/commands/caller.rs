//! Caller command implementation

use crate::output;
use anyhow::Result;
use clap::Args;
use stackprobe_debug::caller;

#[derive(Args, Debug)]
pub struct CallerArgs {
    /// Frames to skip past this command's own frame
    #[arg(short, long, default_value = "0")]
    pub skip: usize,

    /// Print only `basename:line`
    #[arg(long)]
    pub short: bool,
}

pub fn run(args: CallerArgs) -> Result<()> {
    let Some(caller) = caller(args.skip) else {
        anyhow::bail!("No caller frame found (is debug info available?)");
    };

    if args.short {
        println!("{}", caller.file_line_short());
        return Ok(());
    }

    output::field("function", caller.function_name());
    output::field("package", caller.package());
    output::field("file", &caller.file);
    output::field("line", caller.line);
    Ok(())
}
