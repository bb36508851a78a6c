//! Hash command implementation

use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use stackprobe_shared::utils::hash::HashAlgorithm;

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Algorithm: rs, rs64, js, js64, sdbm or sdbm64
    #[arg(short, long, default_value = "rs")]
    pub algo: String,

    /// Print the value in hexadecimal
    #[arg(long)]
    pub hex: bool,

    /// Input string
    pub input: String,
}

pub fn run(args: HashArgs) -> Result<()> {
    let algorithm: HashAlgorithm = args.algo.parse().context("Invalid --algo")?;
    let value = algorithm.hash(args.input.as_bytes());

    if args.hex {
        output::success(&format!("{} = {:#x}", algorithm, value));
    } else {
        output::success(&format!("{} = {}", algorithm, value));
    }
    Ok(())
}
