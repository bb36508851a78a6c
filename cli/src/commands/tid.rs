//! Thread id command implementation

use crate::output;
use anyhow::Result;
use clap::Args;
use stackprobe_debug::{current_id, intlog, ThreadId};
use std::sync::{Arc, Barrier};
use std::thread;

#[derive(Args, Debug)]
pub struct TidArgs {
    /// Also spawn this many threads and print their ids
    #[arg(short, long, default_value = "0")]
    pub threads: usize,
}

pub fn run(args: TidArgs) -> Result<()> {
    output::field("main", current_id());
    if args.threads == 0 {
        return Ok(());
    }

    output::info(&format!("Spawning {} worker thread(s)", args.threads));

    // Keep every worker alive until all ids have been taken.
    let barrier = Arc::new(Barrier::new(args.threads));
    let ids: Vec<ThreadId> = thread::scope(|scope| {
        let handles: Vec<_> = (0..args.threads)
            .map(|_| {
                let barrier = barrier.clone();
                scope.spawn(move || {
                    let id = current_id();
                    intlog::print(format_args!("worker thread id {}", id));
                    barrier.wait();
                    id
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(0))
            .collect()
    });

    for (i, id) in ids.iter().enumerate() {
        output::field(&format!("worker {}", i), id);
    }
    if ids.contains(&0) {
        output::warning("Some thread ids could not be determined");
    }
    Ok(())
}
