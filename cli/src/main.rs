//! CLI for stackprobe
//!
//! Commands:
//! - stack: Print the stack of this process, optionally filtered
//! - caller: Print the location of the command's caller
//! - tid: Print thread identifiers
//! - hash: Hash a string with one of the classic string hashes

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "stackprobe")]
#[command(about = "stackprobe - call-stack and thread debugging", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable internal debug output (overrides STACKPROBE_DEBUG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current call stack
    Stack(commands::stack::StackArgs),

    /// Print the location of the caller
    Caller(commands::caller::CallerArgs),

    /// Print thread identifiers
    Tid(commands::tid::TidArgs),

    /// Hash a string
    Hash(commands::hash::HashArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.debug);

    match cli.command {
        Commands::Stack(args) => commands::stack::run(args),
        Commands::Caller(args) => commands::caller::run(args),
        Commands::Tid(args) => commands::tid::run(args),
        Commands::Hash(args) => commands::hash::run(args),
    }
}

/// Install the subscriber; `--debug` also opens the debug gate
fn init_tracing(verbose: bool, debug: bool) {
    if debug {
        stackprobe_debug::set_debug_enabled(true);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, debug)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(debug))
        .init();
}

/// Filter used when `RUST_LOG` is unset
fn default_directives(verbose: bool, debug: bool) -> String {
    let base = if verbose { "debug" } else { "info" };
    if debug {
        format!("{base},stackprobe_debug=trace,stackprobe_shared=trace")
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false, false), "info");
        assert_eq!(default_directives(true, false), "debug");
        assert_eq!(
            default_directives(false, true),
            "info,stackprobe_debug=trace,stackprobe_shared=trace"
        );
    }

    #[test]
    fn test_debug_flag_is_global() {
        let cli = Cli::try_parse_from(["stackprobe", "tid", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(!cli.verbose);
    }
}
