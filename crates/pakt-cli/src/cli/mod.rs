//! Command-line interface definition for pakt.
//!
//! - `pakt generate` - write the runtime package.json of a project
//! - `pakt helpers` - show compiler helper edges of a project

mod commands;

use clap::Parser;

pub use commands::{Command, GenerateArgs, HelpersArgs};

/// Pakt - runtime package.json generation for workspace builds
#[derive(Parser, Debug)]
#[command(
    name = "pakt",
    version,
    about = "Generate runtime package.json files from a project graph",
    long_about = "Pakt derives the exact runtime dependencies of a workspace project from its\n\
                  dependency graph and writes a deployable package.json next to the build output."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
