//! Pakt CLI entry point: argument parsing, logging and command dispatch.

use clap::Parser;
use miette::Result;
use pakt_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Generate(generate_args) => commands::generate_execute(generate_args),
        cli::Command::Helpers(helpers_args) => commands::helpers_execute(helpers_args),
    };

    result.map_err(error::cli_error_to_miette)
}
