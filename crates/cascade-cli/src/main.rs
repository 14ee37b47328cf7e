//! Cascade CLI entry point.
//!
//! Parses arguments, sets up logging and dispatches to a command.

use clap::Parser;
use cascade_cli::{cli, commands, logger};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let configured_level = commands::configured_log_level(args.command.root());
    logger::init_logger(
        args.verbose,
        args.quiet,
        args.no_color,
        configured_level.as_deref(),
    );

    let result = match args.command {
        cli::Command::Attribute(attribute_args) => commands::attribute::execute(&attribute_args),
        cli::Command::Names(names_args) => commands::names::execute(&names_args),
        cli::Command::Check(check_args) => commands::check::execute(&check_args),
    };

    let output = result.map_err(|err| miette::miette!("{err:#}"))?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
