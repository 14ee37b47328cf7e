//! Command-line interface definition.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Cascade - CSS attribution for page builds
#[derive(Parser, Debug)]
#[command(
    name = "cascade",
    version,
    about = "Inspect how a page build assigns CSS to pages",
    long_about = "Replays a captured page build (module graph, pages and both bundler\n\
                  passes) through CSS attribution and prints each page's stylesheets\n\
                  in cascade order."
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

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run both CSS passes and print each page's stylesheets
    Attribute(AttributeArgs),
    /// Print the chunk name every stylesheet in the graph would get
    Names(NamesArgs),
    /// Validate `cascade.toml`
    Check(CheckArgs),
}

impl Command {
    /// Project root the command reads `cascade.toml` from.
    pub fn root(&self) -> &Path {
        match self {
            Command::Attribute(args) => &args.root,
            Command::Names(args) => &args.root,
            Command::Check(args) => &args.root,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct AttributeArgs {
    /// Captured build description (JSON)
    pub build: PathBuf,

    /// Project root holding `cascade.toml`
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also render each page's head markup (text format only)
    #[arg(long)]
    pub head: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NamesArgs {
    /// Captured build description (JSON)
    pub build: PathBuf,

    /// Project root holding `cascade.toml`
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Project root holding `cascade.toml`
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
