//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `parse`: Extract documentation from `.svelte` files as JSON
//! - `init`: Initialize a `.sveltedocrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::{
    ExtractOptions,
    data::{Feature, Visibility},
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Parse(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Component files or directories to scan (default: config `includes`)
    pub paths: Vec<PathBuf>,

    /// Svelte dialect version (overrides config file; detected when unset)
    #[arg(long = "svelte-version", value_name = "VERSION", value_parser = clap::value_parser!(u8).range(2..=3))]
    pub version: Option<u8>,

    /// Features to extract (default: all)
    /// Can be repeated or comma separated: --features data,events
    #[arg(long, value_enum, value_delimiter = ',')]
    pub features: Vec<Feature>,

    /// Visibilities to leave out (overrides config file)
    #[arg(long = "ignore-visibility", value_enum, value_delimiter = ',')]
    pub ignored_visibilities: Vec<Visibility>,

    /// Keep entities of every visibility
    #[arg(long, conflicts_with = "ignored_visibilities")]
    pub all: bool,

    /// Record source locations of every entity
    #[arg(long)]
    pub locations: bool,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ParseCommand {
    /// Apply command-line overrides on top of configured options.
    pub fn apply(&self, options: &mut ExtractOptions) {
        if self.version.is_some() {
            options.version = self.version;
        }
        if !self.features.is_empty() {
            options.features = self.features.clone();
        }
        if self.all {
            options.ignored_visibilities.clear();
        } else if !self.ignored_visibilities.is_empty() {
            options.ignored_visibilities = self.ignored_visibilities.clone();
        }
        if self.locations {
            options.include_source_locations = true;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract component documentation as JSON
    Parse(ParseCommand),
    /// Initialize a new .sveltedocrc.json configuration file
    Init,
}
