//! Command-line interface.
//!
//! Kept apart from `core` so the extractor can be used as a library.

use anyhow::Result;

pub mod args;
mod commands;
mod exit_status;
mod report;

pub use args::{Arguments, Command, CommonArgs, ParseCommand};
pub use exit_status::ExitStatus;

use crate::logger::init_logger;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    init_logger(args.verbose(), std::env::var_os("NO_COLOR").is_some());

    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Parse(cmd)) => commands::parse::parse(cmd),
        Some(Command::Init) => commands::init::init(),
        None => Ok(ExitStatus::Success),
    }
}
