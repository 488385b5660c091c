//! Human-facing messages on stderr.
//!
//! Documents go to stdout as JSON; everything here goes to stderr so the
//! JSON stays machine readable.

use std::io::{self, Write};

use anyhow::Error;
use colored::Colorize;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print one file that could not be documented, with its error chain.
pub fn print_failure(path: &str, error: &Error) {
    write_failure(&mut io::stderr().lock(), path, error).ok();
}

pub fn write_failure<W: Write>(writer: &mut W, path: &str, error: &Error) -> io::Result<()> {
    writeln!(
        writer,
        "{} {} {}",
        FAILURE_MARK.red(),
        path.bold(),
        format!("{:#}", error).red()
    )
}

/// Print the totals line after documenting several files.
pub fn print_summary(documented: usize, failed: usize) {
    write_summary(&mut io::stderr().lock(), documented, failed).ok();
}

pub fn write_summary<W: Write>(writer: &mut W, documented: usize, failed: usize) -> io::Result<()> {
    let components = |n: usize| if n == 1 { "component" } else { "components" };
    if failed == 0 {
        writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Documented {} {}", documented, components(documented)).green()
        )
    } else {
        writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Documented {} {}, {} failed",
                documented,
                components(documented),
                failed
            )
            .red()
        )
    }
}
