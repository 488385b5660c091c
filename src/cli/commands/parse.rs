use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::super::args::ParseCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{print_failure, print_summary};
use crate::config::load_config;
use crate::core::{SvelteDocument, parse_file};
use crate::file_scanner::{resolve_includes, scan_files};

/// Outcome of documenting one file.
pub struct FileOutcome {
    /// Path as shown to the user: relative to the working directory when possible.
    pub label: String,
    pub result: Result<SvelteDocument>,
}

pub fn parse(cmd: ParseCommand) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to read the working directory")?;
    let loaded = load_config(&cwd)?;
    let mut options = loaded.config.extract_options();
    cmd.apply(&mut options);
    debug!(from_file = loaded.from_file, ?options, "resolved options");

    let roots: Vec<PathBuf> = if cmd.paths.is_empty() {
        resolve_includes(&loaded.base_dir, &loaded.config.includes)
    } else {
        cmd.paths.clone()
    };
    let scan = scan_files(&roots, &loaded.config.ignores);
    if scan.files.is_empty() {
        bail!("No .svelte files found");
    }
    debug!(
        files = scan.files.len(),
        skipped = scan.skipped_count,
        "scanned component files"
    );

    let outcomes: Vec<FileOutcome> = scan
        .files
        .par_iter()
        .map(|path| FileOutcome {
            label: display_path(path, &cwd),
            result: parse_file(path, &options),
        })
        .collect();

    let single = outcomes.len() == 1;
    let mut documents = Map::new();
    let mut failed = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(document) => {
                let value =
                    serde_json::to_value(&document).context("Failed to serialize document")?;
                documents.insert(outcome.label, value);
            }
            Err(error) => {
                failed += 1;
                warn!(file = %outcome.label, "skipping component");
                print_failure(&outcome.label, &error);
            }
        }
    }

    let documented = documents.len();
    let output = if single {
        documents.into_iter().next().map(|(_, document)| document)
    } else {
        Some(Value::Object(documents))
    };
    if let Some(output) = output {
        write_json(&output, cmd.compact)?;
    }
    if !single {
        print_summary(documented, failed);
    }

    Ok(ExitStatus::from_failures(failed))
}

fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn write_json(value: &Value, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("Failed to serialize output")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text).context("Failed to write output")?;
    Ok(())
}
