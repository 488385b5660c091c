//! sveltedoc - documentation extractor for Svelte components
//!
//! Reads `.svelte` files written for Svelte 2 or Svelte 3 and produces a
//! JSON-serializable description of each component: its name, description,
//! data, computed values, methods, events and slots, with their comments,
//! visibility and inferred types.
//!
//! ```no_run
//! use sveltedoc::core::{ExtractOptions, extract, parse_component};
//!
//! let component = parse_component("<script>export let name;</script>", Some("Hello.svelte"))?;
//! let document = extract(&component, &ExtractOptions::default())?;
//! assert_eq!(document.data[0].name, "name");
//! # Ok::<(), sveltedoc::error::ExtractError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface (`parse` and `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Component parsing and the extraction pipeline
//! - `error`: Extraction errors
//! - `file_scanner`: Component file discovery
//! - `logger`: Diagnostics output setup

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod file_scanner;
pub mod logger;
