//! Component parsing and documentation extraction.
//!
//! ## Module Structure
//!
//! - `parsers`: Splitting a component file and parsing its scripts
//! - `extract`: Turning a parsed component into a document
//! - `data`: The document model shared by both

pub mod data;
pub mod extract;
pub mod parsers;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing::debug;

pub use data::SvelteDocument;
pub use extract::{ExtractOptions, extract};
pub use parsers::{ParsedComponent, parse_component};

/// Read, parse and extract one component file.
pub fn parse_file(path: &Path, options: &ExtractOptions) -> Result<SvelteDocument> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let label = path.to_string_lossy();
    debug!(file = %label, bytes = source.len(), "parsing component");

    let component = parse_component(source, Some(&*label))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    extract(&component, options).with_context(|| format!("Failed to document {}", path.display()))
}

#[cfg(test)]
mod tests {
    use crate::core::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_file_names_component_after_stem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Counter.svelte");
        fs::write(
            &path,
            "<script>\n/** Starting value. */\nexport let count = 0;\n</script>",
        )
        .unwrap();

        let document = parse_file(&path, &ExtractOptions::default()).unwrap();
        assert_eq!(document.name.as_deref(), Some("Counter"));
        assert_eq!(document.data.len(), 1);
        assert_eq!(document.data[0].name, "count");
    }

    #[test]
    fn test_parse_file_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = parse_file(&dir.path().join("Nope.svelte"), &ExtractOptions::default());
        assert!(result.unwrap_err().to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_parse_file_syntax_error_keeps_cause() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Broken.svelte");
        fs::write(&path, "<script>let = ;</script>").unwrap();

        let err = parse_file(&path, &ExtractOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Broken.svelte"));
        assert!(err.root_cause().to_string().contains("syntax error"));
    }
}
