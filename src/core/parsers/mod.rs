//! Collaborators that turn a component file into parsed parts.
//!
//! - `component`: splits a `.svelte` file into script blocks and markup
//! - `script`: parses one script block with swc
//! - `source`: byte ranges and comments against the full file text

pub mod component;
pub mod script;
pub mod source;

pub use component::{ParsedComponent, parse_component};
pub use script::{ParsedScript, ScriptContext, ScriptLang, parse_script_source};
pub use source::{ByteRange, CommentStyle, SourceComment};
