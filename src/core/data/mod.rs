//! Core data types shared by the extraction pipeline and its output.
//!
//! ## Module Structure
//!
//! - `comment`: Parsed documentation comments and keywords
//! - `document`: The output document and its entities
//! - `type_descriptor`: Static type descriptors

pub mod comment;
pub mod document;
pub mod type_descriptor;

pub use comment::{Comment, Keyword};
pub use document::{
    DocumentEntity, EntityKind, Feature, MethodParam, SourceLocation, SvelteDocument, Visibility,
};
pub use type_descriptor::{TypeDescriptor, TypeKind, TypeValue};
