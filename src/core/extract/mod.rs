//! Component documentation extraction.
//!
//! ## Pipeline
//!
//! 1. pick the dialect (explicit version or detection)
//! 2. collect candidates for every requested entity kind
//! 3. bind comments in source order, so each comment documents one binding
//! 4. apply visibility keywords and infer types
//! 5. record locations, then merge candidates into entities
//!
//! ## Module Structure
//!
//! - `dialect`: Per-version strategies behind one trait
//! - `v2` / `v3`: The two dialect strategies
//! - `walker` / `resolver`: v3 script declarations and export resolution
//! - `events` / `markup`: Events and slots from scripts and markup
//! - `comments`: Comment binding
//! - `infer`: Type inference
//! - `locations`: Character offsets
//! - `assembler`: Merging candidates into entities

pub mod assembler;
pub mod ast;
pub mod candidate;
pub mod comments;
pub mod dialect;
pub mod events;
pub mod infer;
pub mod locations;
pub mod markup;
pub mod resolver;
pub mod v2;
pub mod v3;
pub mod walker;

use tracing::debug;

use crate::core::data::{Feature, MethodParam, SvelteDocument, TypeDescriptor, Visibility};
use crate::core::parsers::ParsedComponent;
use crate::error::Result;

pub use assembler::DocumentAssembler;
pub use candidate::{BindingCandidate, CanonicalId, ResolvedCandidate, Role};
pub use comments::CommentBinder;
pub use dialect::{Dialect, DialectStrategy};
pub use infer::{infer_binding, infer_type};
pub use locations::LocationRecorder;

/// What to extract and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Dialect version; detected from the component when `None`.
    pub version: Option<u8>,
    pub features: Vec<Feature>,
    /// Entities whose final visibility is listed here are dropped.
    pub ignored_visibilities: Vec<Visibility>,
    pub include_source_locations: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            version: None,
            features: Feature::ALL.to_vec(),
            ignored_visibilities: vec![Visibility::Private, Visibility::Protected],
            include_source_locations: false,
        }
    }
}

impl ExtractOptions {
    pub fn wants(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// Extract the document of a parsed component.
pub fn extract(component: &ParsedComponent, options: &ExtractOptions) -> Result<SvelteDocument> {
    let dialect = match options.version {
        Some(version) => Dialect::from_version(version)?,
        None => Dialect::detect(component),
    };
    debug!(
        version = dialect.version(),
        scripts = component.scripts.len(),
        "extracting component"
    );

    let mut document = SvelteDocument::new(dialect.version());
    let mut binder = CommentBinder::new(
        &component.source,
        component.comments(),
        dialect.comment_gap_lines(),
    );

    if options.wants(Feature::Name) {
        document.name = component.name.clone();
    }
    if options.wants(Feature::Description) {
        document.description = dialect.extract_description(component, &mut binder);
    }

    let mut kinds = Vec::new();
    let mut candidates = Vec::new();
    for feature in &options.features {
        let Some(kind) = feature.entity_kind() else {
            continue;
        };
        if kinds.contains(&kind) {
            continue;
        }
        kinds.push(kind);
        candidates.extend(dialect.candidates(kind, component)?);
    }
    candidates.sort_by_key(|c| c.ident.start);

    let recorder = LocationRecorder::new(&component.source, options.include_source_locations);
    let mut resolved: Vec<ResolvedCandidate> = candidates
        .into_iter()
        .map(|candidate| resolve_candidate(candidate, &dialect, &mut binder, &recorder))
        .collect();

    let assembler = DocumentAssembler::new(
        &options.ignored_visibilities,
        options.include_source_locations,
    );
    for kind in kinds {
        let (of_kind, rest): (Vec<_>, Vec<_>) = resolved.into_iter().partition(|c| c.kind == kind);
        resolved = rest;
        *document.entities_mut(kind) = assembler.assemble(of_kind);
    }

    Ok(document)
}

/// Bind the comment, settle visibility and type, and record the location.
fn resolve_candidate(
    candidate: BindingCandidate<'_>,
    dialect: &Dialect,
    binder: &mut CommentBinder<'_>,
    recorder: &LocationRecorder<'_>,
) -> ResolvedCandidate {
    let comment = match candidate.comment {
        Some(comment) => Some(comment),
        None => binder
            .bind(&candidate.anchors)
            .or_else(|| candidate.trailing.and_then(|end| binder.bind_trailing(end))),
    };

    let visibility = comment
        .as_ref()
        .and_then(|c| c.visibility())
        .unwrap_or(candidate.visibility);

    let keyword_type = dialect
        .keyword_type_override(candidate.kind)
        .then(|| comment.as_ref()?.keyword("type"))
        .flatten()
        .and_then(|keyword| TypeDescriptor::from_type_tag(&keyword.description));
    let ty = keyword_type
        .or(candidate.declared_type)
        .unwrap_or_else(|| infer_binding(candidate.init, candidate.reassigned));

    let params = candidate
        .params
        .iter()
        .map(|param| MethodParam {
            name: param.name.clone(),
            ty: infer_type(param.default),
            description: comment
                .as_ref()
                .and_then(|c| c.param_description(&param.name)),
            optional: param.default.is_some() || param.rest,
        })
        .collect();

    ResolvedCandidate {
        id: candidate.id,
        name: candidate.name,
        local_name: candidate.local_name,
        original_name: candidate.original_name,
        import_path: candidate.import_path,
        kind: candidate.kind,
        visibility,
        is_static: candidate.is_static,
        role: candidate.role,
        position: candidate.ident.start,
        ty,
        location: recorder.record(candidate.ident),
        comment,
        params,
        dependencies: candidate.dependencies,
    }
}
