//! Dialect dispatch: one strategy per supported Svelte major version.

use enum_dispatch::enum_dispatch;
use tracing::debug;

use super::candidate::BindingCandidate;
use super::comments::CommentBinder;
use super::markup::collect_slots;
use super::v2::V2Strategy;
use super::v3::V3Strategy;
use crate::core::data::EntityKind;
use crate::core::parsers::ParsedComponent;
use crate::error::{ExtractError, Result};

/// Dialect-specific extraction rules.
///
/// Every candidate producer returns occurrences for a single entity kind.
/// Producers are only called for requested features.
#[enum_dispatch]
pub trait DialectStrategy {
    fn version(&self) -> u8;

    /// Blank lines allowed between a comment and the declaration it documents.
    fn comment_gap_lines(&self) -> usize;

    /// Whether a `@type {T}` keyword replaces the inferred type for `kind`.
    fn keyword_type_override(&self, kind: EntityKind) -> bool;

    fn extract_description(
        &self,
        component: &ParsedComponent,
        binder: &mut CommentBinder<'_>,
    ) -> Option<String>;

    fn extract_data<'a>(&self, component: &'a ParsedComponent) -> Result<Vec<BindingCandidate<'a>>>;

    fn extract_computed<'a>(
        &self,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>>;

    fn extract_methods<'a>(
        &self,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>>;

    fn extract_events<'a>(
        &self,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>>;

    fn extract_slots<'a>(&self, component: &'a ParsedComponent) -> Result<Vec<BindingCandidate<'a>>> {
        Ok(collect_slots(component))
    }
}

#[enum_dispatch(DialectStrategy)]
#[derive(Debug, Clone, Copy)]
pub enum Dialect {
    V2(V2Strategy),
    V3(V3Strategy),
}

impl Dialect {
    pub fn from_version(version: u8) -> Result<Self> {
        match version {
            2 => Ok(Dialect::V2(V2Strategy)),
            3 => Ok(Dialect::V3(V3Strategy)),
            other => Err(ExtractError::UnsupportedDialect { version: other }),
        }
    }

    /// Guess the dialect of a component.
    ///
    /// A default-exported object literal or `{{` mustache tags mean v2;
    /// everything else is v3.
    pub fn detect(component: &ParsedComponent) -> Self {
        let dialect = if V2Strategy::has_definition(component) || component.markup.contains("{{") {
            Dialect::V2(V2Strategy)
        } else {
            Dialect::V3(V3Strategy)
        };
        debug!(version = dialect.version(), "detected dialect");
        dialect
    }

    /// Candidates of one kind.
    pub fn candidates<'a>(
        &self,
        kind: EntityKind,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>> {
        match kind {
            EntityKind::Data => self.extract_data(component),
            EntityKind::Computed => self.extract_computed(component),
            EntityKind::Method => self.extract_methods(component),
            EntityKind::Event => self.extract_events(component),
            EntityKind::Slot => self.extract_slots(component),
        }
    }
}
