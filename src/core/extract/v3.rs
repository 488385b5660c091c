//! Svelte 3 components: top-level script bindings are the component API.
//!
//! - `export let` / `export const` / `export function` are public
//! - plain declarations are private
//! - `<script context="module">` bindings are static
//! - `$: name = expr` with an undeclared `name` is a computed value
//! - `<!-- @component ... -->` describes the component

use super::candidate::BindingCandidate;
use super::comments::CommentBinder;
use super::dialect::DialectStrategy;
use super::events::{Emitter, EventCollector};
use super::markup::collect_forwarded_events;
use super::resolver::resolve_script;
use super::walker::DeclarationWalker;
use crate::core::data::{Comment, EntityKind};
use crate::core::parsers::ParsedComponent;
use crate::error::Result;

const COMPONENT_TAG: &str = "@component";

#[derive(Debug, Clone, Copy, Default)]
pub struct V3Strategy;

impl V3Strategy {
    /// Resolved script candidates of `kind`, script by script.
    fn script_candidates<'a>(
        component: &'a ParsedComponent,
        kind: EntityKind,
    ) -> Result<Vec<BindingCandidate<'a>>> {
        let mut candidates = Vec::new();
        for (scope, script) in component.scripts.iter().enumerate() {
            let facts = DeclarationWalker::new(script, scope).walk();
            candidates.extend(
                resolve_script(facts, scope)?
                    .into_iter()
                    .filter(|c| c.kind == kind),
            );
        }
        Ok(candidates)
    }
}

impl DialectStrategy for V3Strategy {
    fn version(&self) -> u8 {
        3
    }

    fn comment_gap_lines(&self) -> usize {
        1
    }

    fn keyword_type_override(&self, _kind: EntityKind) -> bool {
        false
    }

    fn extract_description(
        &self,
        component: &ParsedComponent,
        binder: &mut CommentBinder<'_>,
    ) -> Option<String> {
        let comment = component
            .markup_comments
            .iter()
            .find(|c| c.text.trim_start().starts_with(COMPONENT_TAG))?;
        binder.claim(comment.range.start);
        let body = comment.text.trim_start().strip_prefix(COMPONENT_TAG)?;
        Comment::parse(body).description
    }

    fn extract_data<'a>(&self, component: &'a ParsedComponent) -> Result<Vec<BindingCandidate<'a>>> {
        Self::script_candidates(component, EntityKind::Data)
    }

    fn extract_computed<'a>(
        &self,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>> {
        Self::script_candidates(component, EntityKind::Computed)
    }

    fn extract_methods<'a>(
        &self,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>> {
        Self::script_candidates(component, EntityKind::Method)
    }

    fn extract_events<'a>(
        &self,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>> {
        let mut events: Vec<BindingCandidate<'a>> = component
            .scripts
            .iter()
            .flat_map(|script| EventCollector::new(script, Emitter::dispatchers(script)).collect())
            .collect();
        events.extend(collect_forwarded_events(component));
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::extract::v3::*;
    use crate::core::parsers::parse_component;

    fn names(candidates: &[BindingCandidate<'_>]) -> Vec<String> {
        candidates.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_data_and_methods_are_split() {
        let source = "<script>\nexport let a = 1;\nlet b;\nexport function go() {}\n</script>";
        let component = parse_component(source, None).unwrap();
        let data = V3Strategy.extract_data(&component).unwrap();
        let methods = V3Strategy.extract_methods(&component).unwrap();
        assert_eq!(names(&data), vec!["a", "b"]);
        assert_eq!(names(&methods), vec!["go"]);
    }

    #[test]
    fn test_module_script_is_static() {
        let source = "<script context=\"module\">\nexport const shared = 1;\n</script>\n<script>\nexport let own;\n</script>";
        let component = parse_component(source, None).unwrap();
        let data = V3Strategy.extract_data(&component).unwrap();
        assert!(data[0].is_static);
        assert!(!data[1].is_static);
    }

    #[test]
    fn test_component_description() {
        let source = "<!-- @component\nA clickable button.\n-->\n<button><slot></slot></button>";
        let component = parse_component(source, None).unwrap();
        let mut binder = CommentBinder::new(&component.source, component.comments(), 1);
        assert_eq!(
            V3Strategy.extract_description(&component, &mut binder),
            Some("A clickable button.".to_string())
        );
    }

    #[test]
    fn test_events_from_script_and_markup() {
        let source = "<script>\nimport { createEventDispatcher } from 'svelte';\nconst dispatch = createEventDispatcher();\n</script>\n<button on:click on:keydown={() => dispatch('key')}>Go</button>";
        let component = parse_component(source, None).unwrap();
        let events = V3Strategy.extract_events(&component).unwrap();
        let mut found = names(&events);
        found.sort();
        assert_eq!(found, vec!["click"]);
    }
}
