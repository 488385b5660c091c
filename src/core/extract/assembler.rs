//! Merging resolved candidates into document entities.

use std::collections::HashMap;

use super::candidate::{CanonicalId, ResolvedCandidate, Role};
use crate::core::data::{DocumentEntity, Visibility};

pub struct DocumentAssembler<'o> {
    ignored_visibilities: &'o [Visibility],
    include_locations: bool,
}

impl<'o> DocumentAssembler<'o> {
    pub fn new(ignored_visibilities: &'o [Visibility], include_locations: bool) -> Self {
        Self {
            ignored_visibilities,
            include_locations,
        }
    }

    /// Merge candidates of one kind into entities.
    ///
    /// Candidates sharing a canonical id become one entity; entities keep the
    /// order in which their first occurrence was seen. Entities whose merged
    /// visibility is ignored are dropped.
    pub fn assemble(&self, candidates: Vec<ResolvedCandidate>) -> Vec<DocumentEntity> {
        let mut order: Vec<CanonicalId> = Vec::new();
        let mut groups: HashMap<CanonicalId, Vec<ResolvedCandidate>> = HashMap::new();
        for candidate in candidates {
            let group = groups.entry(candidate.id.clone()).or_insert_with(|| {
                order.push(candidate.id.clone());
                Vec::new()
            });
            group.push(candidate);
        }

        order
            .into_iter()
            .filter_map(|id| groups.remove(&id))
            .filter_map(|group| self.merge(group))
            .filter(|entity| !self.ignored_visibilities.contains(&entity.visibility))
            .collect()
    }

    fn merge(&self, mut group: Vec<ResolvedCandidate>) -> Option<DocumentEntity> {
        group.sort_by_key(|c| (c.role, c.position));
        let primary = group.first()?;
        let public = group
            .iter()
            .find(|c| c.role == Role::Usage)
            .unwrap_or(primary);

        let mut entity = primary.to_entity();
        entity.name = public.name.clone();
        entity.local_name = public
            .local_name
            .clone()
            .or_else(|| Some(primary.name.clone()))
            .filter(|local| *local != entity.name);
        entity.original_name = group.iter().find_map(|c| c.original_name.clone());
        entity.import_path = group.iter().find_map(|c| c.import_path.clone());
        entity.visibility = group
            .iter()
            .map(|c| c.visibility)
            .max()
            .unwrap_or(primary.visibility);
        entity.is_static = group.iter().any(|c| c.is_static);

        if let Some(comment) = group.iter().find_map(|c| c.comment.as_ref()) {
            entity.description = comment.description.clone();
            entity.keywords = comment.keywords.clone();
        }

        if self.include_locations {
            entity.locations = Some(group.iter().filter_map(|c| c.location).collect());
        }

        Some(entity)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::data::{Comment, EntityKind, SourceLocation, TypeDescriptor};
    use crate::core::extract::assembler::*;

    fn candidate(name: &str, role: Role, position: usize) -> ResolvedCandidate {
        ResolvedCandidate {
            id: CanonicalId::Local {
                scope: 0,
                name: "inner".to_string(),
            },
            name: name.to_string(),
            local_name: None,
            original_name: None,
            import_path: None,
            kind: EntityKind::Data,
            visibility: match role {
                Role::Declaration => Visibility::Private,
                Role::Usage => Visibility::Public,
            },
            is_static: false,
            role,
            position,
            ty: TypeDescriptor::named("string"),
            comment: None,
            location: Some(SourceLocation {
                start: position,
                end: position + name.len(),
            }),
            params: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    #[test]
    fn test_declaration_and_export_merge() {
        let mut declaration = candidate("inner", Role::Declaration, 10);
        declaration.comment = Some(Comment::parse("* The inner value."));
        let usage = candidate("outer", Role::Usage, 40);

        let assembler = DocumentAssembler::new(&[], true);
        let entities = assembler.assemble(vec![declaration, usage]);

        assert_eq!(entities.len(), 1);
        let entity = &entities[0];
        assert_eq!(entity.name, "outer");
        assert_eq!(entity.local_name.as_deref(), Some("inner"));
        assert_eq!(entity.visibility, Visibility::Public);
        assert_eq!(entity.description.as_deref(), Some("The inner value."));
        assert_eq!(entity.locations.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_same_name_export_has_no_local_name() {
        let declaration = candidate("inner", Role::Declaration, 10);
        let usage = candidate("inner", Role::Usage, 40);
        let entities = DocumentAssembler::new(&[], false).assemble(vec![usage, declaration]);
        assert_eq!(entities[0].local_name, None);
        assert_eq!(entities[0].locations, None);
    }

    #[test]
    fn test_ignored_visibility_is_dropped() {
        let declaration = candidate("inner", Role::Declaration, 10);
        let entities =
            DocumentAssembler::new(&[Visibility::Private], false).assemble(vec![declaration]);
        assert!(entities.is_empty());
    }

    #[test]
    fn test_groups_keep_first_occurrence_order() {
        let mut second = candidate("b", Role::Declaration, 20);
        second.id = CanonicalId::Member("b".to_string());
        let mut first = candidate("a", Role::Declaration, 10);
        first.id = CanonicalId::Member("a".to_string());
        let names: Vec<String> = DocumentAssembler::new(&[], false)
            .assemble(vec![first, second])
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
