//! Intermediate records produced by the dialect walkers.
//!
//! A `BindingCandidate` is one occurrence of a documentable binding: a
//! declaration, an export of it, an import that is re-exported, a dispatch
//! call or a slot tag. Occurrences sharing a `CanonicalId` merge into one
//! document entity.

use swc_ecma_ast::Expr;

use crate::core::data::{
    Comment, DocumentEntity, EntityKind, MethodParam, SourceLocation, TypeDescriptor, Visibility,
};
use crate::core::parsers::ByteRange;

/// Identity of a binding, independent of the name it is exported under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalId {
    /// Declared in the script block with index `scope`.
    Local { scope: usize, name: String },
    /// Imported from `path`; `original` is the name in the source module,
    /// `default` for default imports and `*` for namespace imports.
    Import { path: String, original: String },
    /// Member of a v2 component definition object.
    Member(String),
    /// Events and slots, identified by their public name.
    Named(String),
}

/// Whether an occurrence introduces a binding or refers to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Declaration,
    Usage,
}

/// A function parameter before its type and description are known.
#[derive(Debug, Clone)]
pub struct ParamCandidate<'a> {
    pub name: String,
    pub default: Option<&'a Expr>,
    pub rest: bool,
}

#[derive(Debug, Clone)]
pub struct BindingCandidate<'a> {
    pub id: CanonicalId,
    pub name: String,
    pub local_name: Option<String>,
    pub original_name: Option<String>,
    pub import_path: Option<String>,
    pub kind: EntityKind,
    pub visibility: Visibility,
    pub is_static: bool,
    pub role: Role,
    /// Identifier token of this occurrence.
    pub ident: ByteRange,
    /// Positions searched for a preceding comment, most specific first.
    pub anchors: Vec<usize>,
    pub init: Option<&'a Expr>,
    /// Last top-level reassignment of the binding.
    pub reassigned: Option<&'a Expr>,
    /// Type fixed by the declaration form, e.g. `function` for methods.
    pub declared_type: Option<TypeDescriptor>,
    pub params: Vec<ParamCandidate<'a>>,
    pub dependencies: Vec<String>,
    /// Comment bound by the producer itself rather than the binder.
    pub comment: Option<Comment>,
    /// End of the declaration, for comments trailing on the same line.
    pub trailing: Option<usize>,
}

impl<'a> BindingCandidate<'a> {
    pub fn new(
        id: CanonicalId,
        name: impl Into<String>,
        kind: EntityKind,
        visibility: Visibility,
        ident: ByteRange,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            local_name: None,
            original_name: None,
            import_path: None,
            kind,
            visibility,
            is_static: false,
            role: Role::Declaration,
            ident,
            anchors: vec![ident.start],
            init: None,
            reassigned: None,
            declared_type: None,
            params: Vec::new(),
            dependencies: Vec::new(),
            comment: None,
            trailing: None,
        }
    }

    pub fn usage(mut self) -> Self {
        self.role = Role::Usage;
        self
    }

    /// Append comment anchors after the identifier itself.
    pub fn anchored_at(mut self, anchors: &[usize]) -> Self {
        for &anchor in anchors {
            if !self.anchors.contains(&anchor) {
                self.anchors.push(anchor);
            }
        }
        self
    }

    pub fn trailing_at(mut self, end: usize) -> Self {
        self.trailing = Some(end);
        self
    }

    pub fn with_init(mut self, init: Option<&'a Expr>) -> Self {
        self.init = init;
        self
    }

    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.declared_type = Some(ty);
        self
    }
}

/// A candidate after comment binding, type inference and location recording.
#[derive(Debug, Clone)]
pub struct ResolvedCandidate {
    pub id: CanonicalId,
    pub name: String,
    pub local_name: Option<String>,
    pub original_name: Option<String>,
    pub import_path: Option<String>,
    pub kind: EntityKind,
    pub visibility: Visibility,
    pub is_static: bool,
    pub role: Role,
    pub position: usize,
    pub ty: TypeDescriptor,
    pub comment: Option<Comment>,
    pub location: Option<SourceLocation>,
    pub params: Vec<MethodParam>,
    pub dependencies: Vec<String>,
}

impl ResolvedCandidate {
    /// Single-occurrence entity; the assembler merges groups on top of this.
    pub fn to_entity(&self) -> DocumentEntity {
        let (description, keywords) = match &self.comment {
            Some(comment) => (comment.description.clone(), comment.keywords.clone()),
            None => (None, Vec::new()),
        };
        DocumentEntity {
            name: self.name.clone(),
            local_name: self.local_name.clone(),
            original_name: self.original_name.clone(),
            import_path: self.import_path.clone(),
            kind: self.kind,
            visibility: self.visibility,
            is_static: self.is_static,
            ty: self.ty.clone(),
            description,
            keywords,
            locations: None,
            params: self.params.clone(),
            dependencies: self.dependencies.clone(),
        }
    }
}
