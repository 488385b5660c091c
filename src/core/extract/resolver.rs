//! Symbol resolution: linking exports and member references to declarations.

use std::collections::{HashMap, HashSet};

use swc_ecma_ast::{
    Decl, Expr, Function, Ident, ImportSpecifier, ModuleDecl, ModuleItem, Pat, Stmt,
};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use super::ast::{extract_binding_names, unwrap_expr};
use super::candidate::{BindingCandidate, CanonicalId};
use super::walker::{ImportBinding, ScriptFacts};
use crate::core::data::{EntityKind, Visibility};
use crate::core::parsers::{ByteRange, ParsedScript};
use crate::error::{ExtractError, Result};

/// Resolve the facts of one v3 script into candidates.
///
/// - export lists become usages of the declaration or import they name
/// - imports that are exported become declarations with their module path
/// - `$: name = expr` with an undeclared `name` becomes a computed value
/// - top-level reassignments are attached to the declaration they target
///
/// An export naming nothing declared or imported is an error.
pub fn resolve_script<'a>(facts: ScriptFacts<'a>, scope: usize) -> Result<Vec<BindingCandidate<'a>>> {
    let ScriptFacts {
        mut declarations,
        imports,
        exports,
        assignments,
    } = facts;

    let mut declared: HashMap<String, usize> = HashMap::new();
    for (index, candidate) in declarations.iter().enumerate() {
        declared.entry(candidate.name.clone()).or_insert(index);
    }
    let imported: HashMap<&str, &ImportBinding> =
        imports.iter().map(|i| (i.local.as_str(), i)).collect();

    let mut computed: Vec<BindingCandidate<'a>> = Vec::new();
    for assignment in &assignments {
        if let Some(&index) = declared.get(&assignment.target) {
            declarations[index].reassigned = Some(assignment.value);
            continue;
        }
        if !assignment.reactive || imported.contains_key(assignment.target.as_str()) {
            continue;
        }

        let dependencies = collect_references(assignment.value)
            .into_iter()
            .filter(|name| *name != assignment.target)
            .filter(|name| declared.contains_key(name) || imported.contains_key(name.as_str()))
            .collect();
        let is_first = !computed.iter().any(|c| c.name == assignment.target);
        let mut candidate = BindingCandidate::new(
            CanonicalId::Local {
                scope,
                name: assignment.target.clone(),
            },
            assignment.target.clone(),
            EntityKind::Computed,
            Visibility::Private,
            assignment.ident,
        )
        .anchored_at(&assignment.anchors)
        .with_init(Some(assignment.value));
        candidate.dependencies = dependencies;
        if !is_first {
            candidate = candidate.usage();
        }
        computed.push(candidate);
    }

    let mut import_candidates: Vec<BindingCandidate<'a>> = Vec::new();
    let mut exported_imports: HashSet<&str> = HashSet::new();
    let mut usages: Vec<BindingCandidate<'a>> = Vec::new();

    for export in &exports {
        let local_name = (export.local != export.exported).then(|| export.local.clone());

        if let Some(path) = &export.source {
            let mut candidate = BindingCandidate::new(
                CanonicalId::Import {
                    path: path.clone(),
                    original: export.local.clone(),
                },
                export.exported.clone(),
                EntityKind::Data,
                Visibility::Public,
                export.ident,
            )
            .anchored_at(&export.anchors);
            candidate.original_name = Some(export.local.clone());
            candidate.import_path = Some(path.clone());
            usages.push(candidate);
        } else if let Some(&index) = declared.get(&export.local) {
            let declaration = &declarations[index];
            let mut candidate = BindingCandidate::new(
                declaration.id.clone(),
                export.exported.clone(),
                declaration.kind,
                Visibility::Public,
                export.ident,
            )
            .anchored_at(&export.anchors)
            .usage();
            candidate.local_name = local_name;
            candidate.is_static = declaration.is_static;
            usages.push(candidate);
        } else if let Some(import) = imported.get(export.local.as_str()) {
            let id = CanonicalId::Import {
                path: import.path.clone(),
                original: import.original.clone(),
            };
            let original_name = match import.original.as_str() {
                "default" | "*" => import.local.clone(),
                original => original.to_string(),
            };

            if exported_imports.insert(import.local.as_str()) {
                let mut candidate = BindingCandidate::new(
                    id.clone(),
                    import.local.clone(),
                    EntityKind::Data,
                    Visibility::Private,
                    import.ident,
                )
                .anchored_at(&import.anchors);
                candidate.original_name = Some(original_name.clone());
                candidate.import_path = Some(import.path.clone());
                import_candidates.push(candidate);
            }

            let mut candidate = BindingCandidate::new(
                id,
                export.exported.clone(),
                EntityKind::Data,
                Visibility::Public,
                export.ident,
            )
            .anchored_at(&export.anchors)
            .usage();
            candidate.local_name = local_name;
            candidate.original_name = Some(original_name);
            candidate.import_path = Some(import.path.clone());
            usages.push(candidate);
        } else {
            debug!(name = %export.local, "export names an undeclared binding");
            return Err(ExtractError::unresolved(&export.local));
        }
    }

    declarations.extend(import_candidates);
    declarations.extend(usages);
    declarations.extend(computed);
    Ok(declarations)
}

/// Identifiers referenced by an expression, in first-seen order.
pub fn collect_references(expr: &Expr) -> Vec<String> {
    let mut collector = ReferenceCollector::default();
    expr.visit_with(&mut collector);
    collector.names
}

#[derive(Default)]
struct ReferenceCollector {
    names: Vec<String>,
}

impl Visit for ReferenceCollector {
    fn visit_ident(&mut self, ident: &Ident) {
        let name = ident.sym.to_string();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }
}

/// What a top-level name is bound to.
#[derive(Debug, Clone, Copy)]
pub enum Symbol<'a> {
    Variable {
        init: Option<&'a Expr>,
        ident: ByteRange,
    },
    Function {
        function: &'a Function,
        ident: ByteRange,
        start: usize,
    },
    Import,
}

/// Top-level bindings of one script, for resolving identifiers in v2
/// component definitions.
#[derive(Debug, Default)]
pub struct TopLevelSymbols<'a> {
    symbols: HashMap<String, Symbol<'a>>,
}

/// Maximum number of `const a = b` hops followed when resolving a name.
const MAX_ALIAS_DEPTH: usize = 8;

/// An expression with identifiers followed to what they are bound to.
#[derive(Debug, Clone)]
pub enum Resolved<'a> {
    Expr(&'a Expr),
    Function {
        name: String,
        function: &'a Function,
        ident: ByteRange,
        start: usize,
    },
    /// Imported, or declared without a value.
    Opaque,
}

impl<'a> TopLevelSymbols<'a> {
    pub fn collect(script: &'a ParsedScript) -> Self {
        let mut symbols = HashMap::new();
        for item in &script.module.body {
            let decl = match item {
                ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => &export.decl,
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    for specifier in &import.specifiers {
                        let local = match specifier {
                            ImportSpecifier::Named(s) => &s.local,
                            ImportSpecifier::Default(s) => &s.local,
                            ImportSpecifier::Namespace(s) => &s.local,
                        };
                        symbols.insert(local.sym.to_string(), Symbol::Import);
                    }
                    continue;
                }
                _ => continue,
            };
            match decl {
                Decl::Var(var) => {
                    for declarator in &var.decls {
                        if let Pat::Ident(binding) = &declarator.name {
                            symbols.insert(
                                binding.id.sym.to_string(),
                                Symbol::Variable {
                                    init: declarator.init.as_deref(),
                                    ident: script.range(binding.id.span),
                                },
                            );
                            continue;
                        }
                        for name in extract_binding_names(&declarator.name) {
                            symbols.insert(
                                name,
                                Symbol::Variable {
                                    init: None,
                                    ident: script.range(declarator.span),
                                },
                            );
                        }
                    }
                }
                Decl::Fn(fn_decl) => {
                    symbols.insert(
                        fn_decl.ident.sym.to_string(),
                        Symbol::Function {
                            function: &fn_decl.function,
                            ident: script.range(fn_decl.ident.span),
                            start: script.position(fn_decl.function.span.lo),
                        },
                    );
                }
                _ => {}
            }
        }
        Self { symbols }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol<'a>> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Follow identifiers to the value they are bound to.
    ///
    /// Non-identifier expressions resolve to themselves. A name with no
    /// top-level binding is an error.
    pub fn resolve(&self, expr: &'a Expr) -> Result<Resolved<'a>> {
        self.resolve_at(expr, 0)
    }

    pub fn resolve_name(&self, name: &str) -> Result<Resolved<'a>> {
        self.resolve_name_at(name, 0)
    }

    fn resolve_at(&self, expr: &'a Expr, depth: usize) -> Result<Resolved<'a>> {
        match unwrap_expr(expr) {
            Expr::Ident(ident) => self.resolve_name_at(&ident.sym, depth),
            other => Ok(Resolved::Expr(other)),
        }
    }

    fn resolve_name_at(&self, name: &str, depth: usize) -> Result<Resolved<'a>> {
        if depth >= MAX_ALIAS_DEPTH {
            return Ok(Resolved::Opaque);
        }
        match self.symbols.get(name).copied() {
            Some(Symbol::Variable {
                init: Some(init), ..
            }) => self.resolve_at(init, depth + 1),
            Some(Symbol::Variable { init: None, .. }) | Some(Symbol::Import) => {
                Ok(Resolved::Opaque)
            }
            Some(Symbol::Function {
                function,
                ident,
                start,
            }) => Ok(Resolved::Function {
                name: name.to_string(),
                function,
                ident,
                start,
            }),
            None => Err(ExtractError::unresolved(name)),
        }
    }
}
