//! Top-level declaration walker for v3 script blocks.
//!
//! Collects declarations, imports, export lists and top-level assignments of
//! one script. Only top-level statements are visited; bindings inside
//! functions never become documented entities.

use swc_common::Spanned;
use swc_ecma_ast::{
    AssignOp, AssignTarget, Decl, ExportSpecifier, Expr, ImportSpecifier, ModuleDecl, ModuleItem,
    NamedExport, ObjectPatProp, Pat, SimpleAssignTarget, Stmt,
};
use tracing::trace;

use super::ast::{export_name, unwrap_expr};
use super::candidate::{BindingCandidate, CanonicalId, ParamCandidate};
use crate::core::data::{EntityKind, TypeDescriptor, Visibility};
use crate::core::parsers::{ByteRange, ParsedScript};

/// An imported binding.
#[derive(Debug, Clone)]
pub struct ImportBinding {
    pub local: String,
    /// Name in the source module; `default` or `*` for default and namespace imports.
    pub original: String,
    pub path: String,
    pub ident: ByteRange,
    pub anchors: Vec<usize>,
}

/// One entry of an `export { ... }` list.
#[derive(Debug, Clone)]
pub struct ExportEntry {
    pub local: String,
    pub exported: String,
    /// Module path for `export { x } from './m'`.
    pub source: Option<String>,
    pub ident: ByteRange,
    pub anchors: Vec<usize>,
}

/// A top-level `name = value` statement, optionally behind a `$:` label.
#[derive(Debug, Clone)]
pub struct Assignment<'a> {
    pub target: String,
    pub value: &'a Expr,
    pub reactive: bool,
    pub ident: ByteRange,
    pub anchors: Vec<usize>,
}

/// Everything the walker found in one script.
#[derive(Debug, Default)]
pub struct ScriptFacts<'a> {
    pub declarations: Vec<BindingCandidate<'a>>,
    pub imports: Vec<ImportBinding>,
    pub exports: Vec<ExportEntry>,
    pub assignments: Vec<Assignment<'a>>,
}

pub struct DeclarationWalker<'a> {
    script: &'a ParsedScript,
    scope: usize,
    facts: ScriptFacts<'a>,
}

impl<'a> DeclarationWalker<'a> {
    pub fn new(script: &'a ParsedScript, scope: usize) -> Self {
        Self {
            script,
            scope,
            facts: ScriptFacts::default(),
        }
    }

    pub fn walk(mut self) -> ScriptFacts<'a> {
        let script = self.script;
        for item in &script.module.body {
            let statement_start = script.position(item.span().lo);
            match item {
                ModuleItem::Stmt(Stmt::Decl(decl)) => self.declaration(decl, false, statement_start),
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    self.declaration(&export.decl, true, statement_start)
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(named)) => {
                    self.export_list(named, statement_start)
                }
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    if import.type_only {
                        continue;
                    }
                    let Some(path) = import.src.value.as_str() else {
                        continue;
                    };
                    for specifier in &import.specifiers {
                        self.import(specifier, path, statement_start);
                    }
                }
                ModuleItem::Stmt(Stmt::Expr(stmt)) => {
                    self.assignment(&stmt.expr, false, statement_start)
                }
                ModuleItem::Stmt(Stmt::Labeled(labeled)) if labeled.label.sym.as_str() == "$" => {
                    if let Stmt::Expr(stmt) = &*labeled.body {
                        self.assignment(&stmt.expr, true, statement_start);
                    }
                }
                _ => {}
            }
        }
        trace!(
            declarations = self.facts.declarations.len(),
            imports = self.facts.imports.len(),
            exports = self.facts.exports.len(),
            "walked script"
        );
        self.facts
    }

    fn visibility(exported: bool) -> Visibility {
        if exported {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    fn declaration(&mut self, decl: &'a Decl, exported: bool, statement_start: usize) {
        match decl {
            Decl::Var(var) => {
                let var_start = self.script.position(var.span.lo);
                for declarator in &var.decls {
                    let anchors = [
                        self.script.position(declarator.span.lo),
                        var_start,
                        statement_start,
                    ];
                    self.bind_pattern(&declarator.name, declarator.init.as_deref(), exported, &anchors);
                }
            }
            Decl::Fn(fn_decl) => {
                let name = fn_decl.ident.sym.to_string();
                let ident = self.script.range(fn_decl.ident.span);
                let params = fn_decl
                    .function
                    .params
                    .iter()
                    .flat_map(|p| param_candidates(&p.pat))
                    .collect();
                let mut candidate = BindingCandidate::new(
                    CanonicalId::Local {
                        scope: self.scope,
                        name: name.clone(),
                    },
                    name,
                    EntityKind::Method,
                    Self::visibility(exported),
                    ident,
                )
                .anchored_at(&[self.script.position(fn_decl.span().lo), statement_start])
                .with_type(TypeDescriptor::function());
                candidate.params = params;
                candidate.is_static = self.script.is_module_context();
                self.facts.declarations.push(candidate);
            }
            _ => {}
        }
    }

    /// Register every identifier bound by `pat`.
    ///
    /// `init` only applies to a plain identifier pattern; destructured names
    /// take their own default values, if any.
    fn bind_pattern(&mut self, pat: &'a Pat, init: Option<&'a Expr>, exported: bool, anchors: &[usize]) {
        match pat {
            Pat::Ident(binding) => {
                let name = binding.id.sym.to_string();
                let mut candidate = BindingCandidate::new(
                    CanonicalId::Local {
                        scope: self.scope,
                        name: name.clone(),
                    },
                    name,
                    EntityKind::Data,
                    Self::visibility(exported),
                    self.script.range(binding.id.span),
                )
                .anchored_at(anchors)
                .with_init(init);
                candidate.is_static = self.script.is_module_context();
                self.facts.declarations.push(candidate);
            }
            Pat::Assign(assign) => {
                self.bind_pattern(&assign.left, Some(&*assign.right), exported, anchors)
            }
            Pat::Object(obj) => {
                for prop in &obj.props {
                    match prop {
                        ObjectPatProp::KeyValue(kv) => self.bind_pattern(&kv.value, None, exported, anchors),
                        ObjectPatProp::Assign(assign) => {
                            let name = assign.key.id.sym.to_string();
                            let mut candidate = BindingCandidate::new(
                                CanonicalId::Local {
                                    scope: self.scope,
                                    name: name.clone(),
                                },
                                name,
                                EntityKind::Data,
                                Self::visibility(exported),
                                self.script.range(assign.key.id.span),
                            )
                            .anchored_at(anchors)
                            .with_init(assign.value.as_deref());
                            candidate.is_static = self.script.is_module_context();
                            self.facts.declarations.push(candidate);
                        }
                        ObjectPatProp::Rest(rest) => self.bind_pattern(&rest.arg, None, exported, anchors),
                    }
                }
            }
            Pat::Array(arr) => {
                for elem in arr.elems.iter().flatten() {
                    self.bind_pattern(elem, None, exported, anchors);
                }
            }
            Pat::Rest(rest) => self.bind_pattern(&rest.arg, None, exported, anchors),
            _ => {}
        }
    }

    fn export_list(&mut self, named: &NamedExport, statement_start: usize) {
        if named.type_only {
            return;
        }
        let source = named
            .src
            .as_ref()
            .and_then(|s| s.value.as_str().map(|s| s.to_string()));

        for specifier in &named.specifiers {
            let (local, exported, ident, start) = match specifier {
                ExportSpecifier::Named(spec) => {
                    if spec.is_type_only {
                        continue;
                    }
                    let local = export_name(&spec.orig);
                    let exported = spec
                        .exported
                        .as_ref()
                        .map(export_name)
                        .unwrap_or_else(|| local.clone());
                    (local, exported, spec.orig.span(), spec.span.lo)
                }
                ExportSpecifier::Default(spec) => (
                    "default".to_string(),
                    spec.exported.sym.to_string(),
                    spec.exported.span,
                    spec.exported.span.lo,
                ),
                ExportSpecifier::Namespace(spec) => (
                    "*".to_string(),
                    export_name(&spec.name),
                    spec.name.span(),
                    spec.span.lo,
                ),
            };
            self.facts.exports.push(ExportEntry {
                local,
                exported,
                source: source.clone(),
                ident: self.script.range(ident),
                anchors: vec![self.script.position(start), statement_start],
            });
        }
    }

    fn import(&mut self, specifier: &ImportSpecifier, path: &str, statement_start: usize) {
        let (local, original, span) = match specifier {
            ImportSpecifier::Named(spec) => {
                if spec.is_type_only {
                    return;
                }
                let local = spec.local.sym.to_string();
                let original = spec
                    .imported
                    .as_ref()
                    .map(export_name)
                    .unwrap_or_else(|| local.clone());
                (local, original, spec.local.span)
            }
            ImportSpecifier::Default(spec) => {
                (spec.local.sym.to_string(), "default".to_string(), spec.local.span)
            }
            ImportSpecifier::Namespace(spec) => {
                (spec.local.sym.to_string(), "*".to_string(), spec.local.span)
            }
        };
        self.facts.imports.push(ImportBinding {
            local,
            original,
            path: path.to_string(),
            ident: self.script.range(span),
            anchors: vec![self.script.position(specifier.span().lo), statement_start],
        });
    }

    fn assignment(&mut self, expr: &'a Expr, reactive: bool, statement_start: usize) {
        if let Expr::Assign(assign) = unwrap_expr(expr)
            && assign.op == AssignOp::Assign
            && let AssignTarget::Simple(SimpleAssignTarget::Ident(target)) = &assign.left
        {
            self.facts.assignments.push(Assignment {
                target: target.id.sym.to_string(),
                value: &assign.right,
                reactive,
                ident: self.script.range(target.id.span),
                anchors: vec![statement_start],
            });
        }
    }
}

/// Parameters of a function, one per bound name.
pub fn param_candidates(pat: &Pat) -> Vec<ParamCandidate<'_>> {
    match pat {
        Pat::Ident(binding) => vec![ParamCandidate {
            name: binding.id.sym.to_string(),
            default: None,
            rest: false,
        }],
        Pat::Assign(assign) => param_candidates(&assign.left)
            .into_iter()
            .map(|mut param| {
                param.default = Some(&*assign.right);
                param
            })
            .collect(),
        Pat::Rest(rest) => param_candidates(&rest.arg)
            .into_iter()
            .map(|mut param| {
                param.rest = true;
                param
            })
            .collect(),
        Pat::Object(_) | Pat::Array(_) => super::ast::extract_binding_names(pat)
            .into_iter()
            .map(|name| ParamCandidate {
                name,
                default: None,
                rest: false,
            })
            .collect(),
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use crate::core::extract::walker::*;
    use crate::core::parsers::{ScriptContext, ScriptLang, parse_script_source};

    fn walk(code: &str) -> (ParsedScript, usize) {
        let script = parse_script_source(
            code,
            "test.svelte",
            0,
            ScriptContext::Instance,
            ScriptLang::JavaScript,
        )
        .unwrap();
        (script, 0)
    }

    #[test]
    fn test_collects_declarations() {
        let (script, scope) = walk("export let a = 1;\nlet b;\nfunction go(x, y = 2) {}");
        let facts = DeclarationWalker::new(&script, scope).walk();
        let names: Vec<&str> = facts.declarations.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "go"]);
        assert_eq!(facts.declarations[0].visibility, Visibility::Public);
        assert_eq!(facts.declarations[1].visibility, Visibility::Private);
        assert_eq!(facts.declarations[2].kind, EntityKind::Method);
        assert_eq!(facts.declarations[2].params.len(), 2);
        assert!(facts.declarations[2].params[1].default.is_some());
    }

    #[test]
    fn test_destructuring_binds_each_name() {
        let (script, scope) = walk("let { a, b: { c } } = source;\nlet [d, e = 'x'] = list;");
        let facts = DeclarationWalker::new(&script, scope).walk();
        let names: Vec<&str> = facts.declarations.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "d", "e"]);
        assert!(facts.declarations[0].init.is_none());
        assert!(facts.declarations[3].init.is_some());
    }

    #[test]
    fn test_collects_exports_and_imports() {
        let (script, scope) = walk(
            "import Button, { helper as h } from './lib.js';\nlet inner;\nexport { inner as outer, Button };\nexport { value } from './values.js';",
        );
        let facts = DeclarationWalker::new(&script, scope).walk();
        assert_eq!(facts.imports.len(), 2);
        assert_eq!(facts.imports[0].original, "default");
        assert_eq!(facts.imports[1].local, "h");
        assert_eq!(facts.imports[1].original, "helper");
        assert_eq!(facts.exports.len(), 3);
        assert_eq!(facts.exports[0].local, "inner");
        assert_eq!(facts.exports[0].exported, "outer");
        assert_eq!(facts.exports[2].source.as_deref(), Some("./values.js"));
    }

    #[test]
    fn test_collects_assignments() {
        let (script, scope) = walk("let a;\na = 1;\n$: doubled = a * 2;\nb += 1;");
        let facts = DeclarationWalker::new(&script, scope).walk();
        assert_eq!(facts.assignments.len(), 2);
        assert!(!facts.assignments[0].reactive);
        assert_eq!(facts.assignments[1].target, "doubled");
        assert!(facts.assignments[1].reactive);
    }

    #[test]
    fn test_nested_bindings_are_ignored() {
        let (script, scope) = walk("function outer() { let hidden = 1; }");
        let facts = DeclarationWalker::new(&script, scope).walk();
        assert_eq!(facts.declarations.len(), 1);
    }
}
