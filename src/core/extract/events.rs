//! Events emitted from script code.
//!
//! v3 components emit through a dispatcher returned by
//! `createEventDispatcher()`; v2 components call `this.fire(...)`. The event
//! name is the first call argument, either a string literal or a top-level
//! constant holding one.

use std::collections::{HashMap, HashSet};

use swc_ecma_ast::{
    CallExpr, Callee, Decl, Expr, ExprStmt, ImportSpecifier, Lit, MemberProp, ModuleDecl,
    ModuleItem, Pat, Stmt, VarDeclKind,
};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use super::ast::{export_name, string_literal, unwrap_expr};
use super::candidate::{BindingCandidate, CanonicalId};
use crate::core::data::{EntityKind, Visibility};
use crate::core::parsers::{ByteRange, ParsedScript};

const DISPATCHER_FACTORY: &str = "createEventDispatcher";

/// How a dialect emits events from script code.
#[derive(Debug, Clone)]
pub enum Emitter {
    /// `this.fire('name')`
    ThisFire,
    /// `dispatch('name')` for every local bound to a dispatcher.
    Dispatchers(HashSet<String>),
}

impl Emitter {
    /// Dispatcher locals of a v3 script.
    ///
    /// A dispatcher is a top-level variable initialised by calling
    /// `createEventDispatcher` under any imported alias.
    pub fn dispatchers(script: &ParsedScript) -> Self {
        let mut factories: HashSet<String> = HashSet::new();
        factories.insert(DISPATCHER_FACTORY.to_string());
        for item in &script.module.body {
            if let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item {
                for specifier in &import.specifiers {
                    if let ImportSpecifier::Named(named) = specifier {
                        let imported = named
                            .imported
                            .as_ref()
                            .map(export_name)
                            .unwrap_or_else(|| named.local.sym.to_string());
                        if imported == DISPATCHER_FACTORY {
                            factories.insert(named.local.sym.to_string());
                        }
                    }
                }
            }
        }

        let mut locals = HashSet::new();
        for decl in top_level_decls(script) {
            let Decl::Var(var) = decl else { continue };
            for declarator in &var.decls {
                if let Pat::Ident(binding) = &declarator.name
                    && let Some(init) = &declarator.init
                    && let Expr::Call(call) = unwrap_expr(init)
                    && let Callee::Expr(callee) = &call.callee
                    && let Expr::Ident(ident) = unwrap_expr(callee)
                    && factories.contains(ident.sym.as_str())
                {
                    locals.insert(binding.id.sym.to_string());
                }
            }
        }
        Emitter::Dispatchers(locals)
    }

    fn matches(&self, callee: &Callee) -> bool {
        let Callee::Expr(expr) = callee else {
            return false;
        };
        match (self, unwrap_expr(expr)) {
            (Emitter::Dispatchers(locals), Expr::Ident(ident)) => locals.contains(ident.sym.as_str()),
            (Emitter::ThisFire, Expr::Member(member)) => {
                matches!(&*member.obj, Expr::This(_))
                    && matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == "fire")
            }
            _ => false,
        }
    }
}

/// Top-level `const NAME = 'literal'` bindings.
pub fn string_constants(script: &ParsedScript) -> HashMap<String, String> {
    let mut constants = HashMap::new();
    for decl in top_level_decls(script) {
        let Decl::Var(var) = decl else { continue };
        if var.kind != VarDeclKind::Const {
            continue;
        }
        for declarator in &var.decls {
            if let Pat::Ident(binding) = &declarator.name
                && let Some(value) = declarator.init.as_deref().and_then(string_literal)
            {
                constants.insert(binding.id.sym.to_string(), value);
            }
        }
    }
    constants
}

fn top_level_decls(script: &ParsedScript) -> impl Iterator<Item = &Decl> {
    script.module.body.iter().filter_map(|item| match item {
        ModuleItem::Stmt(Stmt::Decl(decl)) => Some(decl),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => Some(&export.decl),
        _ => None,
    })
}

/// Collects emitted events from a whole script, nested calls included.
pub struct EventCollector<'s> {
    script: &'s ParsedScript,
    emitter: Emitter,
    constants: HashMap<String, String>,
    statement_start: Option<usize>,
    pub events: Vec<BindingCandidate<'s>>,
}

impl<'s> EventCollector<'s> {
    pub fn new(script: &'s ParsedScript, emitter: Emitter) -> Self {
        Self {
            script,
            emitter,
            constants: string_constants(script),
            statement_start: None,
            events: Vec::new(),
        }
    }

    pub fn collect(mut self) -> Vec<BindingCandidate<'s>> {
        let script = self.script;
        script.module.visit_with(&mut self);
        self.events
    }

    /// Event name and the range of the token naming it.
    fn event_name(&self, arg: &Expr) -> Option<(String, ByteRange)> {
        match unwrap_expr(arg) {
            Expr::Lit(Lit::Str(s)) => {
                let name = s.value.as_str()?.to_string();
                let range = self.script.range(s.span);
                Some((name, ByteRange::new(range.start + 1, range.end.saturating_sub(1))))
            }
            Expr::Ident(ident) => {
                let name = self.constants.get(ident.sym.as_str())?.clone();
                Some((name, self.script.range(ident.span)))
            }
            _ => None,
        }
    }
}

impl Visit for EventCollector<'_> {
    fn visit_expr_stmt(&mut self, node: &ExprStmt) {
        let previous = self
            .statement_start
            .replace(self.script.position(node.span.lo));
        node.visit_children_with(self);
        self.statement_start = previous;
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.emitter.matches(&node.callee) {
            let name = node
                .args
                .first()
                .filter(|arg| arg.spread.is_none())
                .and_then(|arg| self.event_name(&arg.expr));
            match name {
                Some((name, ident)) => {
                    let mut anchors = vec![self.script.position(node.span.lo)];
                    anchors.extend(self.statement_start);
                    let candidate = BindingCandidate::new(
                        CanonicalId::Named(name.clone()),
                        name,
                        EntityKind::Event,
                        Visibility::Public,
                        ident,
                    )
                    .anchored_at(&anchors);
                    self.events.push(candidate);
                }
                None => debug!("skipping event with a dynamic name"),
            }
        }
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use crate::core::extract::events::*;
    use crate::core::parsers::{ScriptContext, ScriptLang, parse_script_source};

    fn parse(code: &str) -> ParsedScript {
        parse_script_source(
            code,
            "test.svelte",
            0,
            ScriptContext::Instance,
            ScriptLang::JavaScript,
        )
        .unwrap()
    }

    fn event_names(script: &ParsedScript, emitter: Emitter) -> Vec<String> {
        EventCollector::new(script, emitter)
            .collect()
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn test_dispatch_calls() {
        let script = parse(
            "import { createEventDispatcher } from 'svelte';\nconst dispatch = createEventDispatcher();\nfunction go() { dispatch('save', 1); }",
        );
        let emitter = Emitter::dispatchers(&script);
        assert_eq!(event_names(&script, emitter), vec!["save"]);
    }

    #[test]
    fn test_aliased_dispatcher_factory() {
        let script = parse(
            "import { createEventDispatcher as ced } from 'svelte';\nconst emit = ced();\nemit('close');",
        );
        let emitter = Emitter::dispatchers(&script);
        assert_eq!(event_names(&script, emitter), vec!["close"]);
    }

    #[test]
    fn test_event_name_from_constant() {
        let script = parse(
            "const dispatch = createEventDispatcher();\nconst EVENT = 'changed';\ndispatch(EVENT);\ndispatch(unknown);",
        );
        let emitter = Emitter::dispatchers(&script);
        assert_eq!(event_names(&script, emitter), vec!["changed"]);
    }

    #[test]
    fn test_this_fire_calls() {
        let script = parse(
            "export default { methods: { go() { this.fire('go'); other.fire('no'); } } };",
        );
        assert_eq!(event_names(&script, Emitter::ThisFire), vec!["go"]);
    }

    #[test]
    fn test_event_range_excludes_quotes() {
        let code = "const dispatch = createEventDispatcher();\ndispatch('save');";
        let script = parse(code);
        let events = EventCollector::new(&script, Emitter::dispatchers(&script)).collect();
        let range = events[0].ident;
        assert_eq!(&code[range.start..range.end], "save");
    }
}
