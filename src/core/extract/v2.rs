//! Svelte 2 components: the default-exported definition object is the
//! component API.
//!
//! ```js
//! export default {
//!     data() { return { name: 'world' }; },
//!     computed: { greeting: ({ name }) => `Hello ${name}` },
//!     methods: { greet() { this.fire('greet'); } },
//! };
//! ```

use swc_common::Spanned;
use swc_ecma_ast::{Expr, ModuleDecl, ModuleItem, ObjectLit, ObjectPatProp, Pat, Prop, PropOrSpread};
use tracing::debug;

use super::ast::{FunctionLike, member_name, prop_name, unwrap_expr};
use super::candidate::{BindingCandidate, CanonicalId};
use super::comments::CommentBinder;
use super::dialect::DialectStrategy;
use super::events::{Emitter, EventCollector};
use super::markup::collect_fired_events;
use super::resolver::{Resolved, TopLevelSymbols};
use super::walker::param_candidates;
use crate::core::data::{EntityKind, TypeDescriptor, Visibility};
use crate::core::parsers::{ByteRange, ParsedComponent, ParsedScript};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct V2Strategy;

/// A top-level function declaration referenced from the definition object.
#[derive(Debug, Clone)]
struct FunctionRef {
    name: String,
    ident: ByteRange,
    start: usize,
}

/// What a member of the definition object evaluates to.
enum MemberValue<'a> {
    Function(FunctionLike<'a>, Option<FunctionRef>),
    Object(&'a ObjectLit),
    Other,
}

/// The default-exported definition object of one script.
struct ComponentDefinition<'a> {
    script: &'a ParsedScript,
    scope: usize,
    symbols: TopLevelSymbols<'a>,
    object: &'a ObjectLit,
    export_start: usize,
}

impl<'a> ComponentDefinition<'a> {
    fn find(script: &'a ParsedScript, scope: usize) -> Result<Option<Self>> {
        let symbols = TopLevelSymbols::collect(script);
        for item in &script.module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) = item else {
                continue;
            };
            return match symbols.resolve(&export.expr)? {
                Resolved::Expr(Expr::Object(object)) => Ok(Some(Self {
                    script,
                    scope,
                    symbols,
                    object,
                    export_start: script.position(export.span.lo),
                })),
                _ => {
                    debug!("default export is not an object literal");
                    Ok(None)
                }
            };
        }
        Ok(None)
    }

    fn props(object: &'a ObjectLit) -> impl Iterator<Item = &'a Prop> {
        object.props.iter().filter_map(|prop| match prop {
            PropOrSpread::Prop(prop) => Some(&**prop),
            PropOrSpread::Spread(_) => None,
        })
    }

    fn member(&self, name: &str) -> Option<&'a Prop> {
        Self::props(self.object).find(|prop| member_name(prop).as_deref() == Some(name))
    }

    fn key_range(&self, prop: &Prop) -> ByteRange {
        let span = match prop {
            Prop::KeyValue(kv) => kv.key.span(),
            Prop::Method(method) => method.key.span(),
            Prop::Getter(getter) => getter.key.span(),
            Prop::Shorthand(ident) => ident.span,
            other => other.span(),
        };
        self.script.range(span)
    }

    fn member_value(&self, prop: &'a Prop) -> Result<MemberValue<'a>> {
        let resolved = match prop {
            Prop::Method(method) => {
                return Ok(MemberValue::Function(
                    FunctionLike::Function(&method.function),
                    None,
                ));
            }
            Prop::KeyValue(kv) => self.symbols.resolve(&kv.value)?,
            Prop::Shorthand(ident) => self.symbols.resolve_name(&ident.sym)?,
            _ => return Ok(MemberValue::Other),
        };
        Ok(match resolved {
            Resolved::Expr(expr) => match (FunctionLike::from_expr(expr), expr) {
                (Some(function), _) => MemberValue::Function(function, None),
                (None, Expr::Object(object)) => MemberValue::Object(object),
                _ => MemberValue::Other,
            },
            Resolved::Function {
                name,
                function,
                ident,
                start,
            } => MemberValue::Function(
                FunctionLike::Function(function),
                Some(FunctionRef { name, ident, start }),
            ),
            Resolved::Opaque => MemberValue::Other,
        })
    }

    /// The object a `data` member produces.
    fn data_object(&self) -> Result<Option<&'a ObjectLit>> {
        let Some(prop) = self.member("data") else {
            return Ok(None);
        };
        Ok(match self.member_value(prop)? {
            MemberValue::Object(object) => Some(object),
            MemberValue::Function(function, _) => {
                function.returned_expr().and_then(|ret| match unwrap_expr(ret) {
                    Expr::Object(object) => Some(object),
                    Expr::Ident(_) => match self.symbols.resolve(ret) {
                        Ok(Resolved::Expr(Expr::Object(object))) => Some(object),
                        _ => None,
                    },
                    _ => None,
                })
            }
            MemberValue::Other => None,
        })
    }

    fn section_object(&self, name: &str) -> Result<Option<&'a ObjectLit>> {
        let Some(prop) = self.member(name) else {
            return Ok(None);
        };
        Ok(match self.member_value(prop)? {
            MemberValue::Object(object) => Some(object),
            _ => None,
        })
    }

    fn candidate(&self, prop: &'a Prop, name: String, kind: EntityKind) -> BindingCandidate<'a> {
        BindingCandidate::new(
            CanonicalId::Member(name.clone()),
            name,
            kind,
            Visibility::Public,
            self.key_range(prop),
        )
        .anchored_at(&[self.script.position(prop.span().lo)])
        .trailing_at(self.script.position(prop.span().hi))
    }

    fn data(&self) -> Result<Vec<BindingCandidate<'a>>> {
        let Some(object) = self.data_object()? else {
            return Ok(Vec::new());
        };
        let mut candidates = Vec::new();
        for prop in Self::props(object) {
            let Some(name) = member_name(prop) else { continue };
            let candidate = self.candidate(prop, name, EntityKind::Data);
            let candidate = match prop {
                Prop::KeyValue(kv) => candidate.with_init(Some(&*kv.value)),
                Prop::Method(_) => candidate.with_type(TypeDescriptor::function()),
                Prop::Shorthand(ident) => {
                    let init = match self.symbols.resolve_name(&ident.sym) {
                        Ok(Resolved::Expr(expr)) => Some(expr),
                        _ => None,
                    };
                    candidate.with_init(init)
                }
                _ => candidate,
            };
            candidates.push(candidate);
        }
        Ok(candidates)
    }

    fn computed(&self) -> Result<Vec<BindingCandidate<'a>>> {
        let Some(object) = self.section_object("computed")? else {
            return Ok(Vec::new());
        };
        let mut candidates = Vec::new();
        for prop in Self::props(object) {
            let Some(name) = member_name(prop) else { continue };
            let MemberValue::Function(function, _) = self.member_value(prop)? else {
                debug!(%name, "computed member is not a function");
                continue;
            };
            let mut candidate = self
                .candidate(prop, name, EntityKind::Computed)
                .with_init(function.expression_body());
            candidate.dependencies = computed_dependencies(&function);
            candidates.push(candidate);
        }
        Ok(candidates)
    }

    fn methods(&self) -> Result<Vec<BindingCandidate<'a>>> {
        let Some(object) = self.section_object("methods")? else {
            return Ok(Vec::new());
        };
        let mut candidates = Vec::new();
        for prop in Self::props(object) {
            let Some(name) = member_name(prop) else { continue };
            let MemberValue::Function(function, reference) = self.member_value(prop)? else {
                debug!(%name, "method member is not a function");
                continue;
            };
            let params = function
                .params()
                .into_iter()
                .flat_map(param_candidates)
                .collect();

            match reference {
                Some(reference) => {
                    let id = CanonicalId::Local {
                        scope: self.scope,
                        name: reference.name.clone(),
                    };
                    let mut declaration = BindingCandidate::new(
                        id.clone(),
                        reference.name,
                        EntityKind::Method,
                        Visibility::Public,
                        reference.ident,
                    )
                    .anchored_at(&[reference.start])
                    .with_type(TypeDescriptor::function());
                    declaration.params = params;
                    candidates.push(declaration);

                    let mut usage = self.candidate(prop, name, EntityKind::Method).usage();
                    usage.id = id;
                    candidates.push(usage);
                }
                None => {
                    let mut candidate = self
                        .candidate(prop, name, EntityKind::Method)
                        .with_type(TypeDescriptor::function());
                    candidate.params = params;
                    candidates.push(candidate);
                }
            }
        }
        Ok(candidates)
    }
}

/// Names a computed value reads: the destructured keys of its first
/// parameter, or its plain parameter names.
fn computed_dependencies(function: &FunctionLike<'_>) -> Vec<String> {
    let params = function.params();
    if let Some(Pat::Object(pattern)) = params.first() {
        return pattern
            .props
            .iter()
            .filter_map(|prop| match prop {
                ObjectPatProp::KeyValue(kv) => prop_name(&kv.key),
                ObjectPatProp::Assign(assign) => Some(assign.key.id.sym.to_string()),
                ObjectPatProp::Rest(_) => None,
            })
            .collect();
    }
    params
        .into_iter()
        .filter_map(|pat| match pat {
            Pat::Ident(binding) => Some(binding.id.sym.to_string()),
            Pat::Assign(assign) => match &*assign.left {
                Pat::Ident(binding) => Some(binding.id.sym.to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

impl V2Strategy {
    /// Whether any script default-exports a definition object.
    pub fn has_definition(component: &ParsedComponent) -> bool {
        component
            .scripts
            .iter()
            .enumerate()
            .any(|(scope, script)| matches!(ComponentDefinition::find(script, scope), Ok(Some(_))))
    }

    fn definitions(component: &ParsedComponent) -> Result<Vec<ComponentDefinition<'_>>> {
        let mut definitions = Vec::new();
        for (scope, script) in component.scripts.iter().enumerate() {
            if let Some(definition) = ComponentDefinition::find(script, scope)? {
                definitions.push(definition);
            }
        }
        Ok(definitions)
    }
}

impl DialectStrategy for V2Strategy {
    fn version(&self) -> u8 {
        2
    }

    fn comment_gap_lines(&self) -> usize {
        0
    }

    fn keyword_type_override(&self, kind: EntityKind) -> bool {
        kind == EntityKind::Data
    }

    fn extract_description(
        &self,
        component: &ParsedComponent,
        binder: &mut CommentBinder<'_>,
    ) -> Option<String> {
        let definitions = Self::definitions(component).ok()?;
        let definition = definitions.first()?;
        binder
            .bind(&[definition.export_start])
            .and_then(|comment| comment.description)
    }

    fn extract_data<'a>(&self, component: &'a ParsedComponent) -> Result<Vec<BindingCandidate<'a>>> {
        let mut candidates = Vec::new();
        for definition in Self::definitions(component)? {
            candidates.extend(definition.data()?);
        }
        Ok(candidates)
    }

    fn extract_computed<'a>(
        &self,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>> {
        let mut candidates = Vec::new();
        for definition in Self::definitions(component)? {
            candidates.extend(definition.computed()?);
        }
        Ok(candidates)
    }

    fn extract_methods<'a>(
        &self,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>> {
        let mut candidates = Vec::new();
        for definition in Self::definitions(component)? {
            candidates.extend(definition.methods()?);
        }
        Ok(candidates)
    }

    fn extract_events<'a>(
        &self,
        component: &'a ParsedComponent,
    ) -> Result<Vec<BindingCandidate<'a>>> {
        let mut events: Vec<BindingCandidate<'a>> = component
            .scripts
            .iter()
            .flat_map(|script| EventCollector::new(script, Emitter::ThisFire).collect())
            .collect();
        events.extend(collect_fired_events(component));
        Ok(events)
    }
}
