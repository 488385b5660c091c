//! Helper functions for AST node inspection.
//!
//! Pure functions with no state, shared by both dialect walkers.

use swc_ecma_ast::{
    ArrowExpr, BlockStmtOrExpr, Expr, Function, Lit, ModuleExportName, ObjectPatProp, Pat, Prop,
    PropName,
};

/// Unwrap parentheses and TypeScript-only wrappers to get the inner expression.
pub fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_expr(&ts_sat.expr),
        Expr::TsNonNull(ts_non_null) => unwrap_expr(&ts_non_null.expr),
        _ => expr,
    }
}

/// Value of a string literal or an expression-free template literal.
pub fn string_literal(expr: &Expr) -> Option<String> {
    match unwrap_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(|s| s.to_string())),
        _ => None,
    }
}

/// Extract property name from a PropName node.
pub fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

/// Name of an object literal member, for the member shapes that have one.
pub fn member_name(prop: &Prop) -> Option<String> {
    match prop {
        Prop::KeyValue(kv) => prop_name(&kv.key),
        Prop::Method(method) => prop_name(&method.key),
        Prop::Getter(getter) => prop_name(&getter.key),
        Prop::Shorthand(ident) => Some(ident.sym.to_string()),
        _ => None,
    }
}

pub fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

/// A function or arrow expression, seen through a common interface.
#[derive(Debug, Clone, Copy)]
pub enum FunctionLike<'a> {
    Function(&'a Function),
    Arrow(&'a ArrowExpr),
}

impl<'a> FunctionLike<'a> {
    /// Interpret an expression as a function, if it is one.
    pub fn from_expr(expr: &'a Expr) -> Option<Self> {
        match unwrap_expr(expr) {
            Expr::Fn(fn_expr) => Some(FunctionLike::Function(&fn_expr.function)),
            Expr::Arrow(arrow) => Some(FunctionLike::Arrow(arrow)),
            _ => None,
        }
    }

    pub fn params(&self) -> Vec<&'a Pat> {
        match self {
            FunctionLike::Function(function) => function.params.iter().map(|p| &p.pat).collect(),
            FunctionLike::Arrow(arrow) => arrow.params.iter().collect(),
        }
    }

    /// The body expression of an expression-bodied arrow.
    pub fn expression_body(&self) -> Option<&'a Expr> {
        match self {
            FunctionLike::Arrow(arrow) => match &*arrow.body {
                BlockStmtOrExpr::Expr(expr) => Some(expr),
                BlockStmtOrExpr::BlockStmt(_) => None,
            },
            FunctionLike::Function(_) => None,
        }
    }

    /// The argument of the first top-level `return` in the body, or the
    /// expression body of an arrow.
    pub fn returned_expr(&self) -> Option<&'a Expr> {
        let block = match self {
            FunctionLike::Function(function) => function.body.as_ref()?,
            FunctionLike::Arrow(arrow) => match &*arrow.body {
                BlockStmtOrExpr::Expr(expr) => return Some(expr),
                BlockStmtOrExpr::BlockStmt(block) => block,
            },
        };
        block.stmts.iter().find_map(|stmt| match stmt {
            swc_ecma_ast::Stmt::Return(ret) => ret.arg.as_deref(),
            _ => None,
        })
    }
}

/// Extract all identifier names from a pattern (handles destructuring).
/// Supports: simple ident, object destructuring, array destructuring,
/// default values, rest patterns, and renamed destructuring.
pub fn extract_binding_names(pat: &Pat) -> Vec<String> {
    match pat {
        Pat::Ident(ident) => vec![ident.id.sym.to_string()],
        Pat::Object(obj) => obj
            .props
            .iter()
            .flat_map(|prop| match prop {
                ObjectPatProp::KeyValue(kv) => extract_binding_names(&kv.value),
                ObjectPatProp::Assign(assign) => vec![assign.key.id.sym.to_string()],
                ObjectPatProp::Rest(rest) => extract_binding_names(&rest.arg),
            })
            .collect(),
        Pat::Array(arr) => arr
            .elems
            .iter()
            .flatten()
            .flat_map(extract_binding_names)
            .collect(),
        Pat::Assign(assign) => extract_binding_names(&assign.left),
        Pat::Rest(rest) => extract_binding_names(&rest.arg),
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use crate::core::extract::ast::*;
    use crate::core::parsers::{ScriptContext, ScriptLang, parse_script_source};
    use swc_ecma_ast::{Decl, ModuleItem, Stmt};

    fn first_declarator_names(code: &str) -> Vec<String> {
        let script = parse_script_source(
            code,
            "test.svelte",
            0,
            ScriptContext::Instance,
            ScriptLang::JavaScript,
        )
        .unwrap();
        match &script.module.body[0] {
            ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => {
                extract_binding_names(&var.decls[0].name)
            }
            _ => panic!("expected a variable declaration"),
        }
    }

    #[test]
    fn test_binding_names_object_pattern() {
        assert_eq!(
            first_declarator_names("let { a, b: c, d = 1, ...rest } = obj;"),
            vec!["a", "c", "d", "rest"]
        );
    }

    #[test]
    fn test_binding_names_array_pattern() {
        assert_eq!(
            first_declarator_names("let [x, , [y], z = 2] = arr;"),
            vec!["x", "y", "z"]
        );
    }
}
