//! Type inference from initializer syntax.
//!
//! Rules, first match wins:
//! 1. no initializer → `any`
//! 2. string / number / boolean literal → the primitive name
//! 3. conditional cascade whose branches are all string literals → union of
//!    string constants
//! 4. array / object / function literal → `array` / `object` / `function`
//! 5. anything else → `any`
//!
//! A cascade found on a later top-level reassignment overrides the
//! initializer.

use std::collections::HashSet;

use swc_ecma_ast::{BinaryOp, Expr, Lit, UnaryOp};

use super::ast::{string_literal, unwrap_expr};
use crate::core::data::TypeDescriptor;

/// Infer the type of a binding from its initializer and reassignment.
pub fn infer_binding(init: Option<&Expr>, reassigned: Option<&Expr>) -> TypeDescriptor {
    if let Some(union) = reassigned.and_then(string_union) {
        return union;
    }
    infer_type(init)
}

pub fn infer_type(init: Option<&Expr>) -> TypeDescriptor {
    let Some(expr) = init else {
        return TypeDescriptor::any();
    };

    match unwrap_expr(expr) {
        Expr::Lit(Lit::Str(_)) | Expr::Tpl(_) => TypeDescriptor::named("string"),
        Expr::Lit(Lit::Num(_)) => TypeDescriptor::named("number"),
        Expr::Lit(Lit::Bool(_)) => TypeDescriptor::named("boolean"),
        Expr::Unary(unary)
            if matches!(unary.op, UnaryOp::Minus | UnaryOp::Plus)
                && matches!(unwrap_expr(&unary.arg), Expr::Lit(Lit::Num(_))) =>
        {
            TypeDescriptor::named("number")
        }
        cond @ Expr::Cond(_) => string_union(cond).unwrap_or_else(TypeDescriptor::any),
        Expr::Array(_) => TypeDescriptor::named("array"),
        Expr::Object(_) => TypeDescriptor::named("object"),
        Expr::Fn(_) | Expr::Arrow(_) => TypeDescriptor::function(),
        _ => TypeDescriptor::any(),
    }
}

/// Recognize `a === "x" ? "x" : a === "y" ? "y" : "z"`.
///
/// Every test must be a strict equality against a string literal and every
/// branch a string literal. Members keep source order, duplicates dropped.
pub fn string_union(expr: &Expr) -> Option<TypeDescriptor> {
    let mut current = unwrap_expr(expr);
    if !matches!(current, Expr::Cond(_)) {
        return None;
    }

    let mut values = Vec::new();
    while let Expr::Cond(cond) = current {
        if !is_literal_comparison(&cond.test) {
            return None;
        }
        values.push(string_literal(&cond.cons)?);
        current = unwrap_expr(&cond.alt);
    }
    values.push(string_literal(current)?);

    let mut seen = HashSet::new();
    values.retain(|v| seen.insert(v.clone()));

    Some(TypeDescriptor::union(
        values.into_iter().map(TypeDescriptor::string_const).collect(),
    ))
}

fn is_literal_comparison(test: &Expr) -> bool {
    match unwrap_expr(test) {
        Expr::Bin(bin) if bin.op == BinaryOp::EqEqEq => {
            string_literal(&bin.left).is_some() || string_literal(&bin.right).is_some()
        }
        _ => false,
    }
}
