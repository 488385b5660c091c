//! Static type descriptors attached to every documented entity.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Type,
    Union,
    Const,
}

/// Either a canonical type name or, for unions, the member descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeValue {
    Name(String),
    Union(Vec<TypeDescriptor>),
}

/// Type information inferred from syntax.
///
/// Unknown is always represented as `any`, never as absence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    #[serde(rename = "type")]
    pub ty: TypeValue,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TypeDescriptor {
    /// A plain named type whose text equals its name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: TypeKind::Type,
            text: name.clone(),
            ty: TypeValue::Name(name),
            value: None,
        }
    }

    pub fn any() -> Self {
        Self::named("any")
    }

    pub fn function() -> Self {
        Self::named("function")
    }

    /// A string literal constant, rendered as a JSON string literal.
    pub fn string_const(value: impl Into<String>) -> Self {
        let value = value.into();
        let text = serde_json::to_string(&value).unwrap_or_else(|_| format!("\"{}\"", value));
        Self {
            kind: TypeKind::Const,
            ty: TypeValue::Name("string".to_string()),
            text,
            value: Some(value),
        }
    }

    /// A union of member descriptors; `text` is the members' texts joined by `|`.
    pub fn union(members: Vec<TypeDescriptor>) -> Self {
        let text = members
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("|");
        Self {
            kind: TypeKind::Union,
            ty: TypeValue::Union(members),
            text,
            value: None,
        }
    }

    pub fn is_any(&self) -> bool {
        self.kind == TypeKind::Type && self.text == "any"
    }

    /// Parse the braces payload of a `@type {T}` tag.
    ///
    /// `{string}` → named type, `{'a'|'b'}` → union of string constants,
    /// `{Array<string>}` → compound name. Returns `None` for an empty payload.
    pub fn from_type_tag(payload: &str) -> Option<Self> {
        let inner = payload.trim();
        let inner = inner
            .strip_prefix('{')
            .and_then(|rest| rest.split_once('}'))
            .map(|(ty, _)| ty)
            .unwrap_or(inner)
            .trim();
        if inner.is_empty() {
            return None;
        }

        let parts: Vec<&str> = inner.split('|').map(str::trim).collect();
        let member = |part: &str| {
            let unquoted = part
                .strip_prefix('"')
                .and_then(|p| p.strip_suffix('"'))
                .or_else(|| part.strip_prefix('\'').and_then(|p| p.strip_suffix('\'')));
            match unquoted {
                Some(value) => Self::string_const(value),
                None => Self::named(part),
            }
        };

        if parts.len() == 1 {
            Some(member(parts[0]))
        } else {
            Some(Self::union(parts.into_iter().map(member).collect()))
        }
    }
}
