use serde::Serialize;

use super::Visibility;

/// A structured `@tag text` line from a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub name: String,
    pub description: String,
}

/// Parsed documentation comment: free text plus ordered tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub description: Option<String>,
    pub keywords: Vec<Keyword>,
}

impl Comment {
    /// Parse comment text with its delimiters already removed.
    ///
    /// Leading `*` decorations are stripped from each line. Lines starting with
    /// `@` become keywords; all other non-empty lines form the description.
    pub fn parse(text: &str) -> Self {
        let mut description_lines = Vec::new();
        let mut keywords = Vec::new();

        for raw in text.lines() {
            let line = raw.trim();
            let line = line.trim_start_matches('*').trim();

            if let Some(tag) = line.strip_prefix('@') {
                let (name, rest) = match tag.split_once(char::is_whitespace) {
                    Some((name, rest)) => (name, rest.trim()),
                    None => (tag, ""),
                };
                if !name.is_empty() {
                    keywords.push(Keyword {
                        name: name.to_string(),
                        description: rest.to_string(),
                    });
                }
            } else if !line.is_empty() {
                description_lines.push(line);
            }
        }

        let description = description_lines.join("\n");
        Self {
            description: (!description.is_empty()).then_some(description),
            keywords,
        }
    }

    /// First keyword named `name`.
    pub fn keyword(&self, name: &str) -> Option<&Keyword> {
        self.keywords.iter().find(|k| k.name == name)
    }

    /// Visibility requested by a `@public`, `@protected` or `@private` tag.
    pub fn visibility(&self) -> Option<Visibility> {
        self.keywords
            .iter()
            .find_map(|k| Visibility::from_keyword(&k.name))
    }

    /// Description of a `@param {type} name text` tag for `param`.
    pub fn param_description(&self, param: &str) -> Option<String> {
        self.keywords
            .iter()
            .filter(|k| k.name == "param")
            .find_map(|k| {
                let rest = k.description.trim();
                let rest = match rest.strip_prefix('{') {
                    Some(typed) => typed.split_once('}').map(|(_, r)| r.trim())?,
                    None => rest,
                };
                let (name, text) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                let name = name.trim_start_matches('[').trim_end_matches(']');
                let name = name.split('=').next().unwrap_or(name);
                let text = text.trim().trim_start_matches('-').trim();
                (name == param && !text.is_empty()).then(|| text.to_string())
            })
    }
}
