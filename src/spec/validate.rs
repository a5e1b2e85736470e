use crate::error::{GenerateError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::types::FormItemSpec;

static ROUTE_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.:\-]+$").expect("valid route segment regex"));

static COMPONENT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").expect("valid component name regex"));

static API_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("valid api key regex")
});

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Turn a field name into a valid identifier for the generated source
///
/// Invalid characters become `_`, a leading digit gets a `_` prefix and
/// reserved words get a `_` suffix.
pub fn sanitize_identifier(name: &str) -> String {
    let mut s: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.is_empty() {
        s = "_".to_string();
    }
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        s.insert(0, '_');
    }
    if RESERVED_WORDS.contains(&s.as_str()) {
        s.push('_');
    }
    s
}

/// Sanitized identifiers for `fields`, in order; fails on the first collision
pub fn field_identifiers(fields: &[FormItemSpec]) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let ident = sanitize_identifier(&field.name);
        if !seen.insert(ident.clone()) {
            return Err(GenerateError::DuplicateFieldName { name: ident });
        }
        out.push(ident);
    }
    Ok(out)
}

/// Normalize and check a route path such as `/orders/new`
///
/// Surrounding whitespace and a trailing slash are dropped; a missing leading
/// slash is added. The pages root itself (`/`) is not a valid target.
pub fn normalize_route_path(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(GenerateError::InvalidTarget {
            reason: format!("'{}' does not name a page below the pages root", raw),
        });
    }
    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };
    for segment in path[1..].split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(GenerateError::InvalidTarget {
                reason: format!("route path '{}' contains an empty or relative segment", raw),
            });
        }
        if !ROUTE_SEGMENT.is_match(segment) {
            return Err(GenerateError::InvalidTarget {
                reason: format!(
                    "route path segment '{}' may only contain letters, digits, '_', '-', '.' and ':'",
                    segment
                ),
            });
        }
    }
    Ok(path)
}

/// Check a nested component directory name
pub fn validate_component_name(name: &str) -> Result<String> {
    let name = name.trim();
    if COMPONENT_NAME.is_match(name) {
        Ok(name.to_string())
    } else {
        Err(GenerateError::InvalidTarget {
            reason: format!("component name '{}' is not a valid directory identifier", name),
        })
    }
}

/// Check that an api key is a dotted identifier path
pub fn validate_api_key(key: &str) -> Result<()> {
    if API_KEY.is_match(key) {
        Ok(())
    } else {
        Err(GenerateError::InvalidApiKey {
            key: key.to_string(),
        })
    }
}
