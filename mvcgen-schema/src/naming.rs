//! Identifier derivation from raw database names.
//!
//! Table names become Java class names, column names become field names.
//! Both go through the same rules: strip an optional table prefix once,
//! optionally fold `snake_case` into camel case, then validate that the
//! result is a legal Java identifier.

use crate::{Result, ScaffoldError};

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

/// Derive a class name from a raw table name.
///
/// With `hump_case` the stripped name is folded to PascalCase; without it
/// only the first letter is upper-cased and the rest is left untouched.
pub fn class_name(raw: &str, strip_prefix: &str, hump_case: bool) -> Result<String> {
    let stem = strip_once(raw, strip_prefix);
    let name = if hump_case {
        to_pascal_case(stem)
    } else {
        upper_first(stem)
    };
    validate(raw, &name)?;
    Ok(escape_java_keyword(name))
}

/// Derive a field name from a raw column name.
pub fn field_name(raw: &str, strip_prefix: &str, hump_case: bool) -> Result<String> {
    let stem = strip_once(raw, strip_prefix);
    let name = if hump_case {
        to_camel_case(stem)
    } else {
        stem.to_string()
    };
    validate(raw, &name)?;
    Ok(escape_java_keyword(name))
}

/// Remove `prefix` from the start of `raw` exactly once.
fn strip_once<'a>(raw: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return raw;
    }
    raw.strip_prefix(prefix).unwrap_or(raw)
}

fn validate(raw: &str, ident: &str) -> Result<()> {
    if ident.is_empty() {
        return Err(ScaffoldError::InvalidIdentifier {
            raw: raw.to_string(),
            reason: "empty after prefix stripping".to_string(),
        });
    }
    if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Err(ScaffoldError::InvalidIdentifier {
            raw: raw.to_string(),
            reason: "starts with a digit".to_string(),
        });
    }
    if let Some(bad) = ident
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '_' && *c != '$')
    {
        return Err(ScaffoldError::InvalidIdentifier {
            raw: raw.to_string(),
            reason: format!("illegal character '{}'", bad),
        });
    }
    Ok(())
}

/// Escape Java reserved words with a trailing underscore.
fn escape_java_keyword(name: String) -> String {
    if JAVA_KEYWORDS.contains(&name.as_str()) {
        format!("{}_", name)
    } else {
        name
    }
}

/// Convert `snake_case` to PascalCase.
///
/// Only the first letter of each underscore-separated part is touched, so
/// reapplying the conversion to its own output is a no-op.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .filter(|part| !part.is_empty())
        .map(upper_first)
        .collect()
}

/// Convert `snake_case` to camelCase.
pub fn to_camel_case(s: &str) -> String {
    lower_first(&to_pascal_case(s))
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}
