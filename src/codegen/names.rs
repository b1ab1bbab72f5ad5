//! Naming Conventions
//!
//! Schema identifiers use PascalCase for type-level names (aliases, unions,
//! variants) and camelCase for fields. The wire spelling of a field is its
//! snake_case form, and both emitters must derive it with [`to_wire_name`] so
//! client and server agree on every JSON key.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{IdlError, Result};

/// Lowercase letter immediately followed by an uppercase letter
fn word_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"([a-z])([A-Z])").expect("valid word boundary regex"))
}

/// Convert a schema identifier to its wire spelling.
///
/// An underscore goes before every uppercase letter that directly follows a
/// lowercase letter, then the whole identifier is lowercased.
///
/// ```
/// use wire_idl::codegen::names::to_wire_name;
///
/// assert_eq!(to_wire_name("suspectId"), "suspect_id");
/// assert_eq!(to_wire_name("suspect_id"), "suspect_id");
/// ```
pub fn to_wire_name(identifier: &str) -> String {
    word_boundary()
        .replace_all(identifier, "${1}_${2}")
        .to_lowercase()
}

/// Lowercase the first character (`ServerCommand` -> `serverCommand`)
pub fn type_to_var(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Expected leading case of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentCase {
    /// Type-level names: aliases, unions, variants
    Upper,
    /// Field names
    Lower,
}

/// Check that `name` is usable as an identifier in both targets.
///
/// Identifiers are ASCII letters, digits and underscores, starting with a
/// letter of the expected case.
pub fn check_identifier(name: &str, case: IdentCase) -> Result<()> {
    let invalid = |reason: &str| IdlError::InvalidIdentifier {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let first = name.chars().next().ok_or_else(|| invalid("identifier is empty"))?;

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("only ASCII letters, digits and underscores are allowed"));
    }

    match case {
        IdentCase::Upper if !first.is_ascii_uppercase() => {
            Err(invalid("type names must start with an uppercase letter"))
        }
        IdentCase::Lower if !first.is_ascii_lowercase() => {
            Err(invalid("field names must start with a lowercase letter"))
        }
        _ => Ok(()),
    }
}

/// Rust path keywords; these cannot be written as raw identifiers either
const RUST_PATH_KEYWORDS: &[&str] = &["self", "super", "crate", "Self"];

/// Types the generated modules import (`serde` derives, Elm's `Decoder`)
const IMPORTED_TYPES: &[&str] = &["Serialize", "Deserialize", "Decoder"];

/// Whether a type-level name (alias, union, variant) is unusable in a
/// generated module
pub fn is_reserved_type_name(name: &str) -> bool {
    RUST_PATH_KEYWORDS.contains(&name) || IMPORTED_TYPES.contains(&name)
}

/// Whether `name` is a Rust path keyword, unusable as a field or variant name
pub fn is_rust_path_keyword(name: &str) -> bool {
    RUST_PATH_KEYWORDS.contains(&name)
}
