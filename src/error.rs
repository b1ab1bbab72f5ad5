//! Error types for schema construction and code generation

use thiserror::Error;

use crate::schema::Target;

/// Result type for schema and codegen operations
pub type Result<T> = std::result::Result<T, IdlError>;

/// Schema and generation errors
///
/// Every variant aborts the current generation run. Nothing is retried: the
/// generator is a pure function of its schema, so the same input fails the
/// same way.
#[derive(Error, Debug)]
pub enum IdlError {
    #[error("Duplicate name in {scope}: {name}")]
    DuplicateName { scope: String, name: String },

    #[error("Unknown type for {target}: {name}{}", suggestion.as_ref().map(|s| format!(" (did you mean {}?)", s)).unwrap_or_default())]
    UnknownType {
        name: String,
        target: Target,
        suggestion: Option<String>,
    },

    #[error("Cyclic type alias: {}", path.join(" -> "))]
    CyclicAlias { path: Vec<String> },

    #[error("Type alias {alias} has no representation for {target}")]
    UnsupportedTarget { alias: String, target: Target },

    #[error("Reserved name in {scope}: {name}")]
    ReservedName { scope: String, name: String },

    #[error("Invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    #[error("Tagged union {name} has no variants")]
    EmptyUnion { name: String },

    #[error("Type {name} is a JSON {elm} for elm but a JSON {rust} for rust")]
    MismatchedRepresentation {
        name: String,
        elm: &'static str,
        rust: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("Unsupported schema document format: {0}")]
    UnsupportedFormat(String),
}

impl IdlError {
    /// Whether this error comes from the schema itself rather than the environment
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            IdlError::DuplicateName { .. }
                | IdlError::UnknownType { .. }
                | IdlError::CyclicAlias { .. }
                | IdlError::UnsupportedTarget { .. }
                | IdlError::ReservedName { .. }
                | IdlError::InvalidIdentifier { .. }
                | IdlError::EmptyUnion { .. }
                | IdlError::MismatchedRepresentation { .. }
        )
    }
}
