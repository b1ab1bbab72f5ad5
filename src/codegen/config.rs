//! Codegen Configuration
//!
//! One [`RenderProfile`] per target. The schema model and type resolution are
//! config-free; only rendering reads a profile. The wire contract (the
//! `"type"` discriminant and snake_case field keys) is fixed and not
//! configurable, since both sides must agree on it.

use serde::{Deserialize, Serialize};

use crate::schema::Target;

/// Rendering configuration for both targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Client module settings
    pub elm: RenderProfile,

    /// Server module settings
    pub rust: RenderProfile,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            elm: RenderProfile::elm(),
            rust: RenderProfile::rust(),
        }
    }
}

impl CodegenConfig {
    /// Profile for `target`
    pub fn profile(&self, target: Target) -> &RenderProfile {
        match target {
            Target::Elm => &self.elm,
            Target::Rust => &self.rust,
        }
    }
}

/// Language-specific rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderProfile {
    /// Target language
    pub target: Target,

    /// Module name (Elm `module` line; informational for Rust)
    pub module_name: String,

    /// Text attached to identifiers that collide with a keyword
    /// (prefix for Rust raw identifiers, suffix for Elm)
    pub keyword_escape: String,

    /// Derives added to every generated Rust type, after the built-in ones
    #[serde(default)]
    pub extra_derives: Vec<String>,
}

// =============================================================================
// Default Profiles
// =============================================================================

impl RenderProfile {
    /// Default Elm client profile
    pub fn elm() -> Self {
        Self {
            target: Target::Elm,
            module_name: "Commands".to_string(),
            keyword_escape: "_".to_string(),
            extra_derives: Vec::new(),
        }
    }

    /// Default Rust server profile
    pub fn rust() -> Self {
        Self {
            target: Target::Rust,
            module_name: "commands".to_string(),
            keyword_escape: "r#".to_string(),
            extra_derives: Vec::new(),
        }
    }

    /// Escape a keyword if needed
    pub fn escape_keyword(&self, name: &str) -> String {
        let keywords = match self.target {
            Target::Elm => ELM_KEYWORDS,
            Target::Rust => RUST_KEYWORDS,
        };

        if !keywords.contains(&name) {
            return name.to_string();
        }
        match self.target {
            Target::Elm => format!("{}{}", name, self.keyword_escape),
            Target::Rust => format!("{}{}", self.keyword_escape, name),
        }
    }
}

// =============================================================================
// Keywords
// =============================================================================

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "static", "struct", "trait",
    "true", "type", "unsafe", "use", "where", "while", "async", "await",
    "dyn", "abstract", "become", "box", "do", "final", "macro", "override",
    "priv", "typeof", "unsized", "virtual", "yield", "try",
];

const ELM_KEYWORDS: &[&str] = &[
    "if", "then", "else", "case", "of", "let", "in", "type", "module",
    "where", "import", "exposing", "as", "port", "alias", "infix", "effect",
];
