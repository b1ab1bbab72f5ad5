//! Code Generation
//!
//! Renders a [`Schema`] into two modules that agree on the JSON wire format:
//! an Elm client module and a Rust server module.
//!
//! Architecture:
//! - `resolve::validate` runs first and resolves every type for every target
//! - Emitters: one per target, each a single pass over the declarations
//! - `names`: the shared wire-naming rule both emitters depend on
//!
//! The key constraint: nothing is returned unless both targets rendered, so
//! an invalid schema never produces partial output.

pub mod config;
pub mod elm;
pub mod names;
pub mod rust;

pub use config::{CodegenConfig, RenderProfile};

use tracing::info;

use crate::error::Result;
use crate::resolve;
use crate::schema::{Schema, Target};

// =============================================================================
// Generated Output
// =============================================================================

/// Source text rendered for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Target language
    pub target: Target,
    /// Generated code
    pub code: String,
    /// Number of declarations rendered
    pub declaration_count: usize,
}

/// Both rendered modules of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModules {
    /// Elm client module
    pub client: GeneratedModule,
    /// Rust server module
    pub server: GeneratedModule,
}

impl GeneratedModules {
    /// Module for `target`
    pub fn get(&self, target: Target) -> &GeneratedModule {
        match target {
            Target::Elm => &self.client,
            Target::Rust => &self.server,
        }
    }

    /// Both modules, client first
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedModule> {
        [&self.client, &self.server].into_iter()
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Render one target's module.
///
/// The schema should have passed [`resolve::validate`]; a resolution failure
/// here still aborts the render with the originating error.
pub fn render(schema: &Schema, profile: &RenderProfile) -> Result<GeneratedModule> {
    let code = match profile.target {
        Target::Elm => elm::emit_module(schema, profile)?,
        Target::Rust => rust::emit_module(schema, profile)?,
    };

    Ok(GeneratedModule {
        target: profile.target,
        code,
        declaration_count: schema.len(),
    })
}

/// Validate `schema`, then render the client and server modules
pub fn generate(schema: &Schema, config: &CodegenConfig) -> Result<GeneratedModules> {
    resolve::validate(schema)?;

    let client = render(schema, &config.elm)?;
    let server = render(schema, &config.rust)?;

    info!(
        declarations = schema.len(),
        client_bytes = client.code.len(),
        server_bytes = server.code.len(),
        "generated client and server modules"
    );

    Ok(GeneratedModules { client, server })
}
