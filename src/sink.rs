//! Output sink
//!
//! Writes generated modules to their configured paths and checks files on
//! disk for drift. Nothing is written until both modules exist in memory.

use similar::TextDiff;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::codegen::GeneratedModules;
use crate::config::OutputConfig;
use crate::error::Result;
use crate::schema::Target;

/// Destination paths for the client and server modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSink {
    pub client_path: PathBuf,
    pub server_path: PathBuf,
}

/// A file on disk that differs from what the generator produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleFile {
    pub target: Target,
    pub path: PathBuf,
    /// File does not exist yet
    pub missing: bool,
    /// Unified diff from the file on disk to the generated text
    pub diff: String,
}

impl OutputSink {
    pub fn new(client_path: impl Into<PathBuf>, server_path: impl Into<PathBuf>) -> Self {
        Self {
            client_path: client_path.into(),
            server_path: server_path.into(),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(&output.client_path, &output.server_path)
    }

    /// Destination for `target`
    pub fn path(&self, target: Target) -> &Path {
        match target {
            Target::Elm => &self.client_path,
            Target::Rust => &self.server_path,
        }
    }

    /// Write both modules, creating parent directories
    pub fn write(&self, modules: &GeneratedModules) -> Result<()> {
        for module in modules.iter() {
            let path = self.path(module.target);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, &module.code)?;
            info!(target_lang = %module.target, path = %path.display(), "wrote module");
        }
        Ok(())
    }

    /// Compare both modules with the files on disk
    pub fn check(&self, modules: &GeneratedModules) -> Result<Vec<StaleFile>> {
        let mut stale = Vec::new();

        for module in modules.iter() {
            let path = self.path(module.target);
            let existing = match std::fs::read_to_string(path) {
                Ok(content) => Some(content),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            };

            if existing.as_deref() == Some(module.code.as_str()) {
                continue;
            }

            let current = existing.as_deref().unwrap_or("");
            let shown = path.display().to_string();
            let diff = TextDiff::from_lines(current, module.code.as_str())
                .unified_diff()
                .context_radius(3)
                .header(&shown, &format!("{} (generated)", shown))
                .to_string();

            warn!(target_lang = %module.target, path = %shown, missing = existing.is_none(), "stale generated module");
            stale.push(StaleFile {
                target: module.target,
                path: path.to_path_buf(),
                missing: existing.is_none(),
                diff,
            });
        }

        Ok(stale)
    }
}
