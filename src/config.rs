//! Configuration management for the generator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (wire-idl.toml)
//! - Environment variables (WIRE_IDL__*)
//!
//! ## Example config file (wire-idl.toml):
//! ```toml
//! [output]
//! client_path = "client/src/Commands.elm"
//! server_path = "server/src/commands.rs"
//!
//! [elm]
//! module_name = "Commands"
//!
//! [rust]
//! extra_derives = ["Eq"]
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::codegen::{CodegenConfig, RenderProfile};

/// Main configuration for the generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Where generated modules are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Elm client settings
    #[serde(default)]
    pub elm: ElmConfig,

    /// Rust server settings
    #[serde(default)]
    pub rust: RustConfig,
}

/// Output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the generated Elm module
    #[serde(default = "default_client_path")]
    pub client_path: PathBuf,

    /// Path of the generated Rust module
    #[serde(default = "default_server_path")]
    pub server_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElmConfig {
    /// Name on the generated `module` line
    #[serde(default = "default_elm_module")]
    pub module_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RustConfig {
    /// Derives added to every generated type
    #[serde(default)]
    pub extra_derives: Vec<String>,
}

// Default value functions
fn default_client_path() -> PathBuf {
    PathBuf::from("client/src/Commands.elm")
}

fn default_server_path() -> PathBuf {
    PathBuf::from("server/src/commands.rs")
}

fn default_elm_module() -> String {
    "Commands".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            client_path: default_client_path(),
            server_path: default_server_path(),
        }
    }
}

impl Default for ElmConfig {
    fn default() -> Self {
        Self {
            module_name: default_elm_module(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["wire-idl.toml", ".wire-idl.toml", "config/wire-idl.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "wire-idl", "wire-idl") {
            let xdg_config = config_dir.config_dir().join("wire-idl.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // WIRE_IDL__OUTPUT__CLIENT_PATH and friends
        builder = builder.add_source(
            Environment::with_prefix("WIRE_IDL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Render profiles for both targets
    pub fn codegen_config(&self) -> CodegenConfig {
        let mut elm = RenderProfile::elm();
        elm.module_name = self.elm.module_name.clone();

        let mut rust = RenderProfile::rust();
        rust.extra_derives = self.rust.extra_derives.clone();

        CodegenConfig { elm, rust }
    }
}
