//! Configuration module for htmlidl.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.htmlidl/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `HTMLIDL_` and use double
//! underscores to separate nested levels:
//! - `HTMLIDL_DISCOVERY__PATTERN=idl/*.idl` sets `discovery.pattern`
//! - `HTMLIDL_DISCOVERY__SORT=true` sets `discovery.sort`
//! - `HTMLIDL_LOGGING__LEVEL=debug` sets `logging.level`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directory holding the settings file, searched for from the current directory upwards
pub const CONFIG_DIR: &str = ".htmlidl";
pub const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "HTMLIDL_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Which IDL files to read
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Wrapper generation settings
    #[serde(default)]
    pub codegen: CodegenConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// Glob pattern for input files, relative to the working directory
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Sort matched files by name instead of using directory order
    #[serde(default)]
    pub sort: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CodegenConfig {
    /// Directory that receives generated `.rs` files and `mod.rs`
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extra IDL type name -> Rust type mappings, checked before the built-in table
    #[serde(default)]
    pub type_map: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default log filter when `HTMLIDL_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_pattern() -> String {
    "../idl/HTML*Element.idl".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("../src/elements")
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            discovery: DiscoveryConfig::default(),
            codegen: CodegenConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            sort: false,
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            type_map: BTreeMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| Path::new(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error: defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels, single underscore stays in the name
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Find the settings file by looking for a `.htmlidl` directory
    /// from the current directory up to the filesystem root
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Get the workspace root directory (where `.htmlidl` is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Create a default settings file under the current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        Self::init_config_file_in(Path::new("."), force)
    }

    /// Create a default settings file with helpful comments under `base`
    pub fn init_config_file_in(
        base: &Path,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = base.join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let defaults = Settings::default();
        let template = format!(
            r#"# htmlidl configuration file

# Version of the configuration schema
version = {version}

[discovery]
# Glob pattern for IDL inputs, relative to the working directory.
# '*' matches within one path component, '**' matches any number of directories.
pattern = "{pattern}"

# Sort matched files by name. When false, files are processed in the order
# the filesystem lists them, which may differ between platforms.
sort = {sort}

[codegen]
# Directory for generated wrapper structs and mod.rs
output_dir = "{output_dir}"

# Additional IDL -> Rust type mappings, e.g.
# DOMTokenList = "crate::dom_token_list::DOMTokenList"
[codegen.type_map]

[logging]
# Log filter used when HTMLIDL_LOG is not set: error, warn, info, debug, trace
level = "{level}"
"#,
            version = defaults.version,
            pattern = defaults.discovery.pattern,
            sort = defaults.discovery.sort,
            output_dir = defaults.codegen.output_dir.display(),
            level = defaults.logging.level,
        );

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }
}
