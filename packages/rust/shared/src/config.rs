//! Application configuration for RepoSnap.
//!
//! User config lives at `~/.reposnap/reposnap.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RepoSnapError, Result};
use crate::types::{
    CONFIG_EXTENSIONS, DOC_EXTENSIONS, ExtensionSet, PROGRAMMING_EXTENSIONS,
};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "reposnap.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".reposnap";

// ---------------------------------------------------------------------------
// Config structs (matching reposnap.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extension groups considered for scanning.
    #[serde(default)]
    pub extensions: ExtensionsConfig,
}

/// `[extensions]` section — the three scan groups exposed by the
/// interactive surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionsConfig {
    #[serde(default = "default_programming")]
    pub programming: Vec<String>,

    #[serde(default = "default_configuration")]
    pub configuration: Vec<String>,

    #[serde(default = "default_documentation")]
    pub documentation: Vec<String>,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            programming: default_programming(),
            configuration: default_configuration(),
            documentation: default_documentation(),
        }
    }
}

impl ExtensionsConfig {
    /// Merge all groups into a single [`ExtensionSet`].
    pub fn to_set(&self) -> ExtensionSet {
        ExtensionSet::new(
            self.programming
                .iter()
                .chain(&self.configuration)
                .chain(&self.documentation),
        )
    }
}

fn default_programming() -> Vec<String> {
    PROGRAMMING_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}
fn default_configuration() -> Vec<String> {
    CONFIG_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}
fn default_documentation() -> Vec<String> {
    DOC_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.reposnap/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| RepoSnapError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.reposnap/reposnap.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| RepoSnapError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        RepoSnapError::config(format!("failed to parse {}: {e}", path.display()))
    })
}
