use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "milestone-release.toml";

/// Represents the complete configuration for milestone-release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub author: AuthorConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

fn default_timeout_secs() -> u64 {
    300
}

/// Limits for the authenticated fetch.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_git_program() -> String {
    "git".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_git_program")]
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            program: default_git_program(),
        }
    }
}

/// Fallback commit identity when none is passed on the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AuthorConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Safety checks on the repository being released.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RepositoryConfig {
    /// Abort unless the repository belongs to this owner
    pub expected_owner: Option<String>,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `milestone-release.toml` in current directory
/// 3. `milestone-release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(ReleaseError::Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match discover_config_path() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let text = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&text)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

fn discover_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Parse configuration text
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).map_err(|e| ReleaseError::config(e.to_string()))?;
    if config.fetch.timeout_secs == 0 {
        return Err(ReleaseError::config("fetch.timeout_secs must be positive"));
    }
    Ok(config)
}
