use crate::error::{ReaperError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name searched for in the current directory and the home directory
pub const CONFIG_FILE_NAME: &str = ".gitreaper.toml";

/// Represents the complete configuration for git-reaper.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Ordered priority list of main branch names
    #[serde(default = "default_main_branches")]
    pub main_branches: Vec<String>,
}

/// Returns the default list of main branch names, highest priority first.
pub fn default_main_branches() -> Vec<String> {
    vec![
        "main".to_string(),
        "master".to_string(),
        "staging".to_string(),
        "dev".to_string(),
        "development".to_string(),
        "production".to_string(),
        "preproduction".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            main_branches: default_main_branches(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| ReaperError::config(e.to_string()))?;
        config.normalized()
    }

    /// Replace the main branch list, e.g. with names given on the command line
    pub fn with_main_branches(self, names: Vec<String>) -> Result<Self> {
        Config {
            main_branches: names,
        }
        .normalized()
    }

    fn normalized(mut self) -> Result<Self> {
        self.main_branches = self
            .main_branches
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if self.main_branches.is_empty() {
            return Err(ReaperError::config("main_branches must not be empty"));
        }
        Ok(self)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.gitreaper.toml` in current directory
/// 3. `~/.gitreaper.toml` in the user's home directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    let Some(path) = path else {
        debug!("no config file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "using config file");
    let text = fs::read_to_string(&path).map_err(|e| {
        ReaperError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    Config::from_toml(&text).map_err(|e| match e {
        ReaperError::Config(msg) => {
            ReaperError::config(format!("invalid {}: {}", path.display(), msg))
        }
        other => other,
    })
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}
