use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagVerError};

/// One location declaring the project's version literal.
///
/// `path` is relative to the project root, `line` is 1-indexed. `value` is
/// the literal currently declared there, used by `version --check`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionSource {
    pub path: String,
    pub line: usize,

    #[serde(default)]
    pub value: Option<String>,
}

/// Configuration for tagver, loaded from `tagver.toml`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Versioning strategy. Must start with "tag" for bumping to be
    /// enabled; an optional "+<command>" suffix names a post-bump hook.
    #[serde(default)]
    pub versioning: String,

    /// Branch bumps are allowed from. Historically hardwired to master;
    /// kept as the default but overridable for projects whose mainline is
    /// named differently.
    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Ordered version-declaration locations to rewrite on bump
    #[serde(default)]
    pub sources: Vec<VersionSource>,
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            versioning: String::new(),
            branch: default_branch(),
            remote: default_remote(),
            sources: Vec::new(),
        }
    }
}

impl Config {
    /// True when the project opted into tag-driven versioning
    pub fn is_tag_driven(&self) -> bool {
        self.versioning.starts_with("tag")
    }

    /// The shell command to run after a bump, if one was configured via
    /// the "+" suffix (e.g. `versioning = "tag+make publish"`).
    pub fn hook_command(&self) -> Option<&str> {
        let (_, command) = self.versioning.split_once('+')?;
        if command.trim().is_empty() {
            None
        } else {
            Some(command)
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tagver.toml` in the project root
/// 3. `.tagver.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>, project_root: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else {
        let local = project_root.join("tagver.toml");
        if local.exists() {
            fs::read_to_string(local)?
        } else if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join(".tagver.toml");
            if user.exists() {
                fs::read_to_string(user)?
            } else {
                return Ok(Config::default());
            }
        } else {
            return Ok(Config::default());
        }
    };

    toml::from_str(&config_str).map_err(|e| TagVerError::config(e.to_string()))
}
