/// Config file loading and creation for the eloarena CLI.
///
/// Config lives at ~/.config/eloarena/config.toml.
/// All fields are optional; CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default)]
pub struct EloarenaConfig {
    pub data_path: Option<PathBuf>,
    pub milestone_interval: Option<usize>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# eloarena configuration
# All values here can be overridden by CLI flags.

# Where items and comparison history are stored
# data_path = \"/home/you/.local/share/eloarena/data.json\"

# How many comparisons between progress milestones during `run`
# milestone_interval = 10
";

/// Returns the default config path: ~/.config/eloarena/config.toml
pub fn config_path() -> PathBuf {
    home_dir().join(".config").join("eloarena").join("config.toml")
}

/// Returns the default data file path: ~/.local/share/eloarena/data.json
pub fn default_data_path() -> PathBuf {
    home_dir()
        .join(".local")
        .join("share")
        .join("eloarena")
        .join("data.json")
}

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> EloarenaConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            toml::from_str(&content)
                .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => EloarenaConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
