use crate::errors::{NavError, NavResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub mod range_types;

pub use range_types::{FuzzyRadius, StepBudget};

/// Tunables for path searches
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Frontier pops allowed before a search gives up
    pub step_budget: StepBudget,
    /// Arrival tolerance for fuzzy requests
    pub fuzzy_radius: FuzzyRadius,
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().and_then(|mut path| {
        path.push("tilenav");
        fs::create_dir_all(&path).ok()?;
        path.push("config.toml");
        Some(path)
    })
}

pub fn load_config() -> NavigationConfig {
    if let Some(config_path) = get_config_path() {
        if let Ok(contents) = fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<NavigationConfig>(&contents) {
                return config;
            }
        }
    }
    NavigationConfig::default()
}

pub fn save_config(config: &NavigationConfig) -> NavResult<()> {
    let config_path = get_config_path().ok_or(NavError::ConfigDirNotFound)?;
    let contents = toml::to_string_pretty(config)?;
    fs::write(config_path, contents)?;
    Ok(())
}
