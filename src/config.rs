//! # Application Configuration Module
//!
//! Runtime settings for a grocery-list session: where state is persisted,
//! how much undo history is kept and the store-mode defaults. Values come
//! from the defaults below, optionally overridden by environment variables.

use crate::history::DEFAULT_MAX_HISTORY as HISTORY_DEPTH;
use crate::store_mode::StoreLayout;
use log::warn;
use std::env;
use std::path::PathBuf;

// Constants for application configuration
pub const DEFAULT_DATA_DIR: &str = ".grocery-list";
pub const DEFAULT_MAX_HISTORY: usize = HISTORY_DEPTH;
pub const DEFAULT_SERVINGS: u32 = 4;

pub const ENV_DATA_DIR: &str = "GROCERY_DATA_DIR";
pub const ENV_MAX_HISTORY: &str = "GROCERY_MAX_HISTORY";
pub const ENV_STORE_LAYOUT: &str = "GROCERY_STORE_LAYOUT";

/// Store-mode defaults used until the user chooses otherwise
#[derive(Debug, Clone, PartialEq)]
pub struct StoreModeConfig {
    /// Whether store mode starts enabled
    pub enabled: bool,
    /// Layout used when store mode is on
    pub layout: StoreLayout,
}

impl Default for StoreModeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            layout: StoreLayout::Default,
        }
    }
}

/// Configuration for a grocery-list session
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding persisted session state
    pub data_dir: PathBuf,
    /// Maximum undo depth for the grocery list
    pub max_history: usize,
    /// Servings used for a recipe whose base servings is unknown
    pub default_servings: u32,
    /// Store-mode defaults
    pub store_mode: StoreModeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            max_history: DEFAULT_MAX_HISTORY,
            default_servings: DEFAULT_SERVINGS,
            store_mode: StoreModeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `GROCERY_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    ///
    /// Invalid values are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir.trim());
        }

        if let Some(raw) = lookup(ENV_MAX_HISTORY) {
            match raw.trim().parse::<usize>() {
                Ok(depth) => config.max_history = depth,
                Err(e) => warn!("Ignoring {}={:?}: {}", ENV_MAX_HISTORY, raw, e),
            }
        }

        if let Some(raw) = lookup(ENV_STORE_LAYOUT) {
            match raw.parse::<StoreLayout>() {
                Ok(layout) => config.store_mode.layout = layout,
                Err(e) => warn!("Ignoring {}: {}", ENV_STORE_LAYOUT, e),
            }
        }

        config
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data_dir, PathBuf::from(".grocery-list"));
        assert_eq!(config.max_history, 50);
        assert_eq!(config.default_servings, 4);
        assert!(!config.store_mode.enabled);
        assert_eq!(config.store_mode.layout, StoreLayout::Default);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/tmp/groceries"),
            (ENV_MAX_HISTORY, "10"),
            (ENV_STORE_LAYOUT, "perimeter-first"),
        ]));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/groceries"));
        assert_eq!(config.max_history, 10);
        assert_eq!(config.store_mode.layout, StoreLayout::PerimeterFirst);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "  "),
            (ENV_MAX_HISTORY, "lots"),
            (ENV_STORE_LAYOUT, "zigzag"),
        ]));

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::default().with_data_dir("state").with_max_history(5);
        assert_eq!(config.data_dir, PathBuf::from("state"));
        assert_eq!(config.max_history, 5);
    }
}
