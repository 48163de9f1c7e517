//! User configuration.
//!
//! An optional TOML file supplies defaults for the theme, catalog and initial
//! filters. It is read from `--config` when given, otherwise from
//! `<config dir>/mindline/config.toml` if that file exists. Command line flags
//! override whatever the file says.

use crate::error::{MindlineError, Result};
use crate::render::ui::ThemeName;
use crate::timeline::ALL_CATEGORIES;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub theme: ThemeName,

    /// Catalog file; the built-in catalog is used when unset
    pub catalog: Option<PathBuf>,

    /// Initial category filter
    pub category: String,

    /// Initial search text
    pub search: String,

    /// How long the input thread waits for an event per poll
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            catalog: None,
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub theme: Option<ThemeName>,
    pub catalog: Option<PathBuf>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl Config {
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
        if let Some(catalog) = overrides.catalog {
            self.catalog = Some(catalog);
        }
        if let Some(category) = overrides.category {
            self.category = category;
        }
        if let Some(search) = overrides.search {
            self.search = search;
        }
    }

    /// Input poll interval, never shorter than 1 ms
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// `<config dir>/mindline/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mindline").join("config.toml"))
}

/// Load the explicit config file, or the default one when it exists
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_config(&path),
        _ => {
            log::debug!("no config file, using defaults");
            Ok(Config::default())
        }
    }
}

/// Read and parse a config file
///
/// A relative `catalog` path is resolved against the config file's directory.
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        MindlineError::file_error(format!("Cannot read config {}", path.display()), e)
    })?;
    let mut config = parse(&contents, &path.display().to_string())?;

    if let (Some(catalog), Some(parent)) = (config.catalog.as_mut(), path.parent()) {
        if catalog.is_relative() {
            *catalog = parent.join(&*catalog);
        }
    }

    log::info!("loaded config {}", path.display());
    Ok(config)
}

/// Parse config TOML text
pub fn parse_config(contents: &str) -> Result<Config> {
    parse(contents, "config")
}

fn parse(contents: &str, origin: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents)
        .map_err(|e| MindlineError::config(format!("{origin}: invalid TOML: {e}")))?;

    if config.poll_interval_ms == 0 {
        return Err(MindlineError::config(format!(
            "{origin}: poll_interval_ms must be positive"
        )));
    }
    Ok(config)
}
