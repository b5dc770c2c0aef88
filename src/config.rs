use crate::gui::scale::{ScaleError, ScaleStyle, WeightRange};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RangeConfig {
    pub min: i32,
    pub max: i32,
    pub initial: i32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: 20,
            max: 250,
            initial: 80,
        }
    }
}

impl RangeConfig {
    pub fn validate(&self) -> Result<WeightRange, ScaleError> {
        WeightRange::new(self.min, self.max, self.initial)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Dial degrees per degree of pointer travel around the dial center.
    pub drag_sensitivity: f64,
    /// Dial degrees per scroll notch.
    pub scroll_step: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 1.0,
            scroll_step: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub range: RangeConfig,
    #[serde(default)]
    pub style: ScaleStyle,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

/// Range values given on the command line; they win over the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeOverrides {
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub initial: Option<i32>,
}

impl RangeOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(min) = self.min {
            config.range.min = min;
        }
        if let Some(max) = self.max {
            config.range.max = max;
        }
        if let Some(initial) = self.initial {
            config.range.initial = initial;
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "example", "weightpicker")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Resolves an explicit path or falls back to the platform config file.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_path(),
    }
}

/// `WEIGHTPICKER_RANGE__INITIAL=75` sets `range.initial`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("WEIGHTPICKER")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with(path, environment())
}

fn load_config_with(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Without a config path (no home directory) the defaults are used.
pub fn load_or_default(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        log::warn!("No config file location, using default configuration");
        return Config::default();
    };

    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
