//! Optional `life.ron` overrides for the engine and the terminal driver.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::engine_info;
use life_engine::EngineConfig;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "life.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Every field is optional in the file; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub favorites_path: PathBuf,
    pub patterns_dir: PathBuf,
    pub timer_interval_ms: u64,
    pub cell_length: f64,
    /// Viewport in points; the board gets one cell per `cell_length`.
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            favorites_path: engine.favorites_path,
            patterns_dir: engine.patterns_dir,
            timer_interval_ms: engine.timer_interval.as_millis() as u64,
            cell_length: engine.cell_length,
            viewport_width: 300.0,
            viewport_height: 150.0,
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Reads `path`. A missing file yields the defaults; an unreadable or
    /// malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        engine_info!("loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            favorites_path: self.favorites_path.clone(),
            patterns_dir: self.patterns_dir.clone(),
            timer_interval: Duration::from_millis(self.timer_interval_ms),
            cell_length: self.cell_length,
        }
    }
}
