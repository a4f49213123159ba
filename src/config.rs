use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::level_filters::LevelFilter;

use crate::errors::ConfigError;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP port to listen on.
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,

    /// Reported by GET /system/version.
    pub server_version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            log_level: "info".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AppConfig {
    /// Load `config.json` if one can be found, otherwise fall back to
    /// the built-in defaults (port 8080).
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Look for the config file next to the executable, one directory
    /// above it, then in the working directory.
    pub fn locate() -> Option<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(CONFIG_FILE));
            candidates.push(exe_dir.join("..").join(CONFIG_FILE));
        }
        candidates.push(PathBuf::from(CONFIG_FILE));

        candidates.into_iter().find(|p| p.exists())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&file).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<AppConfig>(raw)
    }

    /// Unknown levels fall back to INFO.
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            _ => LevelFilter::INFO,
        }
    }
}
