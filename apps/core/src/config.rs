use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[cfg(target_os = "windows")]
const ENGINE_FILE: &str = "es.exe";
#[cfg(not(target_os = "windows"))]
const ENGINE_FILE: &str = "es";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_results: u16,
    pub debounce_ms: u64,
    pub resources_dir: PathBuf,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: 50,
            debounce_ms: 300,
            resources_dir: default_resources_dir(),
            config_path: stable_app_data_dir().join("config.toml"),
        }
    }
}

impl Config {
    // The engine ships inside the bundled resources tree, never on PATH.
    pub fn engine_path(&self) -> PathBuf {
        self.resources_dir.join("assets").join(ENGINE_FILE)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.max_results < 5 || cfg.max_results > 100 {
        return Err("max_results out of range".into());
    }

    if cfg.debounce_ms < 50 || cfg.debounce_ms > 5000 {
        return Err("debounce_ms out of range".into());
    }

    if cfg.resources_dir.as_os_str().is_empty() {
        return Err("resources_dir is required".into());
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    Ok(())
}

pub fn load(explicit_path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => stable_app_data_dir().join("config.toml"),
    };

    if !path.exists() {
        let mut config = Config::default();
        config.config_path = path;
        return Ok(config);
    }

    let raw = std::fs::read_to_string(&path)?;
    let mut config: Config =
        toml::from_str(&raw).map_err(|error| ConfigError::Parse(error.to_string()))?;
    config.config_path = path;
    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    validate(config).map_err(ConfigError::Invalid)?;

    let serialized =
        toml::to_string_pretty(config).map_err(|error| ConfigError::Parse(error.to_string()))?;
    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.config_path, serialized)?;
    Ok(())
}

pub fn stable_app_data_dir() -> PathBuf {
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        if !local.trim().is_empty() {
            return PathBuf::from(local).join("everybar");
        }
    }

    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        if !xdg.trim().is_empty() {
            return PathBuf::from(xdg).join("everybar");
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        if !home.trim().is_empty() {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("everybar");
        }
    }

    std::env::temp_dir().join("everybar")
}

fn default_resources_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(std::env::temp_dir)
}
