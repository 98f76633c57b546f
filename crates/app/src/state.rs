use std::collections::BTreeMap;
use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use service::oauth::OAuthApp;

pub const APP_NAME: &str = "harbor";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the directory API
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Bind address for the directory API
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Externally visible base URL (scheme + host), used for OAuth
    /// redirect URIs behind a proxy
    #[serde(default)]
    pub public_url: Option<String>,
    /// Callers granted verbose authentication diagnostics
    #[serde(default)]
    pub debug_principals: Vec<String>,
    /// provider name -> registered app keys; leave empty to disable OAuth
    #[serde(default)]
    pub oauth: BTreeMap<String, OAuthApp>,
    /// Object-store bucket for avatar images
    #[serde(default = "default_avatar_bucket")]
    pub avatar_bucket: String,
    /// Directory for log files (stdout only if not set)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_api_port() -> u16 {
    3000
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_avatar_bucket() -> String {
    "avatars".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            bind_addr: default_bind_addr(),
            public_url: None,
            debug_principals: Vec::new(),
            oauth: BTreeMap::new(),
            avatar_bucket: default_avatar_bucket(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the harbor directory (~/.harbor)
    pub harbor_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the harbor directory path (custom or default ~/.harbor)
    pub fn harbor_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new harbor state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let harbor_dir = Self::harbor_dir(custom_path)?;

        if harbor_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }
        fs::create_dir_all(&harbor_dir)?;

        let config = config.unwrap_or_default();
        let config_path = harbor_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            harbor_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the harbor directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let harbor_dir = Self::harbor_dir(custom_path)?;

        if !harbor_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = harbor_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            harbor_dir,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("harbor directory not initialized. Run 'harbor init' first")]
    NotInitialized,

    #[error("harbor directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
