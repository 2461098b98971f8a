use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_LATEST_URL: &str = "https://api.exchangerate-api.com/v4/latest";
pub const DEFAULT_HISTORICAL_URL: &str = "https://api.frankfurter.app";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub latest: Option<ProviderConfig>,
    pub historical: Option<ProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            latest: Some(ProviderConfig {
                base_url: DEFAULT_LATEST_URL.to_string(),
            }),
            historical: Some(ProviderConfig {
                base_url: DEFAULT_HISTORICAL_URL.to_string(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn latest_url(&self) -> &str {
        self.latest
            .as_ref()
            .map_or(DEFAULT_LATEST_URL, |p| &p.base_url)
    }

    pub fn historical_url(&self) -> &str {
        self.historical
            .as_ref()
            .map_or(DEFAULT_HISTORICAL_URL, |p| &p.base_url)
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    pub default_from: Option<String>,
    pub default_to: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            providers: ProvidersConfig::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_from: None,
            default_to: None,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or the built-in defaults when none exists.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        Self::load_or_default(Self::default_config_path()?)
    }

    /// Like `load_from_path`, but a missing file yields `AppConfig::default()`.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    /// Writes `contents` as a new config file, creating parent directories.
    /// Refuses to overwrite, and rejects contents that would not load.
    pub fn write_new<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            anyhow::bail!("Configuration file already exists at {}", path.display());
        }
        serde_yaml::from_str::<Self>(contents).context("Refusing to write an invalid config")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file to {}", path.display()))?;
        debug!("Wrote config to {}", path.display());
        Ok(())
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxtrend", "fxtrend")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
