use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::jokes::DEFAULT_JOKE_API_URL;
use crate::translate::client::DEFAULT_MYMEMORY_URL;
use crate::translate::Language;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub translation_config: TranslationConfig,
    #[serde(default)]
    pub joke_config: JokeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Served under `/static` when set.
    #[serde(default)]
    pub static_dir: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_translation_url")]
    pub api_url: String,
    #[serde(default = "default_translation_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_hourly_limit")]
    pub hourly_limit: u32,
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

fn default_translation_url() -> String {
    DEFAULT_MYMEMORY_URL.to_string()
}

fn default_translation_timeout_ms() -> u64 {
    5000
}

fn default_hourly_limit() -> u32 {
    50
}

fn default_window_ms() -> u64 {
    3_600_000
}

fn default_min_interval_ms() -> u64 {
    5000
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_base_delay_ms() -> u64 {
    5000
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: default_translation_url(),
            timeout_ms: default_translation_timeout_ms(),
            hourly_limit: default_hourly_limit(),
            window_ms: default_window_ms(),
            min_interval_ms: default_min_interval_ms(),
            max_attempts: default_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JokeConfig {
    #[serde(default = "default_joke_url")]
    pub api_url: String,
    /// Jokes per page.
    #[serde(default = "default_joke_count")]
    pub count: usize,
    #[serde(default = "default_joke_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_language")]
    pub default_language: Language,
}

fn default_joke_url() -> String {
    DEFAULT_JOKE_API_URL.to_string()
}

fn default_joke_count() -> usize {
    3
}

fn default_joke_timeout_ms() -> u64 {
    8000
}

fn default_language() -> Language {
    Language::Hindi
}

impl Default for JokeConfig {
    fn default() -> Self {
        Self {
            api_url: default_joke_url(),
            count: default_joke_count(),
            timeout_ms: default_joke_timeout_ms(),
            default_language: default_language(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let content = substitute_env_vars(&content)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config: Config = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the first config file found in the search order, or the built-in
    /// defaults when there is none. A file that exists but fails to parse is an error.
    pub fn discover() -> Result<(Self, Option<PathBuf>)> {
        for path in search_paths() {
            if !path.is_file() {
                debug!("No config at {}", path.display());
                continue;
            }
            let config = Self::load(&path)?;
            info!("Loaded configuration from: {}", path.display());
            return Ok((config, Some(path)));
        }

        info!("No configuration file found, using defaults");
        Ok((Self::default(), None))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.translation_config;
        if t.api_url.trim().is_empty() {
            return Err(ConfigError::invalid("translation_config.api_url", "must not be empty"));
        }
        if t.hourly_limit == 0 {
            return Err(ConfigError::invalid(
                "translation_config.hourly_limit",
                "must be greater than 0",
            ));
        }
        if t.max_attempts == 0 {
            return Err(ConfigError::invalid(
                "translation_config.max_attempts",
                "must be greater than 0",
            ));
        }
        if t.window_ms == 0 {
            return Err(ConfigError::invalid(
                "translation_config.window_ms",
                "must be greater than 0",
            ));
        }

        let j = &self.joke_config;
        if j.api_url.trim().is_empty() {
            return Err(ConfigError::invalid("joke_config.api_url", "must not be empty"));
        }
        if j.count == 0 {
            return Err(ConfigError::invalid("joke_config.count", "must be greater than 0"));
        }
        Ok(())
    }
}

fn search_paths() -> Vec<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));

    let mut paths: Vec<PathBuf> = std::env::var("CONFIG_PATH")
        .ok()
        .map(PathBuf::from)
        .into_iter()
        .collect();
    paths.push(PathBuf::from("conf.yaml"));
    paths.push(PathBuf::from("conf.json"));
    if let Some(dir) = exe_dir {
        paths.push(dir.join("conf.yaml"));
        paths.push(dir.join("conf.json"));
    }
    paths
}

/// Replace `${VAR_NAME}` with the variable's value; unset variables are left as written.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}
