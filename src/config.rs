// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_API_URL: &str = "http://localhost:8000";

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentConfig {
    /// Base URL of the HR API.
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Where the session file lives; defaults to ~/.hrpulse/session.json.
    #[serde(default)]
    pub session_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment. config.yaml is optional for
    /// the client; without it everything points at the local backend.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        let mut config = match Self::load_from_file(&environment)? {
            Some(config) => {
                info!("Loaded config.yaml for environment: {}", environment);
                config
            }
            None => Self::default_local(),
        };

        if let Ok(url) = std::env::var("HRPULSE_API_URL") {
            config.api_url = url;
        }

        Ok(config)
    }

    pub fn default_local() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: default_timeout_secs(),
            session_path: None,
        }
    }

    fn get_environment() -> String {
        std::env::var("HRPULSE_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Option<Self>> {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            return Ok(None);
        }

        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;

        Ok(Some(Self::parse(&config_content, environment)?))
    }

    fn parse(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    /// Path of the persisted session file.
    pub fn session_file(&self) -> PathBuf {
        if let Some(path) = &self.session_path {
            return path.clone();
        }
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hrpulse")
            .join("session.json")
    }
}
