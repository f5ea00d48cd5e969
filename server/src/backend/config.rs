//! Server configuration.
//!
//! The data directory comes from `STORYTELLER_DATA_DIR`, falling back to
//! `~/Documents/Storyteller` and then `./storyteller-data`. An optional
//! `settings.yaml` inside it holds the remaining settings, and
//! `STORYTELLER_*` environment variables override the file.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.yaml";
const DATA_DIR_NAME: &str = "Storyteller";
const FALLBACK_DATA_DIR: &str = "storyteller-data";

/// Contents of `settings.yaml`; missing keys take their defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_address: String,
    pub cors_origin: String,
    pub integrations_url: String,
    /// Language the stories are written in
    pub story_language: String,
    pub rating_requires_login: bool,
    /// Check that a child exists before storing it as the active child
    pub eager_active_child: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            integrations_url: "http://localhost:8787/api".to_string(),
            story_language: "Danish".to_string(),
            rating_requires_login: true,
            eager_active_child: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_directory: PathBuf,
    pub settings: Settings,
    pub integrations_api_key: Option<String>,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Loads the configuration reading variables through `env`
    pub fn load_with<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_directory = env("STORYTELLER_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_directory);

        let mut settings = read_settings(&data_directory.join(SETTINGS_FILE))?;
        apply_overrides(&mut settings, &env);

        let integrations_api_key =
            env("STORYTELLER_INTEGRATIONS_API_KEY").filter(|key| !key.trim().is_empty());

        info!("Using data directory: {}", data_directory.display());
        Ok(Self {
            data_directory,
            settings,
            integrations_api_key,
        })
    }
}

fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .map(|documents| documents.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

fn read_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("Loaded settings from {}", path.display());
    Ok(settings)
}

fn apply_overrides<F>(settings: &mut Settings, env: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env("STORYTELLER_BIND_ADDRESS") {
        settings.bind_address = value;
    }
    if let Some(value) = env("STORYTELLER_CORS_ORIGIN") {
        settings.cors_origin = value;
    }
    if let Some(value) = env("STORYTELLER_INTEGRATIONS_URL") {
        settings.integrations_url = value;
    }
    if let Some(value) = env("STORYTELLER_STORY_LANGUAGE") {
        settings.story_language = value;
    }
    if let Some(flag) = bool_var(env, "STORYTELLER_RATING_REQUIRES_LOGIN") {
        settings.rating_requires_login = flag;
    }
    if let Some(flag) = bool_var(env, "STORYTELLER_EAGER_ACTIVE_CHILD") {
        settings.eager_active_child = flag;
    }
}

fn bool_var<F>(env: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let value = env(key)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("Ignoring {}={}: expected true or false", key, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();

        let config = ServerConfig::load_with(env_from(&[("STORYTELLER_DATA_DIR", dir.as_str())])).unwrap();
        assert_eq!(config.data_directory, temp_dir.path());
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.integrations_api_key, None);
    }

    #[test]
    fn test_settings_file_and_env_overrides() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(SETTINGS_FILE),
            "story_language: English\nrating_requires_login: false\nbind_address: 0.0.0.0:4000\n",
        )
        .unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();

        let config = ServerConfig::load_with(env_from(&[
            ("STORYTELLER_DATA_DIR", dir.as_str()),
            ("STORYTELLER_BIND_ADDRESS", "127.0.0.1:5000"),
            ("STORYTELLER_EAGER_ACTIVE_CHILD", "no"),
            ("STORYTELLER_RATING_REQUIRES_LOGIN", "maybe"),
            ("STORYTELLER_INTEGRATIONS_API_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.settings.story_language, "English");
        assert_eq!(config.settings.bind_address, "127.0.0.1:5000");
        assert!(!config.settings.rating_requires_login);
        assert!(!config.settings.eager_active_child);
        assert_eq!(config.settings.cors_origin, "http://localhost:8080");
        assert_eq!(config.integrations_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_broken_settings_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(SETTINGS_FILE), "rating_requires_login: [oops").unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();

        assert!(ServerConfig::load_with(env_from(&[("STORYTELLER_DATA_DIR", dir.as_str())])).is_err());
    }
}
