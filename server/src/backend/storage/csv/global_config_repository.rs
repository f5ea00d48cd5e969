use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

use super::connection::CsvConnection;
use crate::backend::storage::traits::ActiveChildStorage;

pub const DATA_FORMAT_VERSION: &str = "1.0";

/// Contents of `global_config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub active_child_id: Option<String>,
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            active_child_id: None,
            data_format_version: DATA_FORMAT_VERSION.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Stores the active child selection in the global config file
#[derive(Clone)]
pub struct GlobalConfigRepository {
    connection: CsvConnection,
}

impl GlobalConfigRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    pub fn load(&self) -> Result<GlobalConfig> {
        let config: Option<GlobalConfig> =
            CsvConnection::read_yaml(&self.connection.global_config_path())?;
        Ok(config.unwrap_or_default())
    }

    fn save(&self, mut config: GlobalConfig) -> Result<()> {
        config.updated_at = Utc::now().to_rfc3339();
        CsvConnection::write_yaml(&self.connection.global_config_path(), &config)
    }
}

#[async_trait]
impl ActiveChildStorage for GlobalConfigRepository {
    async fn get_active_child_id(&self) -> Result<Option<String>> {
        Ok(self.load()?.active_child_id)
    }

    async fn set_active_child_id(&self, child_id: &str) -> Result<()> {
        let mut config = self.load()?;
        config.active_child_id = Some(child_id.to_string());
        self.save(config)?;
        info!("Active child set to {}", child_id);
        Ok(())
    }

    async fn clear_active_child(&self) -> Result<()> {
        let mut config = self.load()?;
        if config.active_child_id.take().is_some() {
            self.save(config)?;
            info!("Active child cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_active_child_management() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GlobalConfigRepository::new(CsvConnection::new(temp_dir.path()).unwrap());

        assert_eq!(repo.get_active_child_id().await.unwrap(), None);

        repo.set_active_child_id("child::456").await.unwrap();
        assert_eq!(repo.get_active_child_id().await.unwrap(), Some("child::456".to_string()));

        let config = repo.load().unwrap();
        assert_eq!(config.data_format_version, DATA_FORMAT_VERSION);

        repo.clear_active_child().await.unwrap();
        assert_eq!(repo.get_active_child_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keeps_created_at_across_writes() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GlobalConfigRepository::new(CsvConnection::new(temp_dir.path()).unwrap());

        repo.set_active_child_id("child::1").await.unwrap();
        let first = repo.load().unwrap();
        repo.set_active_child_id("child::2").await.unwrap();
        let second = repo.load().unwrap();

        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.active_child_id.as_deref(), Some("child::2"));
    }
}
