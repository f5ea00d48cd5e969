use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::backend::domain::models::shared_story::SharedStory as DomainSharedStory;
use crate::backend::io::rest::mappers::community_mapper::CommunityMapper;
use crate::backend::storage::traits::SharedStoryStorage;
use shared::SharedStory as SharedStoryDto;

/// Community stories as one YAML file per story
#[derive(Clone)]
pub struct SharedStoryRepository {
    connection: CsvConnection,
}

impl SharedStoryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn story_path(&self, story_id: &str) -> PathBuf {
        CsvConnection::record_path(&self.connection.community_directory(), story_id)
    }
}

#[async_trait]
impl SharedStoryStorage for SharedStoryRepository {
    async fn store_shared_story(&self, story: &DomainSharedStory) -> Result<()> {
        let dto = CommunityMapper::shared_story_to_dto(story.clone());
        CsvConnection::write_yaml(&self.story_path(&story.id), &dto)?;
        info!("Saved community story '{}' ({})", story.title, story.id);
        Ok(())
    }

    async fn get_shared_story(&self, story_id: &str) -> Result<Option<DomainSharedStory>> {
        let dto: Option<SharedStoryDto> = CsvConnection::read_yaml(&self.story_path(story_id))?;
        match dto {
            Some(dto) if dto.id == story_id => Ok(Some(CommunityMapper::shared_story_to_domain(dto)?)),
            _ => Ok(None),
        }
    }

    async fn list_shared_stories(&self) -> Result<Vec<DomainSharedStory>> {
        let dtos: Vec<SharedStoryDto> =
            CsvConnection::read_yaml_directory(&self.connection.community_directory())?;

        let mut stories: Vec<DomainSharedStory> = dtos
            .into_iter()
            .filter_map(|dto| {
                let id = dto.id.clone();
                CommunityMapper::shared_story_to_domain(dto)
                    .map_err(|e| warn!("Skipping community story {}: {:#}", id, e))
                    .ok()
            })
            .collect();

        stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stories)
    }

    async fn update_shared_story(&self, story: &DomainSharedStory) -> Result<()> {
        if self.get_shared_story(&story.id).await?.is_none() {
            return Err(anyhow!("Shared story not found: {}", story.id));
        }
        self.store_shared_story(story).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::SharedStoryStatus;
    use tempfile::TempDir;

    fn shared_story(id: &str) -> DomainSharedStory {
        DomainSharedStory {
            id: id.to_string(),
            original_story_id: "story::1".to_string(),
            author_name: "Emma E.".to_string(),
            author_age: Some(7),
            title: "Dragen".to_string(),
            description: String::new(),
            theme: "Drager".to_string(),
            chapters: vec![],
            cover_image_url: Some("https://img.example/cover.png".to_string()),
            consent_given: true,
            status: SharedStoryStatus::Published,
            is_featured: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_store_update_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SharedStoryRepository::new(CsvConnection::new(temp_dir.path()).unwrap());

        let mut story = shared_story("shared::1");
        repo.store_shared_story(&story).await.unwrap();

        story.is_featured = true;
        repo.update_shared_story(&story).await.unwrap();

        let loaded = repo.get_shared_story("shared::1").await.unwrap().unwrap();
        assert!(loaded.is_featured);
        assert_eq!(loaded.status, SharedStoryStatus::Published);
        assert_eq!(repo.list_shared_stories().await.unwrap().len(), 1);

        assert!(repo.update_shared_story(&shared_story("shared::missing")).await.is_err());
    }
}
