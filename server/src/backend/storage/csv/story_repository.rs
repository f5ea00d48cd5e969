use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::backend::domain::models::story::Story as DomainStory;
use crate::backend::io::rest::mappers::story_mapper::StoryMapper;
use crate::backend::storage::traits::StoryStorage;
use shared::Story as SharedStory;

/// Library stories as one YAML file per story
#[derive(Clone)]
pub struct StoryRepository {
    connection: CsvConnection,
}

impl StoryRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn story_path(&self, story_id: &str) -> PathBuf {
        CsvConnection::record_path(&self.connection.stories_directory(), story_id)
    }
}

#[async_trait]
impl StoryStorage for StoryRepository {
    async fn store_story(&self, story: &DomainStory) -> Result<()> {
        let dto = StoryMapper::to_dto(story.clone());
        CsvConnection::write_yaml(&self.story_path(&story.id), &dto)?;
        info!("Saved story '{}' ({})", story.title, story.id);
        Ok(())
    }

    async fn get_story(&self, story_id: &str) -> Result<Option<DomainStory>> {
        let dto: Option<SharedStory> = CsvConnection::read_yaml(&self.story_path(story_id))?;
        match dto {
            Some(dto) if dto.id == story_id => Ok(Some(StoryMapper::to_domain(dto)?)),
            _ => Ok(None),
        }
    }

    async fn list_stories(&self) -> Result<Vec<DomainStory>> {
        let dtos: Vec<SharedStory> =
            CsvConnection::read_yaml_directory(&self.connection.stories_directory())?;

        let mut stories: Vec<DomainStory> = dtos
            .into_iter()
            .filter_map(|dto| {
                let id = dto.id.clone();
                StoryMapper::to_domain(dto)
                    .map_err(|e| warn!("Skipping story {}: {:#}", id, e))
                    .ok()
            })
            .collect();

        stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stories)
    }

    async fn update_story(&self, story: &DomainStory) -> Result<()> {
        if self.get_story(&story.id).await?.is_none() {
            return Err(anyhow!("Story not found: {}", story.id));
        }
        self.store_story(story).await
    }

    async fn delete_story(&self, story_id: &str) -> Result<bool> {
        if self.get_story(story_id).await?.is_none() {
            return Ok(false);
        }
        CsvConnection::remove_file(&self.story_path(story_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::story::Chapter;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn setup_test_repo() -> (StoryRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (StoryRepository::new(connection), temp_dir)
    }

    fn story(id: &str, title: &str, minutes_ago: i64) -> DomainStory {
        let created = Utc::now() - Duration::minutes(minutes_ago);
        DomainStory {
            id: id.to_string(),
            title: title.to_string(),
            description: "En lille historie".to_string(),
            child_id: Some("child::abc".to_string()),
            child_name: "Emma".to_string(),
            theme: "Drage-eventyr".to_string(),
            chapters: vec![
                Chapter {
                    chapter_number: 1,
                    title: "Dragen vågner".to_string(),
                    content: "Linje et\n\nLinje to".to_string(),
                    illustration_prompt: "A sleepy dragon".to_string(),
                    illustration_url: Some("https://img.example/1.png".to_string()),
                },
                Chapter {
                    chapter_number: 2,
                    title: "Hjem igen".to_string(),
                    content: "Slut".to_string(),
                    illustration_prompt: "A dragon flying home".to_string(),
                    illustration_url: None,
                },
            ],
            cover_image_url: None,
            current_chapter: 1,
            completed: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_story() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_story(&story("story::1", "Dragen", 0)).await.unwrap();

        let loaded = repo.get_story("story::1").await.unwrap().expect("story missing");
        assert_eq!(loaded.chapters.len(), 2);
        assert_eq!(loaded.chapters[0].content, "Linje et\n\nLinje to");
        assert_eq!(loaded.chapters[1].illustration_url, None);
    }

    #[tokio::test]
    async fn test_update_requires_existing_story() {
        let (repo, _temp_dir) = setup_test_repo();
        let mut s = story("story::1", "Dragen", 0);
        assert!(repo.update_story(&s).await.is_err());

        repo.store_story(&s).await.unwrap();
        s.current_chapter = 2;
        s.completed = true;
        repo.update_story(&s).await.unwrap();

        let loaded = repo.get_story("story::1").await.unwrap().unwrap();
        assert_eq!(loaded.current_chapter, 2);
        assert!(loaded.completed);
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_story(&story("story::old", "Gammel", 30)).await.unwrap();
        repo.store_story(&story("story::new", "Ny", 1)).await.unwrap();

        let titles: Vec<String> = repo.list_stories().await.unwrap().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Ny".to_string(), "Gammel".to_string()]);

        assert!(repo.delete_story("story::old").await.unwrap());
        assert_eq!(repo.list_stories().await.unwrap().len(), 1);
    }
}
