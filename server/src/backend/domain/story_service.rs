//! The private story library.
//!
//! Saves generated drafts, renders stories as editable text, applies edits
//! and tracks reading progress. Every stored story satisfies
//! `completed == (current_chapter >= chapter_count)`.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::chapter_codec;
use super::commands::stories::{EditStoryCommand, ProgressResult, SaveDraftCommand, StoryText};
use super::models::story::{Chapter, Story, StoryValidationError};
use super::models::EntityNotFound;
use super::reading_progress::ReadingProgress;
use crate::backend::storage::StoryStorage;

#[derive(Clone)]
pub struct StoryService {
    story_repository: Arc<dyn StoryStorage>,
    /// Serialises read-modify-write of stored stories (edit, progress, delete)
    write_lock: Arc<Mutex<()>>,
}

impl StoryService {
    pub fn new(story_repository: Arc<dyn StoryStorage>) -> Self {
        Self {
            story_repository,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Saves a draft, decoding hand-edited text against the draft's chapters
    pub async fn save_draft(&self, command: SaveDraftCommand) -> Result<Story> {
        let draft = command.draft;

        let title = Self::validate_title(command.title.as_deref().unwrap_or(&draft.title))?;
        let description = command.description.unwrap_or(draft.description);

        let chapters = match command.edited_content {
            Some(content) => Self::decode_content(&content, &draft.chapters)?,
            None => Self::validate_chapters(draft.chapters)?,
        };

        let progress = ReadingProgress::new(1, chapters.len() as u32);
        let now = Utc::now();
        let story = Story {
            id: Story::generate_id(),
            title,
            description,
            child_id: draft.child_id,
            child_name: draft.child_name,
            theme: draft.theme,
            chapters,
            cover_image_url: draft.cover_image_url,
            current_chapter: progress.current_chapter(),
            completed: progress.completed(),
            created_at: now,
            updated_at: now,
        };

        self.story_repository.store_story(&story).await?;
        info!("Saved story '{}' with {} chapters ({})", story.title, story.chapter_count(), story.id);
        Ok(story)
    }

    /// Newest first
    pub async fn list_stories(&self) -> Result<Vec<Story>> {
        self.story_repository.list_stories().await
    }

    pub async fn get_story(&self, story_id: &str) -> Result<Option<Story>> {
        self.story_repository.get_story(story_id).await
    }

    pub async fn story_text(&self, story_id: &str) -> Result<StoryText> {
        let story = self.require_story(story_id).await?;
        Ok(StoryText {
            content: chapter_codec::encode(&story.chapters),
            story_id: story.id,
            title: story.title,
            description: story.description,
        })
    }

    /// Replaces title, description and chapters. Illustrations carry over by
    /// position; progress is clamped when the story got shorter.
    pub async fn edit_story(&self, command: EditStoryCommand) -> Result<Story> {
        let _guard = self.write_lock.lock().await;
        let mut story = self.require_story(&command.story_id).await?;

        story.title = Self::validate_title(&command.title)?;
        story.description = command.description;
        story.chapters = Self::decode_content(&command.content, &story.chapters)?;

        let progress = ReadingProgress::new(story.current_chapter, story.chapter_count());
        if progress.current_chapter() != story.current_chapter {
            warn!(
                "Story {} shrank to {} chapters; moving reader from {} to {}",
                story.id,
                story.chapter_count(),
                story.current_chapter,
                progress.current_chapter()
            );
        }
        story.current_chapter = progress.current_chapter();
        story.completed = progress.completed();
        story.updated_at = Utc::now();

        self.story_repository.update_story(&story).await?;
        info!("Edited story {} ({} chapters)", story.id, story.chapter_count());
        Ok(story)
    }

    /// Out-of-range chapters (including zero and negatives) leave the stored
    /// progress untouched
    pub async fn go_to_chapter(&self, story_id: &str, chapter: i64) -> Result<ProgressResult> {
        let _guard = self.write_lock.lock().await;
        let mut story = self.require_story(story_id).await?;
        let mut progress = ReadingProgress::new(story.current_chapter, story.chapter_count());

        let moved = progress.go_to_chapter(chapter);
        if moved {
            story.current_chapter = progress.current_chapter();
            story.completed = progress.completed();
            story.updated_at = Utc::now();
            self.story_repository.update_story(&story).await?;
            info!("Story {} now at chapter {} (completed: {})", story.id, story.current_chapter, story.completed);
        } else {
            warn!("Ignoring move to chapter {} of story {} ({} chapters)", chapter, story_id, progress.chapter_count());
        }

        Ok(ProgressResult {
            current_chapter: progress.current_chapter(),
            chapter_count: progress.chapter_count(),
            completed: progress.completed(),
            percent: progress.percent(),
            moved,
        })
    }

    pub async fn delete_story(&self, story_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if !self.story_repository.delete_story(story_id).await? {
            return Err(EntityNotFound::story(story_id).into());
        }
        info!("Deleted story {}", story_id);
        Ok(())
    }

    async fn require_story(&self, story_id: &str) -> Result<Story> {
        Ok(self
            .story_repository
            .get_story(story_id)
            .await?
            .ok_or_else(|| EntityNotFound::story(story_id))?)
    }

    fn validate_title(title: &str) -> Result<String, StoryValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoryValidationError::EmptyTitle);
        }
        Ok(title.to_string())
    }

    fn decode_content(content: &str, previous: &[Chapter]) -> Result<Vec<Chapter>, StoryValidationError> {
        if content.trim().is_empty() {
            return Err(StoryValidationError::EmptyContent);
        }
        Ok(chapter_codec::decode(content, previous))
    }

    fn validate_chapters(chapters: Vec<Chapter>) -> Result<Vec<Chapter>, StoryValidationError> {
        if chapters.is_empty() {
            return Err(StoryValidationError::NoChapters);
        }
        if chapters.iter().all(|c| c.content.trim().is_empty()) {
            return Err(StoryValidationError::EmptyContent);
        }
        Ok(chapters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::story::StoryDraft;
    use crate::backend::storage::{CsvConnection, StoryRepository};
    use tempfile::TempDir;

    fn setup_test() -> (StoryService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (StoryService::new(Arc::new(StoryRepository::new(connection))), temp_dir)
    }

    fn chapter(n: u32, title: &str, content: &str) -> Chapter {
        Chapter {
            chapter_number: n,
            title: title.to_string(),
            content: content.to_string(),
            illustration_prompt: format!("prompt {n}"),
            illustration_url: Some(format!("https://img/{n}.png")),
        }
    }

    fn draft(chapters: Vec<Chapter>) -> StoryDraft {
        StoryDraft {
            title: "Dragen Dino".to_string(),
            description: "En drage".to_string(),
            child_id: Some("child::emma".to_string()),
            child_name: "Emma".to_string(),
            theme: "Drage-eventyr".to_string(),
            chapters,
            cover_image_url: Some("https://img/cover.png".to_string()),
        }
    }

    fn save(d: StoryDraft) -> SaveDraftCommand {
        SaveDraftCommand {
            draft: d,
            title: None,
            description: None,
            edited_content: None,
        }
    }

    fn three_chapters() -> Vec<Chapter> {
        vec![chapter(1, "A", "x"), chapter(2, "B", "y"), chapter(3, "C", "z")]
    }

    #[tokio::test]
    async fn test_save_draft_starts_at_first_chapter() {
        let (service, _temp_dir) = setup_test();
        let story = service.save_draft(save(draft(three_chapters()))).await.unwrap();

        assert_eq!(story.current_chapter, 1);
        assert!(!story.completed);
        assert_eq!(service.list_stories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_single_chapter_story_is_complete_on_save() {
        let (service, _temp_dir) = setup_test();
        let story = service.save_draft(save(draft(vec![chapter(1, "A", "x")]))).await.unwrap();
        assert!(story.completed);
    }

    #[tokio::test]
    async fn test_save_draft_with_edited_text_keeps_illustrations() {
        let (service, _temp_dir) = setup_test();
        let mut cmd = save(draft(three_chapters()));
        cmd.title = Some("  Ny titel ".to_string());
        cmd.edited_content = Some("**Første**\n\nNyt indhold\n\n---\n\n**Anden**\n\nMere".to_string());

        let story = service.save_draft(cmd).await.unwrap();
        assert_eq!(story.title, "Ny titel");
        assert_eq!(story.chapters.len(), 2);
        assert_eq!(story.chapters[0].title, "Første");
        assert_eq!(story.chapters[0].illustration_url.as_deref(), Some("https://img/1.png"));
        assert_eq!(story.chapters[1].illustration_prompt, "prompt 2");
    }

    #[tokio::test]
    async fn test_save_draft_validation() {
        let (service, _temp_dir) = setup_test();

        let mut cmd = save(draft(three_chapters()));
        cmd.title = Some("   ".to_string());
        let err = service.save_draft(cmd).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<StoryValidationError>(), Some(StoryValidationError::EmptyTitle)));

        let mut cmd = save(draft(three_chapters()));
        cmd.edited_content = Some(" \n ".to_string());
        let err = service.save_draft(cmd).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<StoryValidationError>(), Some(StoryValidationError::EmptyContent)));

        let err = service.save_draft(save(draft(vec![]))).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<StoryValidationError>(), Some(StoryValidationError::NoChapters)));

        assert!(service.list_stories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_story_text_round_trip() {
        let (service, _temp_dir) = setup_test();
        let story = service
            .save_draft(save(draft(vec![chapter(1, "A", "x"), chapter(2, "B", "y")])))
            .await
            .unwrap();

        let text = service.story_text(&story.id).await.unwrap();
        assert_eq!(text.content, "**A**\n\nx\n\n---\n\n**B**\n\ny");

        let edited = service
            .edit_story(EditStoryCommand {
                story_id: story.id.clone(),
                title: text.title,
                description: text.description,
                content: text.content,
            })
            .await
            .unwrap();
        assert_eq!(edited.chapters, story.chapters);
    }

    #[tokio::test]
    async fn test_go_to_chapter() {
        let (service, _temp_dir) = setup_test();
        let story = service.save_draft(save(draft(three_chapters()))).await.unwrap();

        let result = service.go_to_chapter(&story.id, 0).await.unwrap();
        assert!(!result.moved);
        assert_eq!(result.current_chapter, 1);

        let result = service.go_to_chapter(&story.id, -1).await.unwrap();
        assert!(!result.moved);
        assert_eq!(result.current_chapter, 1);

        let result = service.go_to_chapter(&story.id, 4).await.unwrap();
        assert!(!result.moved);
        assert!(!result.completed);

        let result = service.go_to_chapter(&story.id, 3).await.unwrap();
        assert!(result.moved);
        assert!(result.completed);

        let stored = service.get_story(&story.id).await.unwrap().unwrap();
        assert_eq!(stored.current_chapter, 3);
        assert!(stored.completed);

        // Going back keeps the invariant
        let result = service.go_to_chapter(&story.id, 2).await.unwrap();
        assert!(result.moved);
        assert!(!result.completed);
    }

    #[tokio::test]
    async fn test_edit_that_shrinks_story_clamps_progress() {
        let (service, _temp_dir) = setup_test();
        let story = service.save_draft(save(draft(three_chapters()))).await.unwrap();
        service.go_to_chapter(&story.id, 3).await.unwrap();

        let edited = service
            .edit_story(EditStoryCommand {
                story_id: story.id.clone(),
                title: "Kortere".to_string(),
                description: String::new(),
                content: "**A**\n\nx\n\n---\n\n**B**\n\ny".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(edited.current_chapter, 2);
        assert!(edited.completed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_progress_moves_all_succeed() {
        let (service, _temp_dir) = setup_test();
        let chapters = (1..=5).map(|n| chapter(n, "T", "x")).collect();
        let story = service.save_draft(save(draft(chapters))).await.unwrap();

        for _ in 0..20 {
            let moves: Vec<_> = (1..=5)
                .map(|n| {
                    let service = service.clone();
                    let id = story.id.clone();
                    tokio::spawn(async move { service.go_to_chapter(&id, n).await })
                })
                .collect();
            for handle in moves {
                assert!(handle.await.unwrap().unwrap().moved);
            }
        }

        assert_eq!(service.list_stories().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_progress_during_edit_keeps_the_edit() {
        let (service, _temp_dir) = setup_test();
        let chapters = (1..=5).map(|n| chapter(n, "T", "x")).collect();
        let story = service.save_draft(save(draft(chapters))).await.unwrap();

        let mut handles = Vec::new();
        for n in 1..=5 {
            let service = service.clone();
            let id = story.id.clone();
            handles.push(tokio::spawn(async move {
                service.go_to_chapter(&id, n).await.map(|_| ())
            }));
        }
        let editor = service.clone();
        let id = story.id.clone();
        handles.push(tokio::spawn(async move {
            editor
                .edit_story(EditStoryCommand {
                    story_id: id,
                    title: "Kortere".to_string(),
                    description: String::new(),
                    content: "**A**\n\nx\n\n---\n\n**B**\n\ny".to_string(),
                })
                .await
                .map(|_| ())
        }));
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = service.get_story(&story.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Kortere");
        assert_eq!(stored.chapters.len(), 2);
        assert!(stored.current_chapter >= 1 && stored.current_chapter <= 2);
        assert_eq!(stored.completed, stored.current_chapter == 2);
    }

    #[tokio::test]
    async fn test_missing_story() {
        let (service, _temp_dir) = setup_test();
        let err = service.go_to_chapter("story::missing", 1).await.unwrap_err();
        assert!(err.downcast_ref::<EntityNotFound>().is_some());

        let err = service.delete_story("story::missing").await.unwrap_err();
        assert!(err.downcast_ref::<EntityNotFound>().is_some());
    }
}
