use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// 1-based and equal to the chapter's position in its story
    pub chapter_number: u32,
    pub title: String,
    pub content: String,
    pub illustration_prompt: String,
    pub illustration_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub description: String,
    pub child_id: Option<String>,
    pub child_name: String,
    pub theme: String,
    pub chapters: Vec<Chapter>,
    pub cover_image_url: Option<String>,
    pub current_chapter: u32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Story {
    pub fn generate_id() -> String {
        format!("story::{}", Uuid::new_v4().simple())
    }

    pub fn chapter_count(&self) -> u32 {
        self.chapters.len() as u32
    }
}

/// An unsaved generation result
#[derive(Debug, Clone, PartialEq)]
pub struct StoryDraft {
    pub title: String,
    pub description: String,
    pub child_id: Option<String>,
    pub child_name: String,
    pub theme: String,
    pub chapters: Vec<Chapter>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoryValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Content is required")]
    EmptyContent,
    #[error("A story needs at least one chapter")]
    NoChapters,
    #[error("Choose or enter a theme")]
    MissingTheme,
    #[error("Select a child first")]
    NoActiveChild,
}
