use chrono::{DateTime, Utc};
use shared::SharedStoryStatus;
use uuid::Uuid;

use super::story::Chapter;

/// A library story copied into the community feed
#[derive(Debug, Clone, PartialEq)]
pub struct SharedStory {
    pub id: String,
    pub original_story_id: String,
    pub author_name: String,
    pub author_age: Option<u8>,
    pub title: String,
    pub description: String,
    pub theme: String,
    pub chapters: Vec<Chapter>,
    pub cover_image_url: Option<String>,
    pub consent_given: bool,
    pub status: SharedStoryStatus,
    /// Story of the month
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl SharedStory {
    pub fn generate_id() -> String {
        format!("shared::{}", Uuid::new_v4().simple())
    }

    pub fn is_published(&self) -> bool {
        self.status == SharedStoryStatus::Published
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishValidationError {
    #[error("Parental consent is required to publish a story")]
    ConsentMissing,
    #[error("Author name cannot be empty")]
    EmptyAuthorName,
    #[error("A parent email is required on the child's profile before publishing")]
    MissingParentEmail,
}
