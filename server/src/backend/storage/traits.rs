//! # Storage Traits
//!
//! Storage abstractions the domain services depend on. Each entity of the
//! product has its own trait so a backend can be swapped per entity.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::child::Child;
use crate::backend::domain::models::rating::Rating;
use crate::backend::domain::models::shared_story::SharedStory;
use crate::backend::domain::models::story::Story;

/// Child profile storage
#[async_trait]
pub trait ChildStorage: Send + Sync {
    async fn store_child(&self, child: &Child) -> Result<()>;

    async fn get_child(&self, child_id: &str) -> Result<Option<Child>>;

    /// All children, newest first
    async fn list_children(&self) -> Result<Vec<Child>>;

    /// Returns true if the child existed
    async fn delete_child(&self, child_id: &str) -> Result<bool>;
}

/// Holds the id of the child currently selected for story generation.
/// The id may go stale; callers resolve it against [`ChildStorage`].
#[async_trait]
pub trait ActiveChildStorage: Send + Sync {
    async fn get_active_child_id(&self) -> Result<Option<String>>;

    async fn set_active_child_id(&self, child_id: &str) -> Result<()>;

    async fn clear_active_child(&self) -> Result<()>;
}

/// Private library storage
#[async_trait]
pub trait StoryStorage: Send + Sync {
    async fn store_story(&self, story: &Story) -> Result<()>;

    async fn get_story(&self, story_id: &str) -> Result<Option<Story>>;

    /// All stories, newest first
    async fn list_stories(&self) -> Result<Vec<Story>>;

    async fn update_story(&self, story: &Story) -> Result<()>;

    /// Returns true if the story existed
    async fn delete_story(&self, story_id: &str) -> Result<bool>;
}

/// Community story storage
#[async_trait]
pub trait SharedStoryStorage: Send + Sync {
    async fn store_shared_story(&self, story: &SharedStory) -> Result<()>;

    async fn get_shared_story(&self, story_id: &str) -> Result<Option<SharedStory>>;

    /// All community stories regardless of status, newest first
    async fn list_shared_stories(&self) -> Result<Vec<SharedStory>>;

    async fn update_shared_story(&self, story: &SharedStory) -> Result<()>;
}

/// Append-only rating storage. Uniqueness per user is not enforced here.
#[async_trait]
pub trait RatingStorage: Send + Sync {
    async fn store_rating(&self, rating: &Rating) -> Result<()>;

    async fn list_ratings(&self) -> Result<Vec<Rating>>;
}
