use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub id: String,
    pub shared_story_id: String,
    pub rating_value: u8,
    /// Email of the rating user; `None` for anonymous ratings
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn generate_id() -> String {
        format!("rating::{}", Uuid::new_v4().simple())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Rating must be between 1 and 5, got {0}")]
    ValueOutOfRange(u8),
    #[error("You must be logged in to rate a story")]
    LoginRequired,
}
