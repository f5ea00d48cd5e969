//! Conversions between the `shared` DTOs and the domain models.
//! Storage uses the same mappers, so records on disk have the DTO shape.

pub mod child_mapper;
pub mod community_mapper;
pub mod story_mapper;

pub use child_mapper::ChildMapper;
pub use community_mapper::CommunityMapper;
pub use story_mapper::StoryMapper;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

pub(crate) fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Failed to parse {} from shared DTO", field))?
        .with_timezone(&Utc))
}
