//! Child profile management.
//!
//! Profiles are created and deleted; there is no update operation. Creation
//! validates the name, age range, reading level and optional parent email,
//! and normalises interests and the avatar color.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use super::commands::children::CreateChildCommand;
use super::models::child::{
    is_valid_email, Child, ChildValidationError, ReadingLevel, DEFAULT_AVATAR_COLOR,
    MAX_CHILD_AGE, MAX_NAME_LENGTH, MIN_CHILD_AGE,
};
use super::models::EntityNotFound;
use super::story_parameters::StoryParameters;
use crate::backend::storage::ChildStorage;

#[derive(Clone)]
pub struct ChildService {
    child_repository: Arc<dyn ChildStorage>,
}

impl ChildService {
    pub fn new(child_repository: Arc<dyn ChildStorage>) -> Self {
        Self { child_repository }
    }

    pub async fn create_child(&self, command: CreateChildCommand) -> Result<Child> {
        info!("Creating child: name={}, age={}", command.name, command.age);

        let name = Self::validate_name(&command.name)?;
        if !(MIN_CHILD_AGE..=MAX_CHILD_AGE).contains(&command.age) {
            return Err(ChildValidationError::AgeOutOfRange(command.age).into());
        }
        let reading_level = ReadingLevel::from_tag(&command.reading_level).ok_or_else(|| {
            ChildValidationError::UnknownReadingLevel(command.reading_level.clone())
        })?;
        let parent_email = Self::validate_parent_email(command.parent_email)?;

        let avatar_color = command
            .avatar_color
            .map(|color| color.trim().to_string())
            .filter(|color| !color.is_empty())
            .unwrap_or_else(|| DEFAULT_AVATAR_COLOR.to_string());

        let now = Utc::now();
        let child = Child {
            id: Child::generate_id(),
            name,
            age: command.age,
            interests: Self::normalize_interests(command.interests),
            avatar_color,
            reading_level: reading_level.as_tag().to_string(),
            parent_email,
            created_at: now,
            updated_at: now,
        };

        self.child_repository.store_child(&child).await?;
        info!("Created child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    pub async fn get_child(&self, child_id: &str) -> Result<Option<Child>> {
        let child = self.child_repository.get_child(child_id).await?;
        if child.is_none() {
            warn!("Child not found: {}", child_id);
        }
        Ok(child)
    }

    /// Newest first
    pub async fn list_children(&self) -> Result<Vec<Child>> {
        let children = self.child_repository.list_children().await?;
        info!("Found {} children", children.len());
        Ok(children)
    }

    pub async fn delete_child(&self, child_id: &str) -> Result<()> {
        info!("Deleting child: {}", child_id);
        if !self.child_repository.delete_child(child_id).await? {
            return Err(EntityNotFound::child(child_id).into());
        }
        Ok(())
    }

    /// Generation parameters for a stored child
    pub async fn story_parameters(&self, child_id: &str) -> Result<StoryParameters> {
        let child = self
            .child_repository
            .get_child(child_id)
            .await?
            .ok_or_else(|| EntityNotFound::child(child_id))?;
        Ok(StoryParameters::derive(child.age, &child.reading_level))
    }

    fn validate_name(name: &str) -> Result<String, ChildValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChildValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ChildValidationError::NameTooLong);
        }
        Ok(name.to_string())
    }

    fn validate_parent_email(
        email: Option<String>,
    ) -> Result<Option<String>, ChildValidationError> {
        match email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()) {
            Some(email) if !is_valid_email(&email) => Err(ChildValidationError::InvalidEmail(email)),
            other => Ok(other),
        }
    }

    /// Trimmed, blanks dropped, first occurrence kept
    fn normalize_interests(interests: Vec<String>) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for interest in interests {
            let interest = interest.trim();
            if !interest.is_empty() && !seen.iter().any(|s| s == interest) {
                seen.push(interest.to_string());
            }
        }
        seen
    }
}
