//! Story generation.
//!
//! Turns a child profile and a theme into an unsaved [`StoryDraft`]: one LLM
//! call for the text, one image call for the cover, then one image call per
//! chapter. Calls run one after another. A failed cover aborts the draft; a
//! failed chapter illustration only leaves that chapter without a picture.

use anyhow::Result;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use super::active_child_service::ActiveChildService;
use super::chapter_codec::placeholder_prompt;
use super::commands::stories::GenerateStoryCommand;
use super::models::child::{Child, ReadingLevel};
use super::models::story::{Chapter, StoryDraft, StoryValidationError};
use super::models::EntityNotFound;
use super::story_parameters::StoryParameters;
use crate::backend::integrations::{IntegrationClient, IntegrationError};
use crate::backend::storage::ChildStorage;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Story text generation failed: {0}")]
    Text(#[source] IntegrationError),

    #[error("The generated story could not be used: {0}")]
    MalformedStory(String),

    #[error("Cover image generation failed: {0}")]
    Cover(#[source] IntegrationError),
}

#[derive(Debug, Deserialize)]
struct GeneratedStory {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    chapters: Vec<GeneratedChapter>,
}

/// `chapter_number` from the model is ignored; chapters are numbered by position
#[derive(Debug, Deserialize)]
struct GeneratedChapter {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    illustration_prompt: String,
}

#[derive(Clone)]
pub struct GenerationService {
    child_repository: Arc<dyn ChildStorage>,
    active_child_service: ActiveChildService,
    integrations: Arc<dyn IntegrationClient>,
    story_language: String,
}

impl GenerationService {
    pub fn new(
        child_repository: Arc<dyn ChildStorage>,
        active_child_service: ActiveChildService,
        integrations: Arc<dyn IntegrationClient>,
        story_language: impl Into<String>,
    ) -> Self {
        Self {
            child_repository,
            active_child_service,
            integrations,
            story_language: story_language.into(),
        }
    }

    pub async fn generate(&self, command: GenerateStoryCommand) -> Result<StoryDraft> {
        let child = self.resolve_child(command.child_id.as_deref()).await?;
        let theme = Self::resolve_theme(command.theme.as_deref(), command.custom_theme.as_deref())?;

        info!("Generating story for {} ({}) with theme '{}'", child.name, child.id, theme);

        let parameters = StoryParameters::derive(child.age, &child.reading_level);
        let prompt = self.story_prompt(&child, &theme, &parameters);

        let response = self
            .integrations
            .invoke_llm(&prompt, &Self::story_schema())
            .await
            .map_err(GenerationError::Text)?;
        let generated = Self::parse_story(response)?;

        let cover = self
            .integrations
            .generate_image(&Self::cover_prompt(&generated.title, child.age))
            .await
            .map_err(GenerationError::Cover)?;

        let mut chapters = Vec::with_capacity(generated.chapters.len());
        for (index, chapter) in generated.chapters.into_iter().enumerate() {
            let chapter_number = index as u32 + 1;
            let illustration_prompt = if chapter.illustration_prompt.trim().is_empty() {
                placeholder_prompt(&chapter.title)
            } else {
                chapter.illustration_prompt
            };

            let illustration_url = match self
                .integrations
                .generate_image(&Self::illustration_prompt(&illustration_prompt))
                .await
            {
                Ok(image) => Some(image.url),
                Err(e) => {
                    warn!("Illustration for chapter {} failed: {}", chapter_number, e);
                    None
                }
            };

            chapters.push(Chapter {
                chapter_number,
                title: chapter.title,
                content: chapter.content,
                illustration_prompt,
                illustration_url,
            });
        }

        info!("Generated '{}' with {} chapters", generated.title, chapters.len());

        Ok(StoryDraft {
            title: generated.title,
            description: generated.description,
            child_id: Some(child.id),
            child_name: child.name,
            theme,
            chapters,
            cover_image_url: Some(cover.url),
        })
    }

    async fn resolve_child(&self, child_id: Option<&str>) -> Result<Child> {
        match child_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Ok(self
                .child_repository
                .get_child(id)
                .await?
                .ok_or_else(|| EntityNotFound::child(id))?),
            None => Ok(self
                .active_child_service
                .active_child()
                .await?
                .ok_or(StoryValidationError::NoActiveChild)?),
        }
    }

    /// A non-blank custom theme wins over the selected one
    fn resolve_theme(
        theme: Option<&str>,
        custom_theme: Option<&str>,
    ) -> Result<String, StoryValidationError> {
        [custom_theme, theme]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or(StoryValidationError::MissingTheme)
    }

    fn story_prompt(&self, child: &Child, theme: &str, parameters: &StoryParameters) -> String {
        let level = ReadingLevel::from_tag(&child.reading_level)
            .map(|l| l.label())
            .unwrap_or("Standard");
        let language = &self.story_language;
        let interests = if child.interests.is_empty() {
            String::new()
        } else {
            format!("Interests: {}\n", child.interests.join(", "))
        };

        format!(
            "About the child:\n\
             Name: {name}\n\
             Age: {age} years\n\
             {interests}\
             Theme: {theme}\n\
             Reading level: {level}\n\
             \n\
             Structure:\n\
             The story must be split into {chapters} chapters of about {words} words each, \
             about {total} words in total.\n\
             \n\
             Write a magical, age-appropriate story in {language} for {name}. The story must:\n\
             - Suit the child's age ({age} years) and the reading level ({level}).\n\
             - Give every chapter a creative, clear title in {language}, about {words} words of content, \
             and a short description in ENGLISH of what an illustrator should draw for it (illustration_prompt).\n\
             - Use imaginative, encouraging language. Magic, adventure and feelings are welcome, \
             but nothing too difficult or frightening.\n\
             - Have a clear beginning, middle and end with a positive message.\n\
             \n\
             All story text (title, description, chapter titles, chapter content) MUST be in {language}.\n\
             Answer as JSON with the fields title, description and chapters \
             (chapter_number, title, content, illustration_prompt).",
            name = child.name,
            age = child.age,
            interests = interests,
            theme = theme,
            level = level,
            chapters = parameters.chapter_count,
            words = parameters.words_per_chapter,
            total = parameters.total_words,
            language = language,
        )
    }

    fn story_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "description": { "type": "string" },
                "chapters": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "chapter_number": { "type": "number" },
                            "title": { "type": "string" },
                            "content": { "type": "string" },
                            "illustration_prompt": { "type": "string" }
                        }
                    }
                }
            }
        })
    }

    fn cover_prompt(title: &str, age: u8) -> String {
        format!(
            "Children's book cover for a story titled \"{title}\". Colorful, magical, and inviting. \
             Shows the main character as a {age}-year-old child. Digital art style."
        )
    }

    fn illustration_prompt(description: &str) -> String {
        format!(
            "Children's book illustration: {description}. Colorful, friendly, and appropriate \
             for young children. Digital art style."
        )
    }

    /// Accepts the story object itself or the object encoded as a JSON string
    fn parse_story(response: serde_json::Value) -> Result<GeneratedStory, GenerationError> {
        let value = match response {
            serde_json::Value::String(text) => serde_json::from_str(&text)
                .map_err(|e| GenerationError::MalformedStory(e.to_string()))?,
            other => other,
        };

        let story: GeneratedStory = serde_json::from_value(value)
            .map_err(|e| GenerationError::MalformedStory(e.to_string()))?;

        if story.title.trim().is_empty() {
            return Err(GenerationError::MalformedStory("missing title".to_string()));
        }
        if story.chapters.is_empty() {
            return Err(GenerationError::MalformedStory("no chapters".to_string()));
        }
        Ok(story)
    }
}
