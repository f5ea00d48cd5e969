//! Domain-level command and query types.
//! Services take and return these; the REST layer maps the `shared` DTOs
//! onto them.

pub mod children {
    /// Input for creating a child profile
    #[derive(Debug, Clone)]
    pub struct CreateChildCommand {
        pub name: String,
        pub age: u8,
        pub interests: Vec<String>,
        pub avatar_color: Option<String>,
        pub reading_level: String,
        pub parent_email: Option<String>,
    }
}

pub mod stories {
    use crate::backend::domain::models::story::StoryDraft;

    /// Input for generating a draft
    #[derive(Debug, Clone, Default)]
    pub struct GenerateStoryCommand {
        /// Falls back to the active child
        pub child_id: Option<String>,
        pub theme: Option<String>,
        pub custom_theme: Option<String>,
    }

    /// Input for saving a draft into the library
    #[derive(Debug, Clone)]
    pub struct SaveDraftCommand {
        pub draft: StoryDraft,
        pub title: Option<String>,
        pub description: Option<String>,
        /// Whole story in the chapter text format
        pub edited_content: Option<String>,
    }

    /// Replace a story's text
    #[derive(Debug, Clone)]
    pub struct EditStoryCommand {
        pub story_id: String,
        pub title: String,
        pub description: String,
        pub content: String,
    }

    /// Editable rendering of a story
    #[derive(Debug, Clone, PartialEq)]
    pub struct StoryText {
        pub story_id: String,
        pub title: String,
        pub description: String,
        pub content: String,
    }

    /// Result of a chapter navigation request
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ProgressResult {
        pub current_chapter: u32,
        pub chapter_count: u32,
        pub completed: bool,
        pub percent: f64,
        pub moved: bool,
    }
}

pub mod community {
    use crate::backend::domain::models::shared_story::SharedStory;
    use crate::backend::domain::rating_aggregator::RatedStory;
    use shared::{Countdown, FeedFilter};

    /// Input for publishing a library story
    #[derive(Debug, Clone)]
    pub struct PublishStoryCommand {
        pub story_id: String,
        pub author_name: String,
        pub consent_given: bool,
    }

    /// The arranged community page
    #[derive(Debug, Clone)]
    pub struct FeedResult {
        pub featured: Option<RatedStory>,
        pub stories: Vec<RatedStory>,
        pub filter: FeedFilter,
        pub logged_in: bool,
    }

    /// Outcome of a rating attempt with the refreshed aggregate
    #[derive(Debug, Clone, PartialEq)]
    pub struct RateResult {
        pub shared_story_id: String,
        pub average_rating: f64,
        pub rating_count: u32,
        pub user_rating: u8,
        pub accepted: bool,
    }

    #[derive(Debug, Clone)]
    pub struct StoryOfTheMonth {
        pub winner: Option<SharedStory>,
        pub countdown: Countdown,
    }
}
