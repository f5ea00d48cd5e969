use serde::{Deserialize, Serialize};

/// A child profile stories are written for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub interests: Vec<String>,
    pub avatar_color: String,
    /// One of: let/beginner, standard/intermediate, udfordrende/advanced
    pub reading_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateChildRequest {
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub avatar_color: Option<String>,
    pub reading_level: String,
    #[serde(default)]
    pub parent_email: Option<String>,
}

/// Response after creating a child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildResponse {
    pub child: Child,
    pub success_message: String,
}

/// Response containing a list of children
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildListResponse {
    pub children: Vec<Child>,
}

/// Request for setting the active child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetActiveChildRequest {
    pub child_id: String,
}

/// Response containing the active child information.
/// `active_child` is `None` when nothing is selected or the selection went stale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveChildResponse {
    pub active_child: Option<Child>,
}

/// Generation parameters derived from a child's age and reading level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryParametersResponse {
    pub chapter_count: u32,
    pub words_per_chapter: u32,
    pub total_words: u32,
}

/// One numbered chapter of a story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_number: u32,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub illustration_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustration_url: Option<String>,
}

/// A story saved in the private library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_id: Option<String>,
    pub child_name: String,
    pub theme: String,
    pub chapters: Vec<Chapter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub current_chapter: u32,
    pub completed: bool,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Response containing the library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryListResponse {
    pub stories: Vec<Story>,
}

/// Request to generate a new story draft.
/// `child_id` falls back to the active child; `custom_theme` wins over `theme` when non-blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerateStoryRequest {
    #[serde(default)]
    pub child_id: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub custom_theme: Option<String>,
}

/// A generated, not yet saved story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDraft {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_id: Option<String>,
    pub child_name: String,
    pub theme: String,
    pub chapters: Vec<Chapter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

/// Request to save a draft into the library, optionally with hand-edited text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveStoryRequest {
    pub draft: StoryDraft,
    /// Title override; the draft title is used when absent
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Whole story in the `**Title**` / `---` text format
    #[serde(default)]
    pub edited_content: Option<String>,
}

/// Request to replace a story's title, description and chapters from edited text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditStoryRequest {
    pub title: String,
    pub description: String,
    pub content: String,
}

/// Response after saving or editing a story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryResponse {
    pub story: Story,
    pub success_message: String,
}

/// A story rendered as one editable text blob
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryTextResponse {
    pub story_id: String,
    pub title: String,
    pub description: String,
    pub content: String,
}

/// Request to move the reader to a chapter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoToChapterRequest {
    /// Any integer; values outside `1..=chapter_count` are ignored
    pub chapter: i64,
}

/// Reading progress of a story after a navigation request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReadingProgressResponse {
    pub current_chapter: u32,
    pub chapter_count: u32,
    pub completed: bool,
    /// 0-100, for progress bars
    pub percent: f64,
    /// False when the requested chapter was out of range
    pub moved: bool,
}

/// Publication state of a community story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharedStoryStatus {
    Published,
    Withdrawn,
}

/// A story copied into the community feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedStory {
    pub id: String,
    pub original_story_id: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_age: Option<u8>,
    pub title: String,
    pub description: String,
    pub theme: String,
    pub chapters: Vec<Chapter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub consent_given: bool,
    pub status: SharedStoryStatus,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: String, // RFC 3339 timestamp
}

/// Request to publish a library story to the community
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishStoryRequest {
    pub author_name: String,
    pub consent_given: bool,
}

/// Response after publishing a story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishStoryResponse {
    pub shared_story: SharedStory,
    pub success_message: String,
}

/// A single rating record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: String,
    pub shared_story_id: String,
    pub rating_value: u8,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
}

/// Ordering and filtering of the community feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedFilter {
    #[default]
    Newest,
    Trending,
    Unrated,
}

/// Query string of the community feed
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommunityFeedQuery {
    #[serde(default)]
    pub filter: FeedFilter,
}

/// A community story together with its rating aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityStory {
    pub story: SharedStory,
    pub average_rating: f64,
    pub rating_count: u32,
    /// The current user's rating, when logged in and already rated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
}

/// The community page: featured story plus the filtered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityFeedResponse {
    pub featured: Option<CommunityStory>,
    pub stories: Vec<CommunityStory>,
    pub filter: FeedFilter,
    pub logged_in: bool,
}

/// Request to rate a community story
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateStoryRequest {
    pub rating_value: u8,
}

/// Response after a rating attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateStoryResponse {
    pub shared_story_id: String,
    pub average_rating: f64,
    pub rating_count: u32,
    pub user_rating: u8,
    /// False when the user had already rated and nothing was written
    pub accepted: bool,
}

/// Time remaining until the next story of the month is chosen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// The featured story together with the countdown to the next pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryOfTheMonthResponse {
    pub winner: Option<SharedStory>,
    pub countdown: Countdown,
}
