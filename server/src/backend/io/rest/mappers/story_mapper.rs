use anyhow::Result;

use super::parse_timestamp;
use crate::backend::domain::commands::stories::{
    EditStoryCommand, GenerateStoryCommand, ProgressResult, SaveDraftCommand, StoryText,
};
use crate::backend::domain::models::story::{
    Chapter as DomainChapter, Story as DomainStory, StoryDraft as DomainDraft,
};
use shared::{
    Chapter as SharedChapter, EditStoryRequest, GenerateStoryRequest, ReadingProgressResponse,
    SaveStoryRequest, Story as SharedStory, StoryDraft as SharedDraft, StoryListResponse,
    StoryResponse, StoryTextResponse,
};

pub struct StoryMapper;

impl StoryMapper {
    pub fn chapter_to_domain(dto: SharedChapter) -> DomainChapter {
        DomainChapter {
            chapter_number: dto.chapter_number,
            title: dto.title,
            content: dto.content,
            illustration_prompt: dto.illustration_prompt,
            illustration_url: dto.illustration_url,
        }
    }

    pub fn chapter_to_dto(domain: DomainChapter) -> SharedChapter {
        SharedChapter {
            chapter_number: domain.chapter_number,
            title: domain.title,
            content: domain.content,
            illustration_prompt: domain.illustration_prompt,
            illustration_url: domain.illustration_url,
        }
    }

    pub fn to_domain(dto: SharedStory) -> Result<DomainStory> {
        Ok(DomainStory {
            created_at: parse_timestamp(&dto.created_at, "created_at")?,
            updated_at: parse_timestamp(&dto.updated_at, "updated_at")?,
            id: dto.id,
            title: dto.title,
            description: dto.description,
            child_id: dto.child_id,
            child_name: dto.child_name,
            theme: dto.theme,
            chapters: dto.chapters.into_iter().map(Self::chapter_to_domain).collect(),
            cover_image_url: dto.cover_image_url,
            current_chapter: dto.current_chapter,
            completed: dto.completed,
        })
    }

    pub fn to_dto(domain: DomainStory) -> SharedStory {
        SharedStory {
            id: domain.id,
            title: domain.title,
            description: domain.description,
            child_id: domain.child_id,
            child_name: domain.child_name,
            theme: domain.theme,
            chapters: domain.chapters.into_iter().map(Self::chapter_to_dto).collect(),
            cover_image_url: domain.cover_image_url,
            current_chapter: domain.current_chapter,
            completed: domain.completed,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn draft_to_domain(dto: SharedDraft) -> DomainDraft {
        DomainDraft {
            title: dto.title,
            description: dto.description,
            child_id: dto.child_id,
            child_name: dto.child_name,
            theme: dto.theme,
            chapters: dto.chapters.into_iter().map(Self::chapter_to_domain).collect(),
            cover_image_url: dto.cover_image_url,
        }
    }

    pub fn draft_to_dto(domain: DomainDraft) -> SharedDraft {
        SharedDraft {
            title: domain.title,
            description: domain.description,
            child_id: domain.child_id,
            child_name: domain.child_name,
            theme: domain.theme,
            chapters: domain.chapters.into_iter().map(Self::chapter_to_dto).collect(),
            cover_image_url: domain.cover_image_url,
        }
    }

    pub fn to_generate_command(request: GenerateStoryRequest) -> GenerateStoryCommand {
        GenerateStoryCommand {
            child_id: request.child_id,
            theme: request.theme,
            custom_theme: request.custom_theme,
        }
    }

    pub fn to_save_command(request: SaveStoryRequest) -> SaveDraftCommand {
        SaveDraftCommand {
            draft: Self::draft_to_domain(request.draft),
            title: request.title,
            description: request.description,
            edited_content: request.edited_content,
        }
    }

    pub fn to_edit_command(story_id: String, request: EditStoryRequest) -> EditStoryCommand {
        EditStoryCommand {
            story_id,
            title: request.title,
            description: request.description,
            content: request.content,
        }
    }

    pub fn to_story_response_dto(domain: DomainStory, message: &str) -> StoryResponse {
        StoryResponse {
            story: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_story_list_dto(stories: Vec<DomainStory>) -> StoryListResponse {
        StoryListResponse {
            stories: stories.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_story_text_dto(text: StoryText) -> StoryTextResponse {
        StoryTextResponse {
            story_id: text.story_id,
            title: text.title,
            description: text.description,
            content: text.content,
        }
    }

    pub fn to_progress_dto(result: ProgressResult) -> ReadingProgressResponse {
        ReadingProgressResponse {
            current_chapter: result.current_chapter,
            chapter_count: result.chapter_count,
            completed: result.completed,
            percent: result.percent,
            moved: result.moved,
        }
    }
}
