use anyhow::Result;

use super::parse_timestamp;
use crate::backend::domain::commands::children::CreateChildCommand;
use crate::backend::domain::models::child::Child as DomainChild;
use crate::backend::domain::story_parameters::StoryParameters;
use shared::{
    ActiveChildResponse, Child as SharedChild, ChildListResponse, ChildResponse,
    CreateChildRequest, StoryParametersResponse,
};

/// Mapper to convert between shared Child DTOs and domain Child models.
pub struct ChildMapper;

impl ChildMapper {
    pub fn to_domain(dto: SharedChild) -> Result<DomainChild> {
        Ok(DomainChild {
            created_at: parse_timestamp(&dto.created_at, "created_at")?,
            updated_at: parse_timestamp(&dto.updated_at, "updated_at")?,
            id: dto.id,
            name: dto.name,
            age: dto.age,
            interests: dto.interests,
            avatar_color: dto.avatar_color,
            reading_level: dto.reading_level,
            parent_email: dto.parent_email,
        })
    }

    pub fn to_dto(domain: DomainChild) -> SharedChild {
        SharedChild {
            id: domain.id,
            name: domain.name,
            age: domain.age,
            interests: domain.interests,
            avatar_color: domain.avatar_color,
            reading_level: domain.reading_level,
            parent_email: domain.parent_email,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(request: CreateChildRequest) -> CreateChildCommand {
        CreateChildCommand {
            name: request.name,
            age: request.age,
            interests: request.interests,
            avatar_color: request.avatar_color,
            reading_level: request.reading_level,
            parent_email: request.parent_email,
        }
    }

    pub fn to_child_response_dto(domain: DomainChild, message: &str) -> ChildResponse {
        ChildResponse {
            child: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_child_list_dto(domain_children: Vec<DomainChild>) -> ChildListResponse {
        ChildListResponse {
            children: domain_children.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_active_child_dto(active_child: Option<DomainChild>) -> ActiveChildResponse {
        ActiveChildResponse {
            active_child: active_child.map(Self::to_dto),
        }
    }

    pub fn to_story_parameters_dto(parameters: StoryParameters) -> StoryParametersResponse {
        StoryParametersResponse {
            chapter_count: parameters.chapter_count,
            words_per_chapter: parameters.words_per_chapter,
            total_words: parameters.total_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_timestamp() {
        let dto = SharedChild {
            id: "child::1".to_string(),
            name: "Emma".to_string(),
            age: 5,
            interests: vec![],
            avatar_color: "#FF6B9D".to_string(),
            reading_level: "let".to_string(),
            parent_email: None,
            created_at: "yesterday".to_string(),
            updated_at: "2024-05-01T10:00:00+00:00".to_string(),
        };
        assert!(ChildMapper::to_domain(dto).is_err());
    }
}
