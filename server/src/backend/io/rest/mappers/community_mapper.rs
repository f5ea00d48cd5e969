use anyhow::Result;

use super::parse_timestamp;
use super::story_mapper::StoryMapper;
use crate::backend::domain::commands::community::{
    FeedResult, PublishStoryCommand, RateResult, StoryOfTheMonth,
};
use crate::backend::domain::models::rating::Rating as DomainRating;
use crate::backend::domain::models::shared_story::SharedStory as DomainSharedStory;
use crate::backend::domain::rating_aggregator::RatedStory;
use shared::{
    CommunityFeedResponse, CommunityStory, PublishStoryRequest, PublishStoryResponse,
    RateStoryResponse, Rating as SharedRating, SharedStory as SharedStoryDto,
    StoryOfTheMonthResponse,
};

pub struct CommunityMapper;

impl CommunityMapper {
    pub fn shared_story_to_domain(dto: SharedStoryDto) -> Result<DomainSharedStory> {
        Ok(DomainSharedStory {
            created_at: parse_timestamp(&dto.created_at, "created_at")?,
            id: dto.id,
            original_story_id: dto.original_story_id,
            author_name: dto.author_name,
            author_age: dto.author_age,
            title: dto.title,
            description: dto.description,
            theme: dto.theme,
            chapters: dto.chapters.into_iter().map(StoryMapper::chapter_to_domain).collect(),
            cover_image_url: dto.cover_image_url,
            consent_given: dto.consent_given,
            status: dto.status,
            is_featured: dto.is_featured,
        })
    }

    pub fn shared_story_to_dto(domain: DomainSharedStory) -> SharedStoryDto {
        SharedStoryDto {
            id: domain.id,
            original_story_id: domain.original_story_id,
            author_name: domain.author_name,
            author_age: domain.author_age,
            title: domain.title,
            description: domain.description,
            theme: domain.theme,
            chapters: domain.chapters.into_iter().map(StoryMapper::chapter_to_dto).collect(),
            cover_image_url: domain.cover_image_url,
            consent_given: domain.consent_given,
            status: domain.status,
            is_featured: domain.is_featured,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    /// Blank `created_by` means an anonymous rating
    pub fn rating_to_domain(dto: SharedRating) -> Result<DomainRating> {
        Ok(DomainRating {
            created_at: parse_timestamp(&dto.created_at, "created_at")?,
            id: dto.id,
            shared_story_id: dto.shared_story_id,
            rating_value: dto.rating_value,
            created_by: dto.created_by.filter(|email| !email.trim().is_empty()),
        })
    }

    pub fn rating_to_dto(domain: DomainRating) -> SharedRating {
        SharedRating {
            id: domain.id,
            shared_story_id: domain.shared_story_id,
            rating_value: domain.rating_value,
            created_by: domain.created_by,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_publish_command(story_id: String, request: PublishStoryRequest) -> PublishStoryCommand {
        PublishStoryCommand {
            story_id,
            author_name: request.author_name,
            consent_given: request.consent_given,
        }
    }

    pub fn to_publish_response_dto(domain: DomainSharedStory) -> PublishStoryResponse {
        PublishStoryResponse {
            shared_story: Self::shared_story_to_dto(domain),
            success_message: "Story published to the community".to_string(),
        }
    }

    pub fn rated_story_to_dto(rated: RatedStory) -> CommunityStory {
        CommunityStory {
            average_rating: rated.summary.average(),
            rating_count: rated.summary.count,
            user_rating: rated.user_rating,
            story: Self::shared_story_to_dto(rated.story),
        }
    }

    pub fn to_feed_dto(feed: FeedResult) -> CommunityFeedResponse {
        CommunityFeedResponse {
            featured: feed.featured.map(Self::rated_story_to_dto),
            stories: feed.stories.into_iter().map(Self::rated_story_to_dto).collect(),
            filter: feed.filter,
            logged_in: feed.logged_in,
        }
    }

    pub fn to_rate_response_dto(result: RateResult) -> RateStoryResponse {
        RateStoryResponse {
            shared_story_id: result.shared_story_id,
            average_rating: result.average_rating,
            rating_count: result.rating_count,
            user_rating: result.user_rating,
            accepted: result.accepted,
        }
    }

    pub fn to_story_of_the_month_dto(month: StoryOfTheMonth) -> StoryOfTheMonthResponse {
        StoryOfTheMonthResponse {
            winner: month.winner.map(Self::shared_story_to_dto),
            countdown: month.countdown,
        }
    }
}
