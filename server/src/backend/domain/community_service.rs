//! The community feed.
//!
//! Library stories are copied into the feed with parental consent, rated by
//! users (one rating per user and story) and one of them can be featured as
//! story of the month.

use anyhow::Result;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

use shared::{Countdown, FeedFilter, SharedStoryStatus};

use super::commands::community::{FeedResult, PublishStoryCommand, RateResult, StoryOfTheMonth};
use super::models::rating::{Rating, RatingError, MAX_RATING, MIN_RATING};
use super::models::shared_story::{PublishValidationError, SharedStory};
use super::models::user::User;
use super::models::EntityNotFound;
use super::rating_aggregator::{arrange_feed, rate_stories, RatedStory, RatingBook, SubmitOutcome};
use crate::backend::storage::{ChildStorage, RatingStorage, SharedStoryStorage, StoryStorage};

#[derive(Clone)]
pub struct CommunityService {
    story_repository: Arc<dyn StoryStorage>,
    child_repository: Arc<dyn ChildStorage>,
    shared_story_repository: Arc<dyn SharedStoryStorage>,
    rating_repository: Arc<dyn RatingStorage>,
    rating_requires_login: bool,
    /// Serialises read-check-write sequences (rating, featuring)
    write_lock: Arc<Mutex<()>>,
}

impl CommunityService {
    pub fn new(
        story_repository: Arc<dyn StoryStorage>,
        child_repository: Arc<dyn ChildStorage>,
        shared_story_repository: Arc<dyn SharedStoryStorage>,
        rating_repository: Arc<dyn RatingStorage>,
        rating_requires_login: bool,
    ) -> Self {
        Self {
            story_repository,
            child_repository,
            shared_story_repository,
            rating_repository,
            rating_requires_login,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Copies a library story into the feed
    pub async fn publish(&self, command: PublishStoryCommand) -> Result<SharedStory> {
        info!("Publishing story {}", command.story_id);

        if !command.consent_given {
            return Err(PublishValidationError::ConsentMissing.into());
        }
        let author_name = command.author_name.trim();
        if author_name.is_empty() {
            return Err(PublishValidationError::EmptyAuthorName.into());
        }

        let story = self
            .story_repository
            .get_story(&command.story_id)
            .await?
            .ok_or_else(|| EntityNotFound::story(&command.story_id))?;

        let child = match story.child_id.as_deref() {
            Some(child_id) => self.child_repository.get_child(child_id).await?,
            None => None,
        };
        let child = child
            .filter(|c| c.has_parent_email())
            .ok_or(PublishValidationError::MissingParentEmail)?;

        let shared_story = SharedStory {
            id: SharedStory::generate_id(),
            original_story_id: story.id,
            author_name: author_name.to_string(),
            author_age: Some(child.age),
            title: story.title,
            description: story.description,
            theme: story.theme,
            chapters: story.chapters,
            cover_image_url: story.cover_image_url,
            consent_given: true,
            status: SharedStoryStatus::Published,
            is_featured: false,
            created_at: Utc::now(),
        };

        self.shared_story_repository.store_shared_story(&shared_story).await?;
        info!("Published '{}' as {}", shared_story.title, shared_story.id);
        Ok(shared_story)
    }

    pub async fn feed(&self, user: Option<&User>, filter: FeedFilter) -> Result<FeedResult> {
        let stories = self.published_stories().await?;
        let ratings = self.rating_repository.list_ratings().await?;
        let book = RatingBook::new(&ratings, user);

        let (featured, stories) = arrange_feed(rate_stories(stories, &book), filter);
        info!("Community feed ({:?}): {} stories", filter, stories.len());

        Ok(FeedResult {
            featured,
            stories,
            filter,
            logged_in: user.is_some(),
        })
    }

    /// A published story with its rating aggregate
    pub async fn get_shared_story(&self, story_id: &str, user: Option<&User>) -> Result<RatedStory> {
        let story = self.require_published(story_id).await?;
        let ratings = self.rating_repository.list_ratings().await?;
        let book = RatingBook::new(&ratings, user);

        Ok(RatedStory {
            summary: book.summary(&story.id),
            user_rating: book.user_rating(&story.id),
            story,
        })
    }

    /// Rates a story. A user's second rating of the same story changes nothing.
    pub async fn rate(&self, user: Option<&User>, story_id: &str, value: u8) -> Result<RateResult> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(RatingError::ValueOutOfRange(value).into());
        }
        if user.is_none() && self.rating_requires_login {
            return Err(RatingError::LoginRequired.into());
        }

        let _guard = self.write_lock.lock().await;
        let story = self.require_published(story_id).await?;

        let ratings = self.rating_repository.list_ratings().await?;
        let mut book = RatingBook::new(&ratings, user);

        let (accepted, user_rating) = match book.submit(&story.id, value) {
            SubmitOutcome::Accepted => {
                let rating = Rating {
                    id: Rating::generate_id(),
                    shared_story_id: story.id.clone(),
                    rating_value: value,
                    created_by: user.map(|u| u.email.clone()),
                    created_at: Utc::now(),
                };
                self.rating_repository.store_rating(&rating).await?;
                (true, value)
            }
            SubmitOutcome::AlreadyRated(existing) => {
                warn!("{} already rated story {}", user.map(|u| u.email.as_str()).unwrap_or("anonymous"), story.id);
                (false, existing)
            }
        };

        let summary = book.summary(&story.id);
        Ok(RateResult {
            shared_story_id: story.id,
            average_rating: summary.average(),
            rating_count: summary.count,
            user_rating,
            accepted,
        })
    }

    /// Makes `story_id` the only featured story
    pub async fn feature(&self, story_id: &str) -> Result<SharedStory> {
        let _guard = self.write_lock.lock().await;
        let mut story = self.require_published(story_id).await?;

        for mut other in self.shared_story_repository.list_shared_stories().await? {
            if other.is_featured && other.id != story.id {
                other.is_featured = false;
                self.shared_story_repository.update_shared_story(&other).await?;
                info!("Unfeatured story {}", other.id);
            }
        }

        if !story.is_featured {
            story.is_featured = true;
            self.shared_story_repository.update_shared_story(&story).await?;
        }
        info!("Featured story {} ('{}')", story.id, story.title);
        Ok(story)
    }

    pub async fn story_of_the_month(&self, now: DateTime<Utc>) -> Result<StoryOfTheMonth> {
        let winner = self
            .published_stories()
            .await?
            .into_iter()
            .filter(|s| s.is_featured)
            .max_by_key(|s| s.created_at);

        Ok(StoryOfTheMonth {
            winner,
            countdown: countdown_to_next_month(now),
        })
    }

    async fn published_stories(&self) -> Result<Vec<SharedStory>> {
        Ok(self
            .shared_story_repository
            .list_shared_stories()
            .await?
            .into_iter()
            .filter(SharedStory::is_published)
            .collect())
    }

    async fn require_published(&self, story_id: &str) -> Result<SharedStory> {
        Ok(self
            .shared_story_repository
            .get_shared_story(story_id)
            .await?
            .filter(SharedStory::is_published)
            .ok_or_else(|| EntityNotFound::shared_story(story_id))?)
    }
}

/// Time left until the first instant of next month (UTC); zeros once past
pub fn countdown_to_next_month(now: DateTime<Utc>) -> Countdown {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };

    let remaining = Utc
        .with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .map(|next| (next - now).num_seconds().max(0))
        .unwrap_or(0);

    Countdown {
        days: remaining / 86_400,
        hours: remaining % 86_400 / 3_600,
        minutes: remaining % 3_600 / 60,
        seconds: remaining % 60,
    }
}
