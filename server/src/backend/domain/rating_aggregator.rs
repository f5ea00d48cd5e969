//! # Rating Aggregator
//!
//! Folds individual rating records into per-story totals and arranges the
//! community feed. One rating per user and story is enforced here, at the
//! caller's boundary; the rating store itself accepts duplicates.

use std::cmp::Ordering;
use std::collections::HashMap;

use shared::FeedFilter;

use super::models::rating::Rating;
use super::models::shared_story::SharedStory;
use super::models::user::User;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSummary {
    pub total: u32,
    pub count: u32,
}

impl RatingSummary {
    /// 0.0 for an unrated story
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            f64::from(self.total) / f64::from(self.count)
        }
    }

    fn add(&mut self, value: u8) {
        self.total += u32::from(value);
        self.count += 1;
    }
}

pub fn aggregate(ratings: &[Rating]) -> HashMap<String, RatingSummary> {
    let mut summaries: HashMap<String, RatingSummary> = HashMap::new();
    for rating in ratings {
        summaries
            .entry(rating.shared_story_id.clone())
            .or_default()
            .add(rating.rating_value);
    }
    summaries
}

/// The given user's rating per story
pub fn user_ratings(ratings: &[Rating], user: &User) -> HashMap<String, u8> {
    ratings
        .iter()
        .filter(|rating| rating.created_by.as_deref() == Some(user.email.as_str()))
        .map(|rating| (rating.shared_story_id.clone(), rating.rating_value))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    /// The user already rated this story with the contained value
    AlreadyRated(u8),
}

/// Ratings as seen by one (possibly anonymous) user
#[derive(Debug, Clone, Default)]
pub struct RatingBook {
    summaries: HashMap<String, RatingSummary>,
    own: HashMap<String, u8>,
    logged_in: bool,
}

impl RatingBook {
    pub fn new(ratings: &[Rating], user: Option<&User>) -> Self {
        Self {
            summaries: aggregate(ratings),
            own: user.map(|u| user_ratings(ratings, u)).unwrap_or_default(),
            logged_in: user.is_some(),
        }
    }

    pub fn summary(&self, story_id: &str) -> RatingSummary {
        self.summaries.get(story_id).copied().unwrap_or_default()
    }

    pub fn user_rating(&self, story_id: &str) -> Option<u8> {
        self.own.get(story_id).copied()
    }

    /// Records a rating unless the user already rated the story.
    /// Anonymous submissions are always counted.
    pub fn submit(&mut self, story_id: &str, value: u8) -> SubmitOutcome {
        if let Some(existing) = self.user_rating(story_id) {
            return SubmitOutcome::AlreadyRated(existing);
        }

        self.summaries.entry(story_id.to_string()).or_default().add(value);
        if self.logged_in {
            self.own.insert(story_id.to_string(), value);
        }
        SubmitOutcome::Accepted
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatedStory {
    pub story: SharedStory,
    pub summary: RatingSummary,
    pub user_rating: Option<u8>,
}

pub fn rate_stories(stories: Vec<SharedStory>, book: &RatingBook) -> Vec<RatedStory> {
    stories
        .into_iter()
        .map(|story| RatedStory {
            summary: book.summary(&story.id),
            user_rating: book.user_rating(&story.id),
            story,
        })
        .collect()
}

/// Splits off the featured story (newest if several) and orders the rest
pub fn arrange_feed(
    stories: Vec<RatedStory>,
    filter: FeedFilter,
) -> (Option<RatedStory>, Vec<RatedStory>) {
    let (featured, mut rest): (Vec<RatedStory>, Vec<RatedStory>) =
        stories.into_iter().partition(|s| s.story.is_featured);

    let featured = featured
        .into_iter()
        .max_by_key(|s| s.story.created_at);

    match filter {
        FeedFilter::Newest => {
            rest.sort_by(newest_first);
        }
        FeedFilter::Trending => {
            rest.retain(|s| s.summary.count > 0);
            rest.sort_by(|a, b| {
                b.summary
                    .average()
                    .partial_cmp(&a.summary.average())
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| b.summary.count.cmp(&a.summary.count))
            });
        }
        FeedFilter::Unrated => {
            rest.retain(|s| s.summary.count == 0);
            rest.sort_by(newest_first);
        }
    }

    (featured, rest)
}

fn newest_first(a: &RatedStory, b: &RatedStory) -> Ordering {
    b.story.created_at.cmp(&a.story.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use shared::SharedStoryStatus;

    fn rating(story_id: &str, value: u8, by: Option<&str>) -> Rating {
        Rating {
            id: Rating::generate_id(),
            shared_story_id: story_id.to_string(),
            rating_value: value,
            created_by: by.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn shared(id: &str, minutes_ago: i64, featured: bool) -> SharedStory {
        SharedStory {
            id: id.to_string(),
            original_story_id: format!("story::{}", id),
            author_name: "Emma E.".to_string(),
            author_age: Some(7),
            title: id.to_uppercase(),
            description: String::new(),
            theme: "Dinosaurer".to_string(),
            chapters: vec![],
            cover_image_url: None,
            consent_given: true,
            status: SharedStoryStatus::Published,
            is_featured: featured,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_average_of_three_and_five() {
        let summaries = aggregate(&[rating("s1", 3, None), rating("s1", 5, None)]);
        let summary = summaries["s1"];
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, 8);
        assert_eq!(summary.average(), 4.0);
    }

    #[test]
    fn test_unrated_story_averages_zero() {
        let book = RatingBook::new(&[], None);
        let summary = book.summary("nothing");
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average(), 0.0);
    }

    #[test]
    fn test_user_ratings_only_include_own() {
        let ratings = vec![
            rating("s1", 4, Some("a@example.com")),
            rating("s2", 2, Some("b@example.com")),
        ];
        let own = user_ratings(&ratings, &User::new("a@example.com"));
        assert_eq!(own.len(), 1);
        assert_eq!(own["s1"], 4);
    }

    #[test]
    fn test_second_submission_is_ignored() {
        let user = User::new("a@example.com");
        let mut book = RatingBook::new(&[rating("s1", 3, Some("a@example.com"))], Some(&user));

        assert_eq!(book.submit("s1", 5), SubmitOutcome::AlreadyRated(3));
        assert_eq!(book.summary("s1"), RatingSummary { total: 3, count: 1 });

        assert_eq!(book.submit("s2", 5), SubmitOutcome::Accepted);
        assert_eq!(book.submit("s2", 1), SubmitOutcome::AlreadyRated(5));
        assert_eq!(book.summary("s2").count, 1);
    }

    #[test]
    fn test_anonymous_submissions_are_counted() {
        let mut book = RatingBook::new(&[], None);
        assert_eq!(book.submit("s1", 5), SubmitOutcome::Accepted);
        assert_eq!(book.submit("s1", 3), SubmitOutcome::Accepted);
        assert_eq!(book.summary("s1").count, 2);
        assert_eq!(book.user_rating("s1"), None);
    }

    #[test]
    fn test_trending_orders_by_average_then_count() {
        let ratings = vec![
            rating("low", 2, None),
            rating("few", 5, None),
            rating("many", 5, None),
            rating("many", 5, None),
        ];
        let book = RatingBook::new(&ratings, None);
        let stories = rate_stories(
            vec![shared("low", 1, false), shared("few", 2, false), shared("many", 3, false), shared("none", 4, false)],
            &book,
        );

        let (_, trending) = arrange_feed(stories, FeedFilter::Trending);
        let ids: Vec<&str> = trending.iter().map(|s| s.story.id.as_str()).collect();
        assert_eq!(ids, vec!["many", "few", "low"]);
    }

    #[test]
    fn test_unrated_and_newest_filters() {
        let book = RatingBook::new(&[rating("rated", 4, None)], None);
        let stories = rate_stories(
            vec![shared("old", 30, false), shared("rated", 20, false), shared("new", 10, false)],
            &book,
        );

        let (_, newest) = arrange_feed(stories.clone(), FeedFilter::Newest);
        let ids: Vec<&str> = newest.iter().map(|s| s.story.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "rated", "old"]);

        let (_, unrated) = arrange_feed(stories, FeedFilter::Unrated);
        let ids: Vec<&str> = unrated.iter().map(|s| s.story.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn test_featured_story_is_split_out() {
        let book = RatingBook::new(&[], None);
        let stories = rate_stories(
            vec![shared("plain", 5, false), shared("older-star", 50, true), shared("star", 1, true)],
            &book,
        );

        let (featured, rest) = arrange_feed(stories, FeedFilter::Newest);
        assert_eq!(featured.map(|s| s.story.id), Some("star".to_string()));
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].story.id, "plain");
    }
}
