//! # REST API for the Community
//!
//! Publishing, the rated feed, ratings and the story of the month. Requests
//! carrying `x-user-email` see their own ratings.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use log::{error, info};

use super::errors::ApiError;
use super::identity::CurrentUser;
use crate::backend::io::rest::mappers::community_mapper::CommunityMapper;
use crate::backend::AppState;
use shared::{CommunityFeedQuery, PublishStoryRequest, RateStoryRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_feed))
        .route("/story-of-the-month", get(get_story_of_the_month))
        .route("/:id", get(get_shared_story))
        .route("/:id/ratings", post(rate_story))
        .route("/:id/feature", post(feature_story))
}

/// `POST /api/stories/:id/publish`
pub async fn publish_story(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
    Json(request): Json<PublishStoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/stories/{}/publish - author: {}", story_id, request.author_name);

    let command = CommunityMapper::to_publish_command(story_id, request);
    match state.community_service.publish(command).await {
        Ok(shared_story) => (
            StatusCode::CREATED,
            Json(CommunityMapper::to_publish_response_dto(shared_story)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to publish story: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn get_feed(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<CommunityFeedQuery>,
) -> impl IntoResponse {
    info!("GET /api/community?filter={:?}", query.filter);

    match state.community_service.feed(user.user(), query.filter).await {
        Ok(feed) => (StatusCode::OK, Json(CommunityMapper::to_feed_dto(feed))).into_response(),
        Err(e) => {
            error!("Failed to load community feed: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn get_shared_story(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(story_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/community/{}", story_id);

    match state.community_service.get_shared_story(&story_id, user.user()).await {
        Ok(rated) => (StatusCode::OK, Json(CommunityMapper::rated_story_to_dto(rated))).into_response(),
        Err(e) => {
            error!("Failed to get shared story: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn rate_story(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(story_id): Path<String>,
    Json(request): Json<RateStoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/community/{}/ratings - {} stars", story_id, request.rating_value);

    match state
        .community_service
        .rate(user.user(), &story_id, request.rating_value)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(CommunityMapper::to_rate_response_dto(result))).into_response(),
        Err(e) => {
            error!("Failed to rate story: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn feature_story(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/community/{}/feature", story_id);

    match state.community_service.feature(&story_id).await {
        Ok(story) => (StatusCode::OK, Json(CommunityMapper::shared_story_to_dto(story))).into_response(),
        Err(e) => {
            error!("Failed to feature story: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn get_story_of_the_month(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/community/story-of-the-month");

    match state.community_service.story_of_the_month(Utc::now()).await {
        Ok(month) => {
            (StatusCode::OK, Json(CommunityMapper::to_story_of_the_month_dto(month))).into_response()
        }
        Err(e) => {
            error!("Failed to load story of the month: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}
