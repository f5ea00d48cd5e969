//! # REST API for Stories
//!
//! Draft generation, the private library, text editing and reading progress.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};

use super::community_apis;
use super::errors::ApiError;
use crate::backend::io::rest::mappers::story_mapper::StoryMapper;
use crate::backend::AppState;
use shared::{EditStoryRequest, GenerateStoryRequest, GoToChapterRequest, SaveStoryRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stories).post(save_story))
        .route("/generate", post(generate_story))
        .route("/:id", get(get_story).put(edit_story).delete(delete_story))
        .route("/:id/text", get(get_story_text))
        .route("/:id/progress", post(go_to_chapter))
        .route("/:id/publish", post(community_apis::publish_story))
}

/// Generates an unsaved draft
pub async fn generate_story(
    State(state): State<AppState>,
    Json(request): Json<GenerateStoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/stories/generate - request: {:?}", request);

    let command = StoryMapper::to_generate_command(request);
    match state.generation_service.generate(command).await {
        Ok(draft) => (StatusCode::OK, Json(StoryMapper::draft_to_dto(draft))).into_response(),
        Err(e) => {
            error!("Failed to generate story: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn save_story(
    State(state): State<AppState>,
    Json(request): Json<SaveStoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/stories - title: {}", request.draft.title);

    let command = StoryMapper::to_save_command(request);
    match state.story_service.save_draft(command).await {
        Ok(story) => (
            StatusCode::CREATED,
            Json(StoryMapper::to_story_response_dto(story, "Story saved to the library")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to save story: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn list_stories(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/stories");

    match state.story_service.list_stories().await {
        Ok(stories) => (StatusCode::OK, Json(StoryMapper::to_story_list_dto(stories))).into_response(),
        Err(e) => {
            error!("Failed to list stories: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn get_story(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/stories/{}", story_id);

    match state.story_service.get_story(&story_id).await {
        Ok(Some(story)) => (StatusCode::OK, Json(StoryMapper::to_dto(story))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Story not found").into_response(),
        Err(e) => {
            error!("Failed to get story: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn get_story_text(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/stories/{}/text", story_id);

    match state.story_service.story_text(&story_id).await {
        Ok(text) => (StatusCode::OK, Json(StoryMapper::to_story_text_dto(text))).into_response(),
        Err(e) => {
            error!("Failed to render story text: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn edit_story(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
    Json(request): Json<EditStoryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/stories/{}", story_id);

    let command = StoryMapper::to_edit_command(story_id, request);
    match state.story_service.edit_story(command).await {
        Ok(story) => (
            StatusCode::OK,
            Json(StoryMapper::to_story_response_dto(story, "Story updated")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to edit story: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn go_to_chapter(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
    Json(request): Json<GoToChapterRequest>,
) -> impl IntoResponse {
    info!("POST /api/stories/{}/progress - chapter {}", story_id, request.chapter);

    match state.story_service.go_to_chapter(&story_id, request.chapter).await {
        Ok(result) => (StatusCode::OK, Json(StoryMapper::to_progress_dto(result))).into_response(),
        Err(e) => {
            error!("Failed to update reading progress: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn delete_story(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/stories/{}", story_id);

    match state.story_service.delete_story(&story_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete story: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}
