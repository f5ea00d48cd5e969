//! # REST API for Child Management
//!
//! Endpoints for creating, listing, retrieving and deleting child profiles,
//! plus the story parameters derived for a child.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use super::errors::ApiError;
use crate::backend::io::rest::mappers::child_mapper::ChildMapper;
use crate::backend::AppState;
use shared::CreateChildRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_children).post(create_child))
        .route("/:id", get(get_child).delete(delete_child))
        .route("/:id/story-parameters", get(get_story_parameters))
}

pub async fn create_child(
    State(state): State<AppState>,
    Json(request): Json<CreateChildRequest>,
) -> impl IntoResponse {
    info!("POST /api/children - request: {:?}", request);

    let command = ChildMapper::to_create_command(request);
    match state.child_service.create_child(command).await {
        Ok(child) => (
            StatusCode::CREATED,
            Json(ChildMapper::to_child_response_dto(child, "Child created successfully")),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create child: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn list_children(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/children");

    match state.child_service.list_children().await {
        Ok(children) => (StatusCode::OK, Json(ChildMapper::to_child_list_dto(children))).into_response(),
        Err(e) => {
            error!("Failed to list children: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn get_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}", child_id);

    match state.child_service.get_child(&child_id).await {
        Ok(Some(child)) => (StatusCode::OK, Json(ChildMapper::to_dto(child))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Child not found").into_response(),
        Err(e) => {
            error!("Failed to get child: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn delete_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/children/{}", child_id);

    match state.child_service.delete_child(&child_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete child: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn get_story_parameters(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}/story-parameters", child_id);

    match state.child_service.story_parameters(&child_id).await {
        Ok(parameters) => {
            (StatusCode::OK, Json(ChildMapper::to_story_parameters_dto(parameters))).into_response()
        }
        Err(e) => {
            error!("Failed to derive story parameters: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}
