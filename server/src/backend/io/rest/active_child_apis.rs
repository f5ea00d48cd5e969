//! # REST API for the Active Child
//!
//! Resolve, select and clear the child used as the default for generation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use super::errors::ApiError;
use crate::backend::io::rest::mappers::child_mapper::ChildMapper;
use crate::backend::AppState;
use shared::SetActiveChildRequest;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_active_child).put(set_active_child).delete(clear_active_child),
    )
}

pub async fn get_active_child(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/active-child");

    match state.active_child_service.active_child().await {
        Ok(child) => (StatusCode::OK, Json(ChildMapper::to_active_child_dto(child))).into_response(),
        Err(e) => {
            error!("Failed to get active child: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// An unknown child id answers with `active_child: null`
pub async fn set_active_child(
    State(state): State<AppState>,
    Json(request): Json<SetActiveChildRequest>,
) -> impl IntoResponse {
    info!("PUT /api/active-child - request: {:?}", request);

    match state.active_child_service.select(&request.child_id).await {
        Ok(child) => (StatusCode::OK, Json(ChildMapper::to_active_child_dto(child))).into_response(),
        Err(e) => {
            error!("Failed to set active child: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn clear_active_child(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/active-child");

    match state.active_child_service.clear().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to clear active child: {:#}", e);
            ApiError::from(e).into_response()
        }
    }
}
