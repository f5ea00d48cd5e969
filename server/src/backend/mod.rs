//! # Backend Module
//!
//! Everything behind the HTTP boundary of the storyteller.
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, story logic)
//!     ↓
//! Storage Layer (YAML/CSV files)    Integrations (text/image generation)
//! ```

pub mod config;
pub mod domain;
pub mod integrations;
pub mod io;
pub mod storage;


use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::config::{ServerConfig, Settings};
use crate::backend::domain::{
    ActiveChildService, ChildService, CommunityService, GenerationService, StoryService,
};
use crate::backend::integrations::{HttpIntegrationClient, IntegrationClient};
use crate::backend::io::rest::{active_child_apis, child_apis, community_apis, story_apis};
use crate::backend::storage::{
    ChildRepository, CsvConnection, GlobalConfigRepository, RatingRepository,
    SharedStoryRepository, StoryRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub child_service: ChildService,
    pub active_child_service: ActiveChildService,
    pub generation_service: GenerationService,
    pub story_service: StoryService,
    pub community_service: CommunityService,
    pub cors_origin: String,
}

/// Initialize the backend from the loaded configuration
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up data directory");
    let connection = CsvConnection::new(&config.data_directory)?;

    info!("Setting up integrations client for {}", config.settings.integrations_url);
    let integrations = HttpIntegrationClient::new(
        config.settings.integrations_url.clone(),
        config.integrations_api_key.clone(),
    )
    .context("Failed to create integrations client")?;

    Ok(initialize_backend_with(connection, Arc::new(integrations), &config.settings))
}

/// Wires the services over an existing data directory and generation client
pub fn initialize_backend_with(
    connection: CsvConnection,
    integrations: Arc<dyn IntegrationClient>,
    settings: &Settings,
) -> AppState {
    info!("Setting up domain model");
    let child_repository = Arc::new(ChildRepository::new(connection.clone()));
    let story_repository = Arc::new(StoryRepository::new(connection.clone()));
    let session = Arc::new(GlobalConfigRepository::new(connection.clone()));
    let shared_story_repository = Arc::new(SharedStoryRepository::new(connection.clone()));
    let rating_repository = Arc::new(RatingRepository::new(connection));

    let child_service = ChildService::new(child_repository.clone());
    let active_child_service =
        ActiveChildService::new(session, child_repository.clone(), settings.eager_active_child);
    let generation_service = GenerationService::new(
        child_repository.clone(),
        active_child_service.clone(),
        integrations,
        settings.story_language.clone(),
    );
    let story_service = StoryService::new(story_repository.clone());
    let community_service = CommunityService::new(
        story_repository,
        child_repository,
        shared_story_repository,
        rating_repository,
        settings.rating_requires_login,
    );

    AppState {
        child_service,
        active_child_service,
        generation_service,
        story_service,
        community_service,
        cors_origin: settings.cors_origin.clone(),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    match app_state.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => warn!("Invalid CORS origin '{}'; cross-origin requests disabled", app_state.cors_origin),
    }

    let api_routes = Router::new()
        .nest("/children", child_apis::router())
        .nest("/active-child", active_child_apis::router())
        .nest("/stories", story_apis::router())
        .nest("/community", community_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
