//! # File Storage
//!
//! ```text
//! data/
//! ├── global_config.yaml    active child selection
//! ├── settings.yaml         optional server settings
//! ├── ratings.csv           one row per rating
//! ├── children/{id}.yaml
//! ├── stories/{id}.yaml
//! └── community/{id}.yaml
//! ```
//!
//! Records are stored as the `shared` DTOs and mapped to domain models on load.

pub mod child_repository;
pub mod connection;
pub mod global_config_repository;
pub mod rating_repository;
pub mod shared_story_repository;
pub mod story_repository;

pub use child_repository::ChildRepository;
pub use connection::CsvConnection;
pub use global_config_repository::{GlobalConfig, GlobalConfigRepository};
pub use rating_repository::RatingRepository;
pub use shared_story_repository::SharedStoryRepository;
pub use story_repository::StoryRepository;
