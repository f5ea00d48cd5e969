//! # Domain Module
//!
//! Business logic of the storyteller: child profiles, the active child
//! session, story generation, the private library with reading progress, and
//! the community feed with ratings.
//!
//! ## Module Organization
//!
//! - **models**: Domain entities and their validation errors
//! - **commands**: Inputs and results of service operations
//! - **story_parameters**: Story length from age and reading level
//! - **chapter_codec**: Chapters to and from one editable text blob
//! - **reading_progress**: Chapter navigation and completion
//! - **rating_aggregator**: Rating totals, per-user ratings and feed ordering
//! - **\*_service**: Orchestration over the storage traits
//!
//! Services return `anyhow::Result`; validation failures are typed errors from
//! [`models`] that the REST layer maps onto status codes.

pub mod active_child_service;
pub mod chapter_codec;
pub mod child_service;
pub mod commands;
pub mod community_service;
pub mod generation_service;
pub mod models;
pub mod rating_aggregator;
pub mod reading_progress;
pub mod story_parameters;
pub mod story_service;

pub use active_child_service::ActiveChildService;
pub use child_service::ChildService;
pub use community_service::CommunityService;
pub use generation_service::{GenerationError, GenerationService};
pub use story_service::StoryService;
