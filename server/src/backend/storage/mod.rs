//! # Storage Module
//!
//! Persistence for child profiles, library stories, community stories and
//! ratings. Domain services only see the traits in [`traits`]; the file
//! backed repositories in [`csv`] keep everything under one data directory.

pub mod csv;
pub mod traits;

pub use self::csv::{
    ChildRepository, CsvConnection, GlobalConfigRepository, RatingRepository,
    SharedStoryRepository, StoryRepository,
};
pub use traits::{
    ActiveChildStorage, ChildStorage, RatingStorage, SharedStoryStorage, StoryStorage,
};
