//! Storyteller: personalized, illustrated children's stories.
//!
//! The server keeps child profiles, a private story library with reading
//! progress and a rated community feed, and talks to an external backend for
//! text and image generation. See [`backend`] for the layering.

pub mod backend;

pub use backend::{create_router, initialize_backend, initialize_backend_with, AppState};
