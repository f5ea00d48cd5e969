//! # REST API Interface Layer
//!
//! HTTP endpoints under `/api`. Handlers log the request, map the `shared`
//! DTOs onto domain commands, call one service and map the result back.
//! Service errors become status codes in [`errors`]: validation 400, unknown
//! ids 404, missing login 401, generation backend failures 502.

pub mod active_child_apis;
pub mod child_apis;
pub mod community_apis;
pub mod errors;
pub mod identity;
pub mod mappers;
pub mod story_apis;

pub use errors::ApiError;
pub use identity::{CurrentUser, USER_EMAIL_HEADER};
