pub mod child;
pub mod rating;
pub mod shared_story;
pub mod story;
pub mod user;

/// Raised when an id does not resolve to a stored record
#[derive(Debug, thiserror::Error)]
#[error("{kind} not found: {id}")]
pub struct EntityNotFound {
    pub kind: &'static str,
    pub id: String,
}

impl EntityNotFound {
    pub fn child(id: &str) -> Self {
        Self { kind: "Child", id: id.to_string() }
    }

    pub fn story(id: &str) -> Self {
        Self { kind: "Story", id: id.to_string() }
    }

    pub fn shared_story(id: &str) -> Self {
        Self { kind: "Shared story", id: id.to_string() }
    }
}
