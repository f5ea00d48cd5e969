use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const MIN_CHILD_AGE: u8 = 3;
pub const MAX_CHILD_AGE: u8 = 12;
pub const MAX_NAME_LENGTH: usize = 100;
pub const DEFAULT_AVATAR_COLOR: &str = "#FF6B9D";

#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub interests: Vec<String>,
    pub avatar_color: String,
    /// Raw tag as stored; see [`ReadingLevel::from_tag`]
    pub reading_level: String,
    pub parent_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Child {
    pub fn generate_id() -> String {
        format!("child::{}", Uuid::new_v4().simple())
    }

    /// Publishing requires a guardian contact on file
    pub fn has_parent_email(&self) -> bool {
        self.parent_email
            .as_deref()
            .map(|email| !email.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Three-tier difficulty that scales generated text length.
/// Both the Danish tags and the English form values are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingLevel {
    Easy,
    Standard,
    Challenging,
}

impl ReadingLevel {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "let" | "beginner" => Some(Self::Easy),
            "standard" | "intermediate" => Some(Self::Standard),
            "udfordrende" | "advanced" => Some(Self::Challenging),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Easy => "let",
            Self::Standard => "standard",
            Self::Challenging => "udfordrende",
        }
    }

    pub fn word_multiplier(&self) -> f64 {
        match self {
            Self::Easy => 0.75,
            Self::Standard => 1.0,
            Self::Challenging => 1.25,
        }
    }

    /// Label used inside generation prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Let",
            Self::Standard => "Standard",
            Self::Challenging => "Udfordrende",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChildValidationError {
    #[error("Child name cannot be empty")]
    EmptyName,
    #[error("Child name cannot exceed 100 characters")]
    NameTooLong,
    #[error("Age must be between 3 and 12, got {0}")]
    AgeOutOfRange(u8),
    #[error("Unknown reading level: {0}")]
    UnknownReadingLevel(String),
    #[error("Invalid parent email address: {0}")]
    InvalidEmail(String),
}

/// `local@domain.tld` with no whitespace anywhere
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
