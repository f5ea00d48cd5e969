//! # Story Parameters
//!
//! Derives the length of a generated story from the child's age and reading
//! level. Younger children get fewer, shorter chapters; the reading level
//! scales the words per chapter.

use super::models::child::ReadingLevel;

const MIN_CHAPTERS: u32 = 3;
const MIN_BASE_WORDS: i64 = 50;
const WORDS_PER_YEAR: i64 = 20;
const MAX_BASE_WORDS: i64 = 200;
const YOUNGEST_AGE: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryParameters {
    pub chapter_count: u32,
    pub words_per_chapter: u32,
    pub total_words: u32,
}

impl StoryParameters {
    /// An unknown reading level tag uses a multiplier of 1.0.
    pub fn derive(age: u8, reading_level: &str) -> Self {
        let chapter_count = MIN_CHAPTERS.max(u32::from(age));

        let base_words = (MIN_BASE_WORDS + (i64::from(age) - YOUNGEST_AGE) * WORDS_PER_YEAR)
            .clamp(MIN_BASE_WORDS, MAX_BASE_WORDS);

        let multiplier = ReadingLevel::from_tag(reading_level)
            .map(|level| level.word_multiplier())
            .unwrap_or(1.0);

        let words_per_chapter = (base_words as f64 * multiplier).round() as u32;

        Self {
            chapter_count,
            words_per_chapter,
            total_words: chapter_count * words_per_chapter,
        }
    }
}
