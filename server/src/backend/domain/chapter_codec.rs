//! # Chapter Codec
//!
//! Converts between a story's chapter list and a single text blob so a whole
//! story can be edited in one text field.
//!
//! ## Format
//!
//! ```text
//! **First title**
//!
//! First chapter body.
//!
//! ---
//!
//! **Second title**
//!
//! Second chapter body.
//! ```
//!
//! Chapters are separated by [`CHAPTER_SEPARATOR`]. Inside a section the first
//! non-blank line is the title when the whole trimmed line is wrapped in `**`.
//! Everything after the title line is the body, minus leading and trailing
//! blank lines; blank lines between paragraphs are kept. A section without a
//! title line gets `Kapitel N` and keeps all its lines as body.
//!
//! Illustrations cannot be expressed in text, so [`decode`] carries them over
//! by position from the chapters the text was produced from.

use super::models::story::Chapter;

pub const CHAPTER_SEPARATOR: &str = "\n\n---\n\n";

pub fn encode(chapters: &[Chapter]) -> String {
    chapters
        .iter()
        .map(|chapter| format!("**{}**\n\n{}", chapter.title, chapter.content))
        .collect::<Vec<_>>()
        .join(CHAPTER_SEPARATOR)
}

pub fn decode(text: &str, previous: &[Chapter]) -> Vec<Chapter> {
    let normalized = text.replace("\r\n", "\n");

    normalized
        .split(CHAPTER_SEPARATOR)
        .enumerate()
        .map(|(index, section)| {
            let (title, content) = parse_section(section, index);
            let chapter_number = index as u32 + 1;

            let (illustration_prompt, illustration_url) = match previous.get(index) {
                Some(prior) => (prior.illustration_prompt.clone(), prior.illustration_url.clone()),
                None => (placeholder_prompt(&title), None),
            };

            Chapter {
                chapter_number,
                title,
                content,
                illustration_prompt,
                illustration_url,
            }
        })
        .collect()
}

/// Prompt used for chapters added while editing
pub fn placeholder_prompt(title: &str) -> String {
    format!("Children's book illustration for: {}", title)
}

fn parse_section(section: &str, index: usize) -> (String, String) {
    let lines: Vec<&str> = section.lines().collect();
    let first = lines.iter().position(|line| !line.trim().is_empty());

    let Some(first) = first else {
        return (fallback_title(index), String::new());
    };

    match title_of(lines[first]) {
        Some(title) => (title, body_of(&lines[first + 1..])),
        None => (fallback_title(index), body_of(&lines[first..])),
    }
}

fn title_of(line: &str) -> Option<String> {
    let inner = line
        .trim()
        .strip_prefix("**")?
        .strip_suffix("**")?
        .trim();

    if inner.is_empty() {
        None
    } else {
        Some(inner.to_string())
    }
}

fn body_of(lines: &[&str]) -> String {
    let is_blank = |line: &&str| line.trim().is_empty();

    let Some(start) = lines.iter().position(|line| !is_blank(line)) else {
        return String::new();
    };
    let end = lines.iter().rposition(|line| !is_blank(line)).unwrap_or(start);

    lines[start..=end].join("\n")
}

fn fallback_title(index: usize) -> String {
    format!("Kapitel {}", index + 1)
}
