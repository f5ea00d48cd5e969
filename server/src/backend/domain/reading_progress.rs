//! # Reading Progress
//!
//! Which chapter a reader is on. States are `1..=chapter_count`; reaching the
//! last chapter sets `completed`, but the reader can still move anywhere.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingProgress {
    current_chapter: u32,
    chapter_count: u32,
    completed: bool,
}

impl ReadingProgress {
    /// Starts from a stored chapter, clamped into `1..=chapter_count`
    pub fn new(current_chapter: u32, chapter_count: u32) -> Self {
        let current_chapter = current_chapter.max(1).min(chapter_count.max(1));
        Self {
            current_chapter,
            chapter_count,
            completed: current_chapter >= chapter_count,
        }
    }

    pub fn current_chapter(&self) -> u32 {
        self.current_chapter
    }

    pub fn chapter_count(&self) -> u32 {
        self.chapter_count
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns false and leaves the state alone when `chapter` is out of range
    pub fn go_to_chapter(&mut self, chapter: i64) -> bool {
        let chapter = match u32::try_from(chapter) {
            Ok(chapter) if chapter >= 1 && chapter <= self.chapter_count => chapter,
            _ => return false,
        };
        self.current_chapter = chapter;
        self.completed = chapter >= self.chapter_count;
        true
    }

    /// Percentage through the story, for progress bars
    pub fn percent(&self) -> f64 {
        if self.chapter_count == 0 {
            return 0.0;
        }
        f64::from(self.current_chapter) / f64::from(self.chapter_count) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_a_no_op() {
        let mut progress = ReadingProgress::new(2, 4);

        assert!(!progress.go_to_chapter(0));
        assert_eq!(progress.current_chapter(), 2);

        assert!(!progress.go_to_chapter(5));
        assert_eq!(progress.current_chapter(), 2);
        assert!(!progress.completed());

        assert!(!progress.go_to_chapter(-3));
        assert!(!progress.go_to_chapter(i64::MAX));
        assert_eq!(progress.current_chapter(), 2);
    }

    #[test]
    fn test_last_chapter_completes() {
        let mut progress = ReadingProgress::new(1, 4);
        assert!(progress.go_to_chapter(4));
        assert!(progress.completed());
        assert_eq!(progress.percent(), 100.0);
    }

    #[test]
    fn test_can_move_back_after_completion() {
        let mut progress = ReadingProgress::new(4, 4);
        assert!(progress.completed());

        assert!(progress.go_to_chapter(2));
        assert_eq!(progress.current_chapter(), 2);
        assert!(!progress.completed());
    }

    #[test]
    fn test_new_clamps_stale_progress() {
        let progress = ReadingProgress::new(9, 3);
        assert_eq!(progress.current_chapter(), 3);
        assert!(progress.completed());

        let progress = ReadingProgress::new(0, 3);
        assert_eq!(progress.current_chapter(), 1);
        assert!(!progress.completed());
    }

    #[test]
    fn test_single_chapter_story_is_complete_on_open() {
        let progress = ReadingProgress::new(1, 1);
        assert!(progress.completed());
    }
}
