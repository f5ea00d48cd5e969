use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::{Arc, Mutex};

use super::connection::CsvConnection;
use crate::backend::domain::models::rating::Rating as DomainRating;
use crate::backend::io::rest::mappers::community_mapper::CommunityMapper;
use crate::backend::storage::traits::RatingStorage;
use shared::Rating as SharedRating;

/// Ratings as rows of a single CSV file:
/// `id,shared_story_id,rating_value,created_by,created_at`
#[derive(Clone)]
pub struct RatingRepository {
    connection: CsvConnection,
    write_lock: Arc<Mutex<()>>,
}

impl RatingRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            connection,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn read_all(&self) -> Result<Vec<DomainRating>> {
        let file_path = self.connection.ratings_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ::csv::Reader::from_reader(BufReader::new(file));

        let mut ratings = Vec::new();
        for (line, result) in csv_reader.deserialize::<SharedRating>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping malformed rating row {}: {}", line + 2, e);
                    continue;
                }
            };
            match CommunityMapper::rating_to_domain(row) {
                Ok(rating) => ratings.push(rating),
                Err(e) => warn!("Skipping rating row {}: {:#}", line + 2, e),
            }
        }
        Ok(ratings)
    }
}

#[async_trait]
impl RatingStorage for RatingRepository {
    async fn store_rating(&self, rating: &DomainRating) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("Rating file lock poisoned"))?;

        let file_path = self.connection.ratings_file_path();
        let needs_header = std::fs::metadata(&file_path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;

        let mut csv_writer = ::csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(BufWriter::new(file));
        csv_writer.serialize(CommunityMapper::rating_to_dto(rating.clone()))?;
        csv_writer.flush()?;

        info!(
            "Stored rating {} for {} ({} stars)",
            rating.id, rating.shared_story_id, rating.rating_value
        );
        Ok(())
    }

    async fn list_ratings(&self) -> Result<Vec<DomainRating>> {
        self.read_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup_test_repo() -> (RatingRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (RatingRepository::new(connection), temp_dir)
    }

    fn rating(story: &str, value: u8, user: Option<&str>) -> DomainRating {
        DomainRating {
            id: DomainRating::generate_id(),
            shared_story_id: story.to_string(),
            rating_value: value,
            created_by: user.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_empty_when_no_file() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(repo.list_ratings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_and_read_back() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_rating(&rating("shared::1", 5, Some("mor@example.dk"))).await.unwrap();
        repo.store_rating(&rating("shared::1", 3, None)).await.unwrap();
        repo.store_rating(&rating("shared::2", 4, Some("far@example.dk"))).await.unwrap();

        let ratings = repo.list_ratings().await.unwrap();
        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings[0].created_by.as_deref(), Some("mor@example.dk"));
        assert_eq!(ratings[1].created_by, None);
        assert_eq!(ratings[2].rating_value, 4);

        // Header is written once
        let content = std::fs::read_to_string(repo.connection.ratings_file_path()).unwrap();
        assert_eq!(content.matches("shared_story_id").count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_rating(&rating("shared::1", 5, None)).await.unwrap();

        let path = repo.connection.ratings_file_path();
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("rating::x,shared::1,not-a-number,,2024-01-01T00:00:00Z\n");
        std::fs::write(&path, content).unwrap();

        let ratings = repo.list_ratings().await.unwrap();
        assert_eq!(ratings.len(), 1);
    }
}
