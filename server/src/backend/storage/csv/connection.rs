use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// CsvConnection owns the data directory layout and the file helpers shared
/// by every repository
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a connection rooted at `base_directory`, creating the layout if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        let connection = Self { base_directory: base_path };
        for dir in [
            connection.base_directory(),
            connection.children_directory(),
            connection.stories_directory(),
            connection.community_directory(),
        ] {
            if !dir.exists() {
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
                info!("Created data directory: {}", dir.display());
            }
        }

        Ok(connection)
    }

    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.clone()
    }

    pub fn children_directory(&self) -> PathBuf {
        self.base_directory.join("children")
    }

    pub fn stories_directory(&self) -> PathBuf {
        self.base_directory.join("stories")
    }

    pub fn community_directory(&self) -> PathBuf {
        self.base_directory.join("community")
    }

    pub fn ratings_file_path(&self) -> PathBuf {
        self.base_directory.join("ratings.csv")
    }

    pub fn global_config_path(&self) -> PathBuf {
        self.base_directory.join("global_config.yaml")
    }

    /// Path of the YAML record for `id` inside `directory`
    pub fn record_path(directory: &Path, id: &str) -> PathBuf {
        directory.join(format!("{}.yaml", Self::file_stem(id)))
    }

    /// Maps a record id onto a safe file name.
    /// `child::4f2a` -> `child_4f2a`; anything outside `[A-Za-z0-9_-]` becomes `_`.
    pub fn file_stem(id: &str) -> String {
        id.replace("::", "_")
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect()
    }

    /// Write a value as YAML via a uniquely named temp file in the same
    /// directory, renamed over `path`
    pub fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let yaml_content = serde_yaml::to_string(value)?;

        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(directory)
            .with_context(|| format!("Failed to create temp file in {}", directory.display()))?;
        temp_file
            .write_all(yaml_content.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_file.path().display()))?;
        temp_file
            .persist(path)
            .with_context(|| format!("Failed to move {} into place", path.display()))?;

        debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Read a YAML record; `Ok(None)` if the file does not exist
    pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(value))
    }

    /// Read every `*.yaml` record in a directory, skipping unreadable files
    pub fn read_yaml_directory<T: DeserializeOwned>(directory: &Path) -> Result<Vec<T>> {
        if !directory.exists() {
            debug!("Directory {} doesn't exist, returning empty list", directory.display());
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(directory)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }

            match Self::read_yaml(&path) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable record {}: {:#}", path.display(), e),
            }
        }

        Ok(records)
    }

    /// Remove a record file; returns false if there was nothing to remove
    pub fn remove_file(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
        Ok(true)
    }
}
