use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::storage::traits::Connection;
use super::year_state_repository::YearStateRepository;

/// JsonConnection maps record keys to JSON files inside a base directory
///
/// Keys such as `calendar-pto:2024` are stored as `calendar-pto-2024.json`.
#[derive(Clone, Debug)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new JSON connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the file path for a record key
    pub fn record_path(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        self.base_directory.join(format!("{}.json", file_stem))
    }

    /// Check whether a record exists for the key
    pub fn has_record(&self, key: &str) -> bool {
        self.record_path(key).is_file()
    }

    /// Read the raw bytes of a record, or None if it doesn't exist.
    ///
    /// Contents are not interpreted here; decoding is up to the repository.
    pub fn read_record(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.record_path(key);
        match fs::read(&path) {
            Ok(contents) => {
                debug!("Read record '{}' from {:?}", key, path);
                Ok(Some(contents))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read record '{}' at {:?}", key, path)),
        }
    }

    /// Overwrite a record with new contents
    pub fn write_record<C: AsRef<[u8]>>(&self, key: &str, contents: C) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
            info!("Created data directory: {}", self.base_directory.display());
        }

        let path = self.record_path(key);

        // Use atomic write pattern: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write record '{}' to {:?}", key, temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to move record '{}' into place at {:?}", key, path))?;

        debug!("Wrote record '{}' to {:?}", key, path);
        Ok(())
    }
}

impl Connection for JsonConnection {
    type YearStateRepository = YearStateRepository;

    fn create_year_state_repository(&self) -> Self::YearStateRepository {
        YearStateRepository::new(self.clone())
    }
}
