//! Test utilities module for automatic cleanup and consistent test infrastructure
//!
//! This module provides RAII-based cleanup that guarantees test data is removed
//! even if tests panic or fail.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::year_state_repository::{storage_key, YearStateRepository};

/// RAII Test Environment that automatically cleans up on drop
///
/// The temporary data directory lives as long as this struct does.
pub struct TestEnvironment {
    /// The temporary directory - kept alive to prevent auto-cleanup until drop
    _temp_dir: TempDir,
    /// The JSON connection for the test
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with automatic cleanup
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    /// Get the base directory path for this test environment
    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// Create a repository backed by this environment
    pub fn year_state_repository(&self) -> YearStateRepository {
        YearStateRepository::new(self.connection.clone())
    }

    /// Write a record verbatim, bypassing validation
    pub fn write_raw_record<C: AsRef<[u8]>>(&self, year: i32, contents: C) {
        self.connection
            .write_record(&storage_key(year), contents)
            .expect("Failed to write raw test record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_environment_cleanup() -> Result<()> {
        let base_path;

        {
            let env = TestEnvironment::new().await?;
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());

            env.write_raw_record(2024, "{}");
            assert!(base_path.join("calendar-pto-2024.json").exists());
        } // env goes out of scope here, triggering cleanup

        assert!(!base_path.exists());
        Ok(())
    }
}
