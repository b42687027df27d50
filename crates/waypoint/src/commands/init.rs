//! Implementation of the `init` command.
//!
//! This module handles initialization of a waypoint workspace, creating the
//! `.waypoint/` directory with configuration and an empty graph store.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the waypoint directory.
pub const WAYPOINT_DIR_NAME: &str = ".waypoint";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the graph store file.
pub const STORE_FILE_NAME: &str = "graphs.jsonl";

/// Maximum directory depth to traverse when searching for the waypoint root.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for waypoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaypointConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type ("jsonl" is the only backend today).
    pub backend: String,

    /// Path to the store file, relative to the workspace root.
    pub data_file: String,
}

impl WaypointConfig {
    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read or `Error::Config` if
    /// it is not valid YAML.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails or `Error::Io` if the
    /// write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Resolves the store file path against the workspace root.
    #[must_use]
    pub fn store_path(&self, root: &Path) -> PathBuf {
        root.join(&self.storage.data_file)
    }
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: "jsonl".to_string(),
                data_file: format!("{WAYPOINT_DIR_NAME}/{STORE_FILE_NAME}"),
            },
        }
    }
}

/// Result of the init command.
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created waypoint directory.
    pub waypoint_dir: PathBuf,

    /// Path to the created config file.
    pub config_file: PathBuf,

    /// Path to the created store file.
    pub store_file: PathBuf,
}

/// Initialize a waypoint workspace in the given directory.
///
/// Creates `.waypoint/` with `config.yaml` and an empty `graphs.jsonl`.
///
/// # Errors
///
/// Returns `Error::Config` if the directory is already initialized, or
/// `Error::Io` for filesystem failures.
pub async fn init(base_dir: &Path) -> Result<InitResult> {
    let waypoint_dir = base_dir.join(WAYPOINT_DIR_NAME);

    if waypoint_dir.exists() {
        return Err(Error::Config(format!(
            "Waypoint is already initialized in this directory. Found existing '{WAYPOINT_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&waypoint_dir).await?;

    let config_file = waypoint_dir.join(CONFIG_FILE_NAME);
    let config = WaypointConfig::default();
    config.save(&config_file).await?;

    let store_file = waypoint_dir.join(STORE_FILE_NAME);
    fs::write(&store_file, "").await?;

    tracing::info!(dir = %waypoint_dir.display(), "waypoint workspace initialized");

    Ok(InitResult {
        waypoint_dir,
        config_file,
        store_file,
    })
}

/// Searches `start_dir` and its ancestors for a directory containing
/// `.waypoint/`.
#[must_use]
pub fn find_waypoint_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;
    for _ in 0..MAX_TRAVERSAL_DEPTH {
        if current.join(WAYPOINT_DIR_NAME).is_dir() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn init_creates_directory_layout() {
        let temp_dir = TempDir::new().unwrap();

        let result = init(temp_dir.path()).await.unwrap();

        assert!(result.waypoint_dir.is_dir());
        assert!(result.config_file.is_file());
        assert!(result.store_file.is_file());
    }

    #[tokio::test]
    async fn init_twice_fails() {
        let temp_dir = TempDir::new().unwrap();

        init(temp_dir.path()).await.unwrap();
        let err = init(temp_dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("already initialized"));
    }

    #[tokio::test]
    async fn config_round_trips_through_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let config = WaypointConfig::default();
        config.save(&path).await.unwrap();
        let loaded = WaypointConfig::load(&path).await.unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.storage.backend, "jsonl");
    }

    #[tokio::test]
    async fn find_root_walks_up_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        init(temp_dir.path()).await.unwrap();

        let sub_dir = temp_dir.path().join("data").join("inputs");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let root = find_waypoint_root(&sub_dir).unwrap();
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    fn find_root_returns_none_when_uninitialized() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_waypoint_root(temp_dir.path()).is_none());
    }
}
