//! Application context for CLI command execution.
//!
//! The `App` struct discovers the waypoint workspace, loads configuration,
//! and owns the graph store for the duration of one command.

use crate::commands::init::{CONFIG_FILE_NAME, WAYPOINT_DIR_NAME, WaypointConfig, find_waypoint_root};
use crate::error::{Error, Result};
use crate::storage::{GraphStore, create_store};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
///
/// Storage is loaded from the workspace's store file on creation; call
/// [`save`](Self::save) after mutating operations to persist it.
pub struct App {
    /// The store backend (trait object for polymorphism).
    store: Box<dyn GraphStore>,

    /// Path to the waypoint directory (`.waypoint`).
    waypoint_dir: PathBuf,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("waypoint_dir", &self.waypoint_dir)
            .field("store", &"<dyn GraphStore>")
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for a `.waypoint/` directory, loads
    /// configuration, and opens the store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no waypoint workspace is found, or any
    /// error from loading configuration or opening the store.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_waypoint_root(working_dir).ok_or_else(|| {
            Error::Config(
                "Not a waypoint workspace (run 'waypoint init' to create one)".to_string(),
            )
        })?;

        let waypoint_dir = root_dir.join(WAYPOINT_DIR_NAME);
        let config_path = waypoint_dir.join(CONFIG_FILE_NAME);

        let config = WaypointConfig::load(&config_path).await?;
        let store = create_store(&config.store_path(&root_dir)).await?;

        Ok(Self {
            store,
            waypoint_dir,
        })
    }

    /// Get a mutable reference to the store.
    pub fn store_mut(&mut self) -> &mut dyn GraphStore {
        self.store.as_mut()
    }

    /// Get an immutable reference to the store.
    #[must_use]
    pub fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }

    /// Get the path to the waypoint directory.
    #[must_use]
    pub fn waypoint_dir(&self) -> &Path {
        &self.waypoint_dir
    }

    /// Persist the store to its backing file.
    ///
    /// This should be called after any mutating operations.
    ///
    /// # Errors
    ///
    /// Returns any error from the store's persist operation.
    pub async fn save(&self) -> Result<()> {
        self.store.persist().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use tempfile::TempDir;

    #[tokio::test]
    async fn app_from_initialized_directory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path()).await.unwrap();

        let app = App::from_directory(temp_dir.path()).await.unwrap();
        assert!(app.waypoint_dir().ends_with(".waypoint"));
    }

    #[tokio::test]
    async fn app_from_subdirectory_finds_workspace() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path()).await.unwrap();

        let sub_dir = temp_dir.path().join("graphs").join("inputs");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let app = App::from_directory(&sub_dir).await.unwrap();
        assert!(app.waypoint_dir().starts_with(temp_dir.path()));
    }

    #[tokio::test]
    async fn app_from_uninitialized_directory_fails() {
        let temp_dir = TempDir::new().unwrap();

        let result = App::from_directory(temp_dir.path()).await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Not a waypoint workspace"));
    }
}
