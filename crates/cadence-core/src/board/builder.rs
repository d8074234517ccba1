//! Builder for creating and configuring Board instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Board;
use crate::{
    db::Database,
    error::{BoardError, Result},
};

/// Builder for creating and configuring Board instances.
#[derive(Debug, Clone, Default)]
pub struct BoardBuilder {
    database_path: Option<PathBuf>,
}

impl BoardBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cadence/cadence.db` or
    /// `~/.local/share/cadence/cadence.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured board instance, creating the database file and
    /// schema if they do not exist yet.
    pub async fn build(self) -> Result<Board> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), BoardError>(())
        })
        .await
        .map_err(|e| BoardError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Board::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence")
            .place_data_file("cadence.db")
            .map_err(|e| BoardError::XdgDirectory(e.to_string()))
    }
}
