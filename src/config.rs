use crate::{
    drag::{DragController, DEFAULT_ACTIVATION_DISTANCE},
    error::{CaseFileError, Result},
    persistence::BoardRepository,
    store::BoardStore,
    storage::{MemoryStorage, Storage, DEFAULT_STORAGE_KEY},
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::fs;

/// Where and under which key the board is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub key: String,
    /// Directory for file storage; without one the board lives in memory only
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
        }
    }
}

/// Drag gesture tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub activation_distance: f64,
    /// Write once at the end of a gesture instead of on every live move
    pub defer_persistence: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            defer_persistence: true,
        }
    }
}

/// Top-level configuration, usually read from `casefile.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseFileConfig {
    pub storage: StorageConfig,
    pub drag: DragConfig,
}

impl CaseFileConfig {
    pub const FILE_NAME: &'static str = "casefile.toml";

    /// Parses and validates a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| CaseFileError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration file, or the defaults when it does not exist
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(CaseFileError::ConfigError(
                "storage.key must not be empty".to_string(),
            ));
        }

        let distance = self.drag.activation_distance;
        if !distance.is_finite() || distance < 0.0 {
            return Err(CaseFileError::ConfigError(format!(
                "drag.activation_distance must be a non-negative number, got {}",
                distance
            )));
        }

        Ok(())
    }

    /// Builds the storage backend this configuration describes
    pub fn build_storage(&self) -> Result<Arc<dyn Storage>> {
        match &self.storage.data_dir {
            #[cfg(feature = "file-storage")]
            Some(dir) => Ok(Arc::new(crate::storage::FileStorage::with_key(
                dir,
                self.storage.key.clone(),
            ))),
            #[cfg(not(feature = "file-storage"))]
            Some(_) => Err(CaseFileError::ConfigError(
                "storage.data_dir requires the file-storage feature".to_string(),
            )),
            None => Ok(Arc::new(MemoryStorage::with_key(self.storage.key.clone()))),
        }
    }

    /// Loads the board and opens a store over it
    pub async fn open_store(&self) -> Result<BoardStore> {
        let repository = BoardRepository::new(self.build_storage()?);
        Ok(BoardStore::open(repository)
            .await
            .defer_persistence_during_gestures(self.drag.defer_persistence))
    }

    pub fn drag_controller(&self) -> DragController {
        DragController::new(self.drag.activation_distance)
    }
}
