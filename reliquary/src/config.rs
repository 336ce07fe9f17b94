//! Storage configuration

use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Where record files live.
///
/// The base directory is resolved once at construction and is not
/// configurable per call. Pass the value to [`FileStore::new`], which
/// becomes the single owner.
///
/// [`FileStore::new`]: crate::store::FileStore::new
#[derive(Debug, Clone)]
pub struct StorageConfig {
    base_dir: PathBuf,
}

impl StorageConfig {
    /// Use an explicit base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve the per-user application data directory for `app`.
    pub fn for_app(app: &str) -> Result<Self> {
        let base = dirs::data_dir().ok_or(StoreError::DataDir)?;
        Ok(Self {
            base_dir: base.join(app),
        })
    }

    /// The directory all record paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
