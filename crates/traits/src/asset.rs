//! AssetSource trait for abstracting where branding assets come from.
//!
//! Loading is allowed to block: sources are only consulted while a logo is
//! being prepared, never while a receipt is being laid out.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for asset loading operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

/// Asset bytes shared between the source and whoever prepared them.
pub type SharedAssetData = Arc<Vec<u8>>;

/// A named store of raw asset bytes (logo files and the like).
///
/// # Implementations
///
/// - `FilesystemAssetSource` (in `quittance-resource`): files under a base directory
/// - [`InMemoryAssetSource`]: bytes registered up front, e.g. embedded with `include_bytes!`
pub trait AssetSource: Send + Sync + Debug {
    /// Load an asset by its path or key.
    fn load(&self, path: &str) -> Result<SharedAssetData, AssetError>;

    /// Human-readable name of this source, for logging.
    fn name(&self) -> &'static str;
}

/// An asset source backed by a map of pre-registered byte buffers.
#[derive(Debug, Default)]
pub struct InMemoryAssetSource {
    assets: RwLock<HashMap<String, SharedAssetData>>,
}

impl InMemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data` under `path`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::LoadFailed` if the internal lock is poisoned.
    pub fn insert(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), AssetError> {
        let path = path.into();
        let mut assets = self.assets.write().map_err(|_| AssetError::LoadFailed {
            path: path.clone(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets.insert(path, Arc::new(data));
        Ok(())
    }

    /// Builder-style variant of [`insert`](Self::insert) for setting up sources in one expression.
    pub fn with_asset(self, path: impl Into<String>, data: Vec<u8>) -> Result<Self, AssetError> {
        self.insert(path, data)?;
        Ok(self)
    }

    /// Number of registered assets; 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetSource for InMemoryAssetSource {
    fn load(&self, path: &str) -> Result<SharedAssetData, AssetError> {
        let assets = self.assets.read().map_err(|_| AssetError::LoadFailed {
            path: path.to_string(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryAssetSource"
    }
}
