//! Filesystem-backed asset source.
//!
//! Assets are addressed relative to a base directory (typically the deployment's
//! `assets/` folder). Absolute paths and paths escaping the base directory are
//! refused and reported as `NotFound`.

use quittance_traits::{AssetError, AssetSource, SharedAssetData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemAssetSource {
    base_dir: PathBuf,
    /// Canonical form of `base_dir`, when it exists.
    canonical_base: Option<PathBuf>,
}

impl FilesystemAssetSource {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let canonical_base = base_dir.canonicalize().ok();
        Self {
            base_dir,
            canonical_base,
        }
    }

    /// Source rooted at the parent directory of `file`, paired with the file's name.
    ///
    /// Convenient for a logo given as a single path on the command line.
    pub fn for_file<P: AsRef<Path>>(file: P) -> (Self, String) {
        let file = file.as_ref();
        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (Self::new(dir), name)
    }

    /// Resolves `path` below the base directory, or `None` if it would escape it.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute() || relative.components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }

        let full = self.base_dir.join(relative);
        match (full.canonicalize(), &self.canonical_base) {
            // Symlinks may still point outside the base directory.
            (Ok(canonical), Some(base)) => canonical.starts_with(base).then_some(canonical),
            _ => Some(full),
        }
    }
}

impl AssetSource for FilesystemAssetSource {
    fn load(&self, path: &str) -> Result<SharedAssetData, AssetError> {
        let full = self.resolve(path).ok_or_else(|| {
            log::warn!("Refusing asset path outside {}: {}", self.base_dir.display(), path);
            AssetError::NotFound(format!("{} (outside asset directory)", path))
        })?;

        std::fs::read(&full).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(path.to_string())
            } else {
                AssetError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn name(&self) -> &'static str {
        "FilesystemAssetSource"
    }
}
