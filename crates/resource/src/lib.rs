//! Asset sources for receipt branding.
//!
//! ## Available Sources
//!
//! - [`FilesystemAssetSource`]: files below a base directory
//! - [`InMemoryAssetSource`]: re-exported from `quittance-traits` for convenience

mod filesystem;

pub use filesystem::FilesystemAssetSource;

pub use quittance_traits::InMemoryAssetSource;
