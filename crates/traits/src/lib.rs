pub mod asset;

pub use asset::{AssetError, AssetSource, InMemoryAssetSource, SharedAssetData};
