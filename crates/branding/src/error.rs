use quittance_traits::AssetError;
use thiserror::Error;

/// Why a canonical logo could not be prepared.
///
/// These never reach receipt builds: the resolver absorbs them by switching to
/// placeholder mode and keeps the message for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrepareError {
    #[error("No logo asset configured")]
    NotConfigured,

    #[error("Logo asset unavailable: {0}")]
    Asset(#[from] AssetError),

    #[error("Could not decode logo '{path}': {message}")]
    Decode { path: String, message: String },

    #[error("Logo preparation timed out after {0} ms")]
    Timeout(u64),

    #[error("Logo preparation task failed: {0}")]
    Task(String),
}
